//! Map view: employee markers on an equirectangular projection.

use eframe::egui::{self, Color32, Pos2, Rect, RichText, Sense, Stroke, Ui};

use super::components::{colors, empty_state};
use crate::geo::{GeoBounds, MapPoint, bounds};

/// Degrees shown around the centre when there is nothing to fit.
const DEFAULT_SPAN: f64 = 20.0;
/// Smallest span fitted, so a single marker is not infinitely zoomed.
const MIN_SPAN: f64 = 2.0;
const PADDING: f32 = 32.0;
const MARKER_RADIUS: f32 = 6.0;
const HOVER_RADIUS: f32 = 10.0;

/// Maps latitude/longitude to screen positions inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    rect: Rect,
    center: (f64, f64),
    /// Pixels per degree, equal on both axes.
    scale: f64,
}

impl Projection {
    /// Fit the projection so every point in `bounds` is visible.
    pub fn fit(rect: Rect, bounds: &GeoBounds) -> Self {
        let lat_span = (bounds.max_lat - bounds.min_lat).max(MIN_SPAN);
        let lon_span = (bounds.max_lon - bounds.min_lon).max(MIN_SPAN);
        let inner = rect.shrink(PADDING);
        let scale = (inner.width() as f64 / lon_span).min(inner.height() as f64 / lat_span);
        Self {
            rect,
            center: bounds.center(),
            scale: scale.max(f64::EPSILON),
        }
    }

    /// Centre the projection on a point with the default span.
    pub fn centered(rect: Rect, center: (f64, f64)) -> Self {
        let scale = (rect.width().min(rect.height()) as f64 / DEFAULT_SPAN).max(f64::EPSILON);
        Self { rect, center, scale }
    }

    pub fn project(&self, latitude: f64, longitude: f64) -> Pos2 {
        let c = self.rect.center();
        let x = c.x as f64 + (longitude - self.center.1) * self.scale;
        // Screen y grows downwards
        let y = c.y as f64 - (latitude - self.center.0) * self.scale;
        Pos2::new(x as f32, y as f32)
    }

    /// Inverse of [`Projection::project`].
    pub fn unproject(&self, pos: Pos2) -> (f64, f64) {
        let c = self.rect.center();
        let longitude = self.center.1 + (pos.x - c.x) as f64 / self.scale;
        let latitude = self.center.0 - (pos.y - c.y) as f64 / self.scale;
        (latitude, longitude)
    }
}

/// Show the map view.
pub fn show(ui: &mut Ui, points: &[MapPoint], employee_count: usize, default_center: [f64; 2]) {
    if employee_count == 0 {
        empty_state(ui, "No Data Found");
        return;
    }

    ui.label(format!(
        "{} of {} employees have a valid location",
        points.len(),
        employee_count
    ));
    ui.add_space(6.0);

    let size = ui.available_size();
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    let projection = match bounds(points) {
        Some(b) => Projection::fit(rect, &b),
        None => Projection::centered(rect, (default_center[0], default_center[1])),
    };

    painter.rect_filled(rect, 6.0, ui.visuals().extreme_bg_color);
    draw_graticule(&painter, &projection, rect, ui.visuals().weak_text_color());

    let hover = response.hover_pos();
    let mut hovered: Option<&MapPoint> = None;

    for point in points {
        let (lat, lon) = point.position;
        let pos = projection.project(lat, lon);
        let is_hovered = hover.is_some_and(|h| h.distance(pos) <= HOVER_RADIUS);
        if is_hovered && hovered.is_none() {
            hovered = Some(point);
        }
        let radius = if is_hovered { MARKER_RADIUS + 2.0 } else { MARKER_RADIUS };
        painter.circle_filled(pos, radius, colors::MARKER);
        painter.circle_stroke(pos, radius, Stroke::new(1.5, Color32::WHITE));
    }

    if let Some(point) = hovered {
        response.on_hover_ui_at_pointer(|ui| {
            ui.label(RichText::new(&point.name).strong());
            ui.label(point.label.as_deref().unwrap_or("-"));
        });
    }
}

/// Lines every 10 degrees within the visible area.
fn draw_graticule(painter: &egui::Painter, projection: &Projection, rect: Rect, color: Color32) {
    let stroke = Stroke::new(0.5, color.gamma_multiply(0.4));
    let (top_lat, left_lon) = projection.unproject(rect.left_top());
    let (bottom_lat, right_lon) = projection.unproject(rect.right_bottom());

    let step = 10.0;
    let mut lon = (left_lon / step).ceil() * step;
    while lon <= right_lon.min(180.0) {
        let x = projection.project(0.0, lon).x;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        lon += step;
    }

    let mut lat = (bottom_lat.max(-90.0) / step).ceil() * step;
    while lat <= top_lat.min(90.0) {
        let y = projection.project(lat, 0.0).y;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        lat += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_fit_keeps_points_inside() {
        let bounds = GeoBounds {
            min_lat: -33.9,
            max_lat: 51.5,
            min_lon: -0.1,
            max_lon: 151.2,
        };
        let projection = Projection::fit(rect(), &bounds);

        for (lat, lon) in [(-33.9, 151.2), (51.5, -0.1), (10.0, 20.0)] {
            let pos = projection.project(lat, lon);
            assert!(rect().contains(pos), "{lat},{lon} projected outside: {pos:?}");
        }
    }

    #[test]
    fn test_center_projects_to_rect_center() {
        let projection = Projection::centered(rect(), (51.505, -0.09));
        let pos = projection.project(51.505, -0.09);
        assert!((pos.x - 400.0).abs() < 0.01);
        assert!((pos.y - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_north_is_up() {
        let projection = Projection::centered(rect(), (0.0, 0.0));
        assert!(projection.project(10.0, 0.0).y < projection.project(-10.0, 0.0).y);
        assert!(projection.project(0.0, 10.0).x > projection.project(0.0, -10.0).x);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let projection = Projection::centered(rect(), (12.0, 34.0));
        let (lat, lon) = projection.unproject(projection.project(15.0, 30.0));
        assert!((lat - 15.0).abs() < 1e-3);
        assert!((lon - 30.0).abs() < 1e-3);
    }
}
