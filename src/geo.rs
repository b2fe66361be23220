//! Map points derived from employee coordinates.

use crate::models::EmployeeRecord;

/// A plottable employee location.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: Option<String>,
    /// (latitude, longitude)
    pub position: (f64, f64),
    /// City shown in the marker popup.
    pub label: Option<String>,
    /// Employee name shown in the marker popup.
    pub name: String,
}

/// Latitude/longitude box containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Centre of the box as (latitude, longitude).
    pub fn center(&self) -> (f64, f64) {
        ((self.min_lat + self.max_lat) / 2.0, (self.min_lon + self.max_lon) / 2.0)
    }
}

/// Whether a coordinate pair is finite and within the valid ranges.
pub fn in_range(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build a map point from a record, or `None` if either coordinate is unusable.
pub fn map_point(record: &EmployeeRecord) -> Option<MapPoint> {
    let latitude = parse_coordinate(record.latitude.as_deref())?;
    let longitude = parse_coordinate(record.longitude.as_deref())?;
    if !in_range(latitude, longitude) {
        return None;
    }

    Some(MapPoint {
        id: record.id.clone(),
        position: (latitude, longitude),
        label: record.city.clone(),
        name: record.full_name(),
    })
}

/// Derive map points from records, preserving order.
///
/// Records with a missing, non-numeric or out-of-range coordinate are dropped.
pub fn filter_locations(records: &[EmployeeRecord]) -> Vec<MapPoint> {
    records.iter().filter_map(map_point).collect()
}

/// Smallest box containing every point.
pub fn bounds(points: &[MapPoint]) -> Option<GeoBounds> {
    let (first, rest) = points.split_first()?;
    let (lat, lon) = first.position;
    let init = GeoBounds {
        min_lat: lat,
        max_lat: lat,
        min_lon: lon,
        max_lon: lon,
    };

    Some(rest.iter().fold(init, |b, p| {
        let (lat, lon) = p.position;
        GeoBounds {
            min_lat: b.min_lat.min(lat),
            max_lat: b.max_lat.max(lat),
            min_lon: b.min_lon.min(lon),
            max_lon: b.max_lon.max(lon),
        }
    }))
}
