//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};
use egui_phosphor::regular::{CHECK_CIRCLE, INFO, WARNING, X};

use crate::notification::{Notification, Severity};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(65, 105, 225);
    pub const MARKER: Color32 = Color32::from_rgb(40, 120, 220);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {text}")).size(14.0))
}

/// Filled call-to-action button; greyed out when disabled.
pub fn primary_button(ui: &mut Ui, text: &str, enabled: bool) -> Response {
    let (fill, color) = if enabled {
        (colors::PRIMARY, Color32::WHITE)
    } else {
        (ui.visuals().widgets.inactive.bg_fill, colors::NEUTRAL)
    };
    let button = egui::Button::new(RichText::new(text).size(16.0).color(color))
        .fill(fill)
        .min_size(egui::vec2(180.0, 36.0));
    ui.add_enabled(enabled, button)
}

/// Centered placeholder text for empty views.
pub fn empty_state(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(text).size(18.0).weak());
    });
}

fn severity_style(severity: Severity) -> (Color32, &'static str) {
    match severity {
        Severity::Success => (colors::SUCCESS, CHECK_CIRCLE),
        Severity::Info => (colors::NEUTRAL, INFO),
        Severity::Error => (colors::ERROR, WARNING),
    }
}

/// Render the transient notification at the bottom of the window.
///
/// Returns `true` when its close button was clicked. Clicks elsewhere do not
/// dismiss it.
pub fn notification_toast(ctx: &egui::Context, notification: &Notification) -> bool {
    let mut close = false;
    let (color, icon) = severity_style(notification.severity);

    egui::Area::new(egui::Id::new("notification_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -40.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .stroke(egui::Stroke::new(1.5, color))
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(icon).color(color).size(18.0));
                        ui.label(RichText::new(&notification.message).size(14.0));
                        ui.add_space(12.0);
                        if ui.small_button(X).on_hover_text("Close").clicked() {
                            close = true;
                        }
                    });
                });
        });

    close
}

/// Persistent inline error with a retry action. Returns `true` on retry.
pub fn error_banner(ui: &mut Ui, message: &str, action: &str, busy: bool) -> bool {
    let mut retry = false;
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .stroke(egui::Stroke::new(1.0, colors::ERROR))
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(WARNING).color(colors::ERROR).size(16.0));
                ui.colored_label(colors::ERROR, message);
                ui.add_space(10.0);
                if busy {
                    ui.spinner();
                } else if ui.button(action).clicked() {
                    retry = true;
                }
            });
        });
    retry
}
