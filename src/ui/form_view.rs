//! Add-employee form.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::MAP_PIN;

use super::components::{colors, error_banner, panel_header, primary_button};
use crate::form::{FormState, LocationStatus};
use crate::validation::Field;

/// Requests from the form handled by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    RetryLocation,
}

/// Show the add-employee form.
pub fn show(ui: &mut Ui, form: &mut FormState) -> FormAction {
    let mut action = FormAction::None;

    panel_header(ui, "Please Fill the Form");

    if let Some(error) = form.location_error()
        && error_banner(ui, error.user_message(), "Try Again", form.is_locating())
    {
        action = FormAction::RetryLocation;
    }

    ui.add_space(10.0);

    egui::ScrollArea::vertical().id_salt("employee_form_scroll").show(ui, |ui| {
        egui::Grid::new("employee_form_grid")
            .num_columns(2)
            .spacing([20.0, 6.0])
            .show(ui, |ui| {
                for field in Field::EDITABLE {
                    ui.label(field.label());
                    ui.vertical(|ui| {
                        if let Some(value) = form.field_mut(field) {
                            let response = ui.add(egui::TextEdit::singleline(value).desired_width(320.0));
                            if response.lost_focus() {
                                form.touch(field);
                                // Enter attempts a submit even while the button is disabled
                                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                    action = FormAction::Submit;
                                }
                            }
                        }
                        // Checked after the edit above so errors track the current keystroke
                        if let Some(message) = form.visible_error(field) {
                            ui.colored_label(colors::ERROR, RichText::new(message).size(12.0));
                        }
                    });
                    ui.end_row();
                }

                for field in [Field::Latitude, Field::Longitude] {
                    ui.label(format!("{MAP_PIN} {}", field.label()));
                    ui.horizontal(|ui| {
                        let mut value: &str = field.value(form.draft());
                        ui.add(egui::TextEdit::singleline(&mut value).desired_width(200.0));
                        if form.location_status() == &LocationStatus::Pending {
                            ui.spinner();
                        }
                    });
                    ui.end_row();
                }
            });

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            if primary_button(ui, "Submit", form.submit_enabled()).clicked() {
                action = FormAction::Submit;
            }
            if form.is_submitting() {
                ui.spinner();
                ui.label("Submitting...");
            }
        });
    });

    action
}
