//! Employee table with search, sortable headers and pagination.

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CARET_DOWN, CARET_LEFT, CARET_RIGHT, CARET_UP, FILE_XLS};

use super::components::{empty_state, styled_button_with_icon};
use crate::models::EmployeeRecord;
use crate::table::{
    Column, EMPLOYEE_COLUMNS, Emptiness, PAGE_SIZE_OPTIONS, SortDirection, TableRow, TableViewState, compute_page,
};

/// Toolbar requests handled by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    None,
    Refresh,
    Export,
}

/// Placeholder for null cells.
const NULL_CELL: &str = "-";

/// Show the table view.
pub fn show(ui: &mut Ui, state: &mut TableViewState, employees: &[EmployeeRecord], busy: bool) -> TableAction {
    let mut action = TableAction::None;

    ui.horizontal(|ui| {
        ui.label("Search:");
        let mut search = state.search_term().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .desired_width(240.0)
                .hint_text("Search all fields..."),
        );
        if response.changed() {
            state.set_search(search);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                action = TableAction::Export;
            }
            ui.add_space(10.0);
            let refresh = ui.add_enabled(
                !busy,
                egui::Button::new(RichText::new(format!("{ARROWS_CLOCKWISE} Refresh")).size(14.0)),
            );
            if refresh.clicked() {
                action = TableAction::Refresh;
            }
            if busy {
                ui.spinner();
            }
        });
    });

    ui.add_space(10.0);

    let page = compute_page(employees, state);
    if page.is_empty() {
        let text = match &page.emptiness {
            Emptiness::NoResults(term) => format!("No results found for \"{term}\""),
            _ => "No Data Found".to_string(),
        };
        empty_state(ui, &text);
        return action;
    }

    let first = page.page_index * state.page_size() + 1;
    let last = first + page.rows.len() - 1;
    let total = page.total;
    let page_index = page.page_index;
    let page_count = page.page_count;

    let mut sort_click = None;
    let available = ui.available_height() - 40.0;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(TableColumn::auto().at_least(90.0), EMPLOYEE_COLUMNS.len())
        .max_scroll_height(available.max(100.0))
        .header(26.0, |mut header| {
            for column in &EMPLOYEE_COLUMNS {
                header.col(|ui| {
                    if sort_header(ui, column, state.direction_for(column.key)) {
                        sort_click = Some(column.key);
                    }
                });
            }
        })
        .body(|mut body| {
            for record in &page.rows {
                body.row(24.0, |mut row| {
                    for column in &EMPLOYEE_COLUMNS {
                        row.col(|ui| {
                            ui.label(record.cell(column.key).unwrap_or(NULL_CELL));
                        });
                    }
                });
            }
        });

    if let Some(key) = sort_click {
        state.request_sort(key);
    }

    ui.add_space(8.0);
    ui.separator();

    // Pager
    ui.horizontal(|ui| {
        ui.label("Rows per page:");
        let mut page_size = state.page_size();
        egui::ComboBox::from_id_salt("employee_page_size")
            .width(60.0)
            .selected_text(page_size.to_string())
            .show_ui(ui, |ui| {
                for option in PAGE_SIZE_OPTIONS {
                    ui.selectable_value(&mut page_size, option, option.to_string());
                }
            });
        if page_size != state.page_size() {
            state.set_page_size(page_size);
        }

        ui.add_space(20.0);
        ui.label(format!("{first}-{last} of {total}"));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .add_enabled(page_index + 1 < page_count, egui::Button::new(CARET_RIGHT))
                .on_hover_text("Next page")
                .clicked()
            {
                state.next_page(total);
            }
            ui.label(format!("Page {} of {}", page_index + 1, page_count));
            if ui
                .add_enabled(page_index > 0, egui::Button::new(CARET_LEFT))
                .on_hover_text("Previous page")
                .clicked()
            {
                state.prev_page();
            }
        });
    });

    action
}

/// Clickable column header. Returns `true` when clicked.
fn sort_header(ui: &mut Ui, column: &Column, direction: Option<SortDirection>) -> bool {
    let text = match direction {
        Some(SortDirection::Ascending) => format!("{} {CARET_UP}", column.header),
        Some(SortDirection::Descending) => format!("{} {CARET_DOWN}", column.header),
        None => column.header.to_string(),
    };
    ui.add(egui::Button::new(RichText::new(text).strong()).frame(false))
        .on_hover_text("Sort")
        .clicked()
}
