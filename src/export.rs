//! Excel export of the employee table.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::table::{Column, TableRow};

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Export rows to an Excel file, one column per descriptor.
///
/// Rows are written in the order given, so pass them already filtered and
/// sorted. Null cells are left blank.
pub fn export_rows_to_excel<R: TableRow>(rows: &[&R], columns: &[Column], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Employees")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
        // Email is the widest field
        let width = if column.key == "email" { 30 } else { 15 };
        worksheet.set_column_width(col, width)?;
    }

    // Data rows
    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            worksheet.write_string(row, col as u16, record.cell(column.key).unwrap_or(""))?;
        }
    }

    // Autofilter
    if !rows.is_empty() && !columns.is_empty() {
        worksheet.autofilter(0, 0, rows.len() as u32, (columns.len() - 1) as u16)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
