//! Excel export.

use rust_xlsxwriter::Workbook;

use super::ExportError;
use crate::view::DataBoxView;

/// Export the listing as an xlsx workbook with a single worksheet named
/// after the box title.
pub fn to_excel(view: &DataBoxView) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(&view.databox().title))?;

    for (row_num, row) in super::rows(view).iter().enumerate() {
        for (col_num, cell) in row.iter().enumerate() {
            worksheet.write_string(row_num as u32, col_num as u16, cell.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Worksheet names cap at 31 characters and exclude `[ ] : * ? / \`.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "DataBox".to_string()
    } else {
        cleaned
    }
}
