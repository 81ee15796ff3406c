//! CSV and Excel export of a listing.
//!
//! Exports run the view's query without the listing limit and stringify
//! every cell (converters applied). The row iteration is shared: a header
//! of column titles followed by one row per matched record.

mod csv_writer;
mod excel;

pub use csv_writer::{to_csv, to_csv_with_delimiter};
pub use excel::to_excel;

use thiserror::Error;

use crate::view::DataBoxView;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The export rows: header first, then the stringified cells of every
/// matched record (no limit).
pub fn rows(view: &DataBoxView) -> Vec<Vec<String>> {
    let mut out = vec![view.header()];
    for row in view.rows(true) {
        out.push(row.into_iter().map(|cell| cell.display).collect());
    }
    out
}

/// Default export filename for a box title.
pub fn filename(title: &str, extension: &str) -> String {
    format!("{title}.{extension}")
}

/// Write a CSV export to a path.
pub fn write_csv(view: &DataBoxView, path: &std::path::Path) -> Result<(), ExportError> {
    let data = to_csv(view)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Write an Excel export to a path.
pub fn write_excel(view: &DataBoxView, path: &std::path::Path) -> Result<(), ExportError> {
    let data = to_excel(view)?;
    std::fs::write(path, data)?;
    Ok(())
}
