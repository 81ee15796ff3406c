//! CSV export.

use csv::{QuoteStyle, WriterBuilder};

use super::ExportError;
use crate::view::DataBoxView;

/// Export the listing as CSV: comma delimiter, `"` quote, every field
/// quoted.
pub fn to_csv(view: &DataBoxView) -> Result<String, ExportError> {
    to_csv_with_delimiter(view, b',')
}

/// Export the listing as CSV with a custom delimiter.
pub fn to_csv_with_delimiter(view: &DataBoxView, delimiter: u8) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote(b'"')
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    for row in super::rows(view) {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
