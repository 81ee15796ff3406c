//! Column configuration of a query folder.

use serde::{Deserialize, Serialize};

/// A single table column.
///
/// `column` names the source field of the matched record. For reference
/// fields, `refs` is the attribute path walked through the linked records
/// (one entry per hop). `code` recomputes the cell in the sandbox, and
/// `converter` names a display converter for the final value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Source field key of the matched record.
    pub column: String,

    /// Column title; derived from the key when empty.
    pub title: Option<String>,

    /// Reference attribute path for dereferencing linked records.
    pub refs: Vec<String>,

    /// Inline expression recomputing the cell value.
    pub code: Option<String>,

    /// Name of a registered display converter.
    pub converter: Option<String>,
}

impl ColumnConfig {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_refs(mut self, refs: &[&str]) -> Self {
        self.refs = refs.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_converter(mut self, converter: impl Into<String>) -> Self {
        self.converter = Some(converter.into());
        self
    }
}
