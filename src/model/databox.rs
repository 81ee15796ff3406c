//! The DataBox definition: a saved, parameterized catalog query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::column::ColumnConfig;
use super::param::Parameter;
use crate::catalog::CatalogQuery;
use crate::convert::ConverterRegistry;

/// Definition errors reported by [`DataBox::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("Duplicate parameter name: '{0}'")]
    DuplicateParameter(String),

    #[error("Column {index} has no source field")]
    EmptyColumn { index: usize },

    #[error("Column '{column}' names unknown converter '{converter}'")]
    UnknownConverter { column: String, converter: String },
}

/// A saved, parameterized catalog query with display and export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataBox {
    pub id: String,
    pub title: String,
    pub description: String,

    /// The base catalog query.
    pub query: CatalogQuery,

    /// Result limit for the listing, 0 for unlimited. Exports ignore it.
    pub limit: usize,

    pub columns: Vec<ColumnConfig>,

    /// Static parameters, usable in column code and the base query.
    pub params: Vec<Parameter>,

    /// Optional date range bound to the query's date index.
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl Default for DataBox {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            query: CatalogQuery::default(),
            limit: 0,
            columns: Vec::new(),
            params: Vec::new(),
            date_from: None,
            date_to: None,
        }
    }
}

impl DataBox {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Effective start of the date range.
    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Effective end of the date range.
    ///
    /// An end before the start clamps to the start.
    pub fn date_to(&self) -> Option<NaiveDate> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) if to < from => Some(from),
            (_, to) => to,
        }
    }

    /// Check the definition against the converter registry.
    pub fn validate(&self, converters: &ConverterRegistry) -> Result<(), Vec<DefinitionError>> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for param in &self.params {
            if !param.name.is_empty() && !seen.insert(param.name.as_str()) {
                errors.push(DefinitionError::DuplicateParameter(param.name.clone()));
            }
        }

        for (index, column) in self.columns.iter().enumerate() {
            if column.column.is_empty() {
                errors.push(DefinitionError::EmptyColumn { index });
            }
            if let Some(converter) = &column.converter {
                if !converter.is_empty() && !converters.contains(converter) {
                    errors.push(DefinitionError::UnknownConverter {
                        column: column.column.clone(),
                        converter: converter.clone(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
