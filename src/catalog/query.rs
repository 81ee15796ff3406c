//! Catalog query definition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::Value;

/// Sort direction for the sort index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A catalog query: the persisted search of a query folder.
///
/// Filter values compare with [`Value::filter_eq`]; a list filter value
/// matches a record when any member matches. String filter values of the
/// form `$name` are parameter placeholders, substituted by the view before
/// the search runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Content type to search, all types when empty.
    pub content_type: Option<String>,

    /// Field equality filters (BTreeMap keeps file output stable).
    pub filters: BTreeMap<String, Value>,

    /// Field to sort the results on.
    pub sort_on: Option<String>,

    pub sort_order: SortOrder,

    /// Date field the optional date range applies to.
    pub date_index: Option<String>,

    /// Inclusive date range bounds, bound by the view from the box.
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,

    /// Maximum number of results, 0 for unlimited.
    pub limit: usize,
}

impl CatalogQuery {
    /// Query for a single content type.
    pub fn for_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_on = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
