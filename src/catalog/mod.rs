//! In-memory content catalog.
//!
//! Records are typed by the [`SchemaRegistry`](crate::schema::SchemaRegistry)
//! and carry their field values directly; reference fields hold the UID of
//! the linked record. [`Catalog::search`] implements the query folder's
//! search: type and field filters, an optional inclusive date range on the
//! query's date index, sorting and a result limit.

pub mod fixture;
mod query;

pub use fixture::{load_catalog, CatalogFixture, FixtureError};
pub use query::{CatalogQuery, SortOrder};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::schema::SchemaRegistry;
use crate::value::{Uid, Value};

/// A content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub uid: Uid,
    pub content_type: String,
    /// Containment parent, if any.
    #[serde(default)]
    pub parent: Option<Uid>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Record {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            uid: Uid::new_v4(),
            content_type: content_type.into(),
            parent: None,
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: Uid) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Field value, `Null` when absent.
    pub fn get(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or(Value::Null)
    }
}

/// The catalog: records in insertion order plus a UID index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schemas: SchemaRegistry,
    records: Vec<Record>,
    by_uid: HashMap<Uid, usize>,
}

impl Catalog {
    pub fn new(schemas: SchemaRegistry) -> Self {
        Self {
            schemas,
            records: Vec::new(),
            by_uid: HashMap::new(),
        }
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert a record, replacing any record with the same UID.
    pub fn insert(&mut self, record: Record) -> Uid {
        let uid = record.uid;
        match self.by_uid.get(&uid) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.by_uid.insert(uid, self.records.len());
                self.records.push(record);
            }
        }
        uid
    }

    pub fn get(&self, uid: Uid) -> Option<&Record> {
        self.by_uid.get(&uid).map(|&pos| &self.records[pos])
    }

    /// The containment parent of a record.
    pub fn parent_of(&self, record: &Record) -> Option<&Record> {
        record.parent.and_then(|uid| self.get(uid))
    }

    /// Follow a reference value to its record.
    pub fn deref(&self, value: &Value) -> Option<&Record> {
        value.as_ref_uid().and_then(|uid| self.get(uid))
    }

    /// Run a catalog query.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Record> {
        let mut hits: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| self.matches(r, query))
            .collect();

        if let Some(sort_on) = &query.sort_on {
            hits.sort_by(|a, b| {
                let ord = a.get(sort_on).sort_cmp(&b.get(sort_on));
                match query.sort_order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
        }

        if query.limit > 0 {
            hits.truncate(query.limit);
        }
        hits
    }

    fn matches(&self, record: &Record, query: &CatalogQuery) -> bool {
        if let Some(content_type) = &query.content_type {
            if &record.content_type != content_type {
                return false;
            }
        }

        for (field, expected) in &query.filters {
            let actual = record.get(field);
            let hit = match expected {
                // a list filter matches any member
                Value::List(options) => options.iter().any(|opt| actual.filter_eq(opt)),
                other => actual.filter_eq(other),
            };
            if !hit {
                return false;
            }
        }

        if let Some(date_index) = &query.date_index {
            if query.date_from.is_some() || query.date_to.is_some() {
                let date = match record.get(date_index) {
                    Value::Date(d) => Some(d),
                    Value::DateTime(dt) => Some(dt.date()),
                    _ => None,
                };
                let Some(date) = date else {
                    return false;
                };
                if let Some(from) = query.date_from {
                    if date < from {
                        return false;
                    }
                }
                if let Some(to) = query.date_to {
                    if date > to {
                        return false;
                    }
                }
            }
        }

        true
    }
}
