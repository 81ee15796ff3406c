//! Scalar values flowing through the catalog, parameters and table cells.
//!
//! A single `Value` type covers catalog record fields, inflated parameter
//! values and computed cells. Evaluation failures are carried as data
//! (`Value::Error`) instead of aborting the listing.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a catalog record.
pub type Uid = Uuid;

/// A scalar value.
///
/// The untagged serde representation keeps definition and fixture files
/// plain: dates are ISO strings, references are UID strings. Variant order
/// matters for deserialization (dates and UIDs must be tried before `Str`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// A link to another catalog record.
    Ref(Uid),
    Str(String),
    List(Vec<Value>),
    /// A captured evaluation failure. Never produced by deserialization.
    Error(String),
}

impl Value {
    /// Create a string value.
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Create an integer value.
    pub fn int(value: i64) -> Self {
        Value::Int(value)
    }

    /// Create an error value.
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    /// Is this a `Null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Is this an `Error`?
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The linked record UID, if this is a reference.
    pub fn as_ref_uid(&self) -> Option<Uid> {
        match self {
            Value::Ref(uid) => Some(*uid),
            _ => None,
        }
    }

    /// Stringify for table cells and export.
    ///
    /// Strings pass through verbatim, dates render as ISO-8601 and lists
    /// join their members with `", "`.
    pub fn to_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Value::Ref(uid) => uid.to_string(),
            Value::Str(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_display)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Error(message) => message.clone(),
        }
    }

    /// Ordering used by catalog sort indexes.
    ///
    /// Values of different kinds compare by display string; `Null` sorts
    /// last so records missing the sort index end up at the bottom.
    pub fn sort_cmp(&self, other: &Value) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Int(a), Value::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (Value::Float(a), Value::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => self.to_display().cmp(&other.to_display()),
        }
    }

    /// Equality used by query filters.
    ///
    /// Integers and floats compare numerically; everything else compares
    /// by variant.
    pub fn filter_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (a, b) => a == b,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Uid> for Value {
    fn from(uid: Uid) -> Self {
        Value::Ref(uid)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display())
    }
}
