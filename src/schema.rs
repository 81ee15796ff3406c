//! Content-type schemas.
//!
//! The registry stands in for the host platform's type machinery: each
//! content type declares an ordered list of typed fields, and reference
//! fields name the content types they may link to. The reference-column
//! controls walk these schemas without touching any records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field key every reference chain defaults to.
pub const DEFAULT_REF: &str = "title";

/// The kind of a schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Int,
    Float,
    Bool,
    Date,
    DateTime,
    List,
    /// A link to records of the listed content types.
    Reference { allowed_types: Vec<String> },
}

/// A single field of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub title: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            title: None,
        }
    }

    /// Is this a reference field?
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, FieldKind::Reference { .. })
    }

    /// The first allowed target type of a reference field.
    pub fn ref_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Reference { allowed_types } => {
                allowed_types.first().map(String::as_str)
            }
            _ => None,
        }
    }
}

/// A content type with its ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Registry of content types, by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeInfo>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, info: TypeInfo) {
        self.types.insert(info.name.clone(), info);
    }

    pub fn get(&self, content_type: &str) -> Option<&TypeInfo> {
        self.types.get(content_type)
    }

    /// Ordered field specs of a content type.
    pub fn fields(&self, content_type: &str) -> &[FieldSpec] {
        self.types
            .get(content_type)
            .map(|t| t.fields.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a single field of a content type.
    pub fn field(&self, content_type: &str, name: &str) -> Option<&FieldSpec> {
        self.types.get(content_type).and_then(|t| t.field(name))
    }

    /// Sorted field names of a content type.
    pub fn field_names(&self, content_type: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .fields(content_type)
            .iter()
            .map(|f| f.name.clone())
            .collect();
        names.sort();
        names
    }
}
