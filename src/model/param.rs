//! Named parameters of a query folder.

use serde::{Deserialize, Serialize};

/// The type tag of a parameter.
///
/// Every kind except `Expression` is a literal: its raw value is coerced
/// directly. Expression parameters hold a small expression evaluated in
/// the sandbox, and may reference other parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[default]
    Str,
    Int,
    Float,
    Bool,
    Date,
    Expression,
}

impl ParamKind {
    pub fn is_expression(&self) -> bool {
        matches!(self, ParamKind::Expression)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Str => "str",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Date => "date",
            ParamKind::Expression => "expression",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named parameter: name, type tag and raw value or expression source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    pub value: String,
}

impl Parameter {
    /// A literal parameter.
    pub fn literal(name: impl Into<String>, kind: ParamKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }

    /// An expression parameter.
    pub fn expression(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Expression,
            value: source.into(),
        }
    }

    /// The empty trailing row the parameter grid auto-appends.
    pub fn empty() -> Self {
        Self::default()
    }
}
