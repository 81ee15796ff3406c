//! Value conversion.
//!
//! Two concerns live here: coercion of literal parameter values to their
//! typed [`Value`] (`convert_to`), and the registry of named display
//! converters a column can apply to its final cell value.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::catalog::Record;
use crate::model::ParamKind;
use crate::value::Value;

/// Coerce a literal parameter's raw string to its typed value.
///
/// A failed coercion becomes an error value naming the bad input, so a
/// mistyped literal shows up in the listing instead of aborting it.
pub fn convert_to(raw: &str, kind: ParamKind) -> Value {
    match kind {
        ParamKind::Str => Value::Str(raw.to_string()),
        ParamKind::Int => match raw.trim().parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => Value::error(format!("invalid int literal '{raw}'")),
        },
        ParamKind::Float => match raw.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => Value::error(format!("invalid float literal '{raw}'")),
        },
        ParamKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => Value::error(format!("invalid bool literal '{raw}'")),
        },
        ParamKind::Date => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(d) => Value::Date(d),
            Err(_) => Value::error(format!("invalid date literal '{raw}'")),
        },
        ParamKind::Expression => Value::error(format!(
            "expression parameter '{raw}' cannot be converted as a literal"
        )),
    }
}

/// A display converter: record, column key and value in, cell text out.
pub type ConverterFn = fn(&Record, &str, &Value) -> String;

struct Converter {
    description: &'static str,
    func: ConverterFn,
}

/// Registry of named display converters.
pub struct ConverterRegistry {
    converters: BTreeMap<String, Converter>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    /// The built-in converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("date", "Render a date as YYYY-MM-DD", date_converter);
        registry.register(
            "datetime",
            "Render a date with time as ISO-8601",
            datetime_converter,
        );
        registry.register("yes_no", "Render a boolean as Yes/No", yes_no_converter);
        registry.register("join", "Join list members with commas", join_converter);
        registry.register("round2", "Round a number to two decimals", round2_converter);
        registry
    }

    pub fn register(&mut self, name: &str, description: &'static str, func: ConverterFn) {
        self.converters
            .insert(name.to_string(), Converter { description, func });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    /// Apply a named converter; `None` when the name is not registered.
    pub fn apply(&self, name: &str, record: &Record, column: &str, value: &Value) -> Option<String> {
        self.converters
            .get(name)
            .map(|c| (c.func)(record, column, value))
    }

    /// All converter names with descriptions, preceded by the empty entry
    /// the column controls show for "no converter".
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = vec![(String::new(), String::new())];
        for (name, converter) in &self.converters {
            entries.push((name.clone(), converter.description.to_string()));
        }
        entries
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn date_converter(_record: &Record, _column: &str, value: &Value) -> String {
    match value {
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::DateTime(dt) => dt.date().format("%Y-%m-%d").to_string(),
        other => other.to_display(),
    }
}

fn datetime_converter(_record: &Record, _column: &str, value: &Value) -> String {
    match value {
        Value::Date(d) => d.format("%Y-%m-%dT00:00:00").to_string(),
        other => other.to_display(),
    }
}

fn yes_no_converter(_record: &Record, _column: &str, value: &Value) -> String {
    match value {
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Null => "No".to_string(),
        other => other.to_display(),
    }
}

fn join_converter(_record: &Record, _column: &str, value: &Value) -> String {
    match value {
        Value::List(items) => items
            .iter()
            .map(Value::to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_display(),
    }
}

fn round2_converter(_record: &Record, _column: &str, value: &Value) -> String {
    match value {
        Value::Float(f) => format!("{f:.2}"),
        Value::Int(i) => format!("{i}.00"),
        other => other.to_display(),
    }
}
