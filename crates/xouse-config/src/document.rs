//! Helpers over the generic parsed document tree.

use toml::{Table, Value};

/// A parsed but uninterpreted binding file.
pub type Document = Table;

/// Whether every segment of the dotted `path` resolves to a key in `doc`.
pub(crate) fn has_path(doc: &Document, path: &str) -> bool {
    let mut table = doc;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        let Some(value) = table.get(part) else {
            return false;
        };
        if parts.peek().is_none() {
            return true;
        }
        match value {
            Value::Table(inner) => table = inner,
            _ => return false,
        }
    }
    false
}

/// Short type name used in violation messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

/// Read a numeric value, accepting TOML integers as well as floats.
///
/// Integers of magnitude above 2^53 round to the nearest `f64`.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Split a single-key table into its key and value.
pub(crate) fn single_entry(table: &Table) -> Option<(&str, &Value)> {
    let mut iter = table.iter();
    match (iter.next(), iter.next()) {
        (Some((k, v)), None) => Some((k.as_str(), v)),
        _ => None,
    }
}
