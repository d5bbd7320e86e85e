//! Render a [`Profile`] back into a current-revision document.

use std::fmt::Display;

use toml::{Table, Value};

use crate::{Document, Error, Profile, schema};

/// Wrap a serializer failure.
fn emit_error(e: impl Display) -> Error {
    Error::Emit {
        message: e.to_string(),
    }
}

/// Build the current-revision document for `profile`.
///
/// Speed fields come first, then the bindings table with buttons in
/// canonical order. Unbound buttons are omitted.
pub fn to_document(profile: &Profile) -> Result<Document, Error> {
    let mut doc = Table::new();
    for (name, value) in profile.speed.fields() {
        doc.insert(name.to_string(), Value::Float(value));
    }
    let mut bindings = Table::new();
    for (button, actions) in profile.bindings.bound() {
        let list = actions
            .iter()
            .map(Value::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(emit_error)?;
        bindings.insert(button.name().to_string(), Value::Array(list));
    }
    let key = schema::current().bindings_key;
    doc.insert(key.to_string(), Value::Table(bindings));
    Ok(doc)
}

/// Render `profile` as TOML text.
pub fn to_toml_string(profile: &Profile) -> Result<String, Error> {
    toml::to_string(&to_document(profile)?).map_err(emit_error)
}
