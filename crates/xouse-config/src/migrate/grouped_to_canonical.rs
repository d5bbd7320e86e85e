//! Revision 2 to the current revision.

use toml::{Table, Value};

use super::{Migrated, MigrationError, MigrationErrorKind, tagged};
use crate::{
    Button, FieldPath,
    validate::{GroupedAction, GroupedDoc, LegacyModifier, UpDownAction},
};

/// Canonical spelling of a legacy modifier.
fn modifier(m: LegacyModifier) -> &'static str {
    match m {
        LegacyModifier::Alt => "Alt",
        LegacyModifier::Ctrl => "Ctrl",
        LegacyModifier::Win => "Meta",
        LegacyModifier::Shift => "Shift",
    }
}

/// One grouped entry as a canonical action value, `None` when it has no equivalent.
///
/// Every grouped entry maps to exactly one action, so nothing is pruned here.
fn entry(action: &GroupedAction) -> Option<Value> {
    match action {
        GroupedAction::Simple(s) => Some(Value::String(s.tag().to_string())),
        GroupedAction::UpDown(UpDownAction::SpeedUp) => Some(Value::String("SpeedUp".into())),
        GroupedAction::UpDown(UpDownAction::SpeedDown) => Some(Value::String("SpeedDown".into())),
        GroupedAction::UpDown(UpDownAction::Click(b)) => {
            Some(tagged("Click", Value::String(b.name().to_string())))
        }
        GroupedAction::UpDown(UpDownAction::KeyPress { key, modifiers }) => {
            let mut t = Table::new();
            t.insert("key".into(), Value::String(key.clone()));
            t.insert(
                "modifiers".into(),
                Value::Array(
                    modifiers
                        .iter()
                        .map(|m| Value::String(modifier(*m).to_string()))
                        .collect(),
                ),
            );
            Some(tagged("KeyPress", Value::Table(t)))
        }
        GroupedAction::UpDown(UpDownAction::LuaScript { .. }) => None,
    }
}

/// Rename the bindings table and flatten the press-behaviour groups.
pub fn migrate(doc: &GroupedDoc) -> Result<Migrated, Vec<MigrationError>> {
    let mut failures = Vec::new();
    let mut bindings = Table::new();
    for (key, actions) in &doc.actions {
        let path = FieldPath::top("actions").key(key);
        // Validated documents only hold revision 2 buttons, all of which still
        // exist; a hand-built `GroupedDoc` may not.
        let Some(button) = Button::from_name(key) else {
            failures.push(MigrationError {
                from: 2,
                path,
                kind: MigrationErrorKind::UnknownButton { key: key.clone() },
            });
            continue;
        };
        let mut list = Vec::with_capacity(actions.len());
        for (i, action) in actions.iter().enumerate() {
            match entry(action) {
                Some(v) => list.push(v),
                None => failures.push(MigrationError {
                    from: 2,
                    path: path.index(i),
                    kind: MigrationErrorKind::UnmappableAction {
                        action: action.tag().to_string(),
                    },
                }),
            }
        }
        bindings.insert(button.name().to_string(), Value::Array(list));
    }
    if !failures.is_empty() {
        return Err(failures);
    }

    let mut document = Table::new();
    document.insert("speed".into(), Value::Float(doc.speed));
    document.insert("speed_up".into(), Value::Float(doc.speed_up));
    document.insert("speed_down".into(), Value::Float(doc.speed_down));
    document.insert("speed_step".into(), Value::Float(doc.speed_step));
    document.insert("bindings".into(), Value::Table(bindings));
    Ok(Migrated {
        document,
        advisories: Vec::new(),
    })
}
