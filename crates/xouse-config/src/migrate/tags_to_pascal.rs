//! Revision 0 to revision 1.

use toml::{Table, Value};

use super::{Mapped, Migrated, MigrationError, MigrationErrorKind, rename};
use crate::{
    FieldPath,
    validate::{TagAction, TagsDoc},
};

/// Lowercase short keys to controller-library names.
pub(crate) const BUTTONS: [(&str, &str); 16] = [
    ("north", "North"),
    ("east", "East"),
    ("south", "South"),
    ("west", "West"),
    ("up", "DPadUp"),
    ("down", "DPadDown"),
    ("left", "DPadLeft"),
    ("right", "DPadRight"),
    ("lb", "LeftTrigger"),
    ("rb", "RightTrigger"),
    ("lt", "LeftTrigger2"),
    ("rt", "RightTrigger2"),
    ("ls", "LeftThumb"),
    ("rs", "RightThumb"),
    ("start", "Start"),
    ("select", "Select"),
];

/// Revision 1 spelling of a revision 0 tag.
fn tag(action: TagAction) -> Mapped<&'static str> {
    match action {
        TagAction::LClick => Mapped::To("LClick"),
        TagAction::RClick => Mapped::To("RClick"),
        TagAction::SpeedUp => Mapped::To("SpeedUp"),
        TagAction::SpeedDown => Mapped::To("SpeedDown"),
        TagAction::SpeedInc => Mapped::To("SpeedInc"),
        TagAction::SpeedDec => Mapped::To("SpeedDec"),
        TagAction::None => Mapped::Pruned,
        TagAction::MClick => Mapped::Unmappable,
    }
}

/// Rename buttons and tags, prune `none`, and make `speed_dec` explicit.
pub fn migrate(doc: &TagsDoc) -> Result<Migrated, Vec<MigrationError>> {
    let mut failures = Vec::new();
    let mut actions = Table::new();
    for (key, action) in &doc.buttons {
        let path = FieldPath::top("buttons").key(key);
        // Only reachable through a hand-built document.
        let Some(button) = rename(&BUTTONS, key) else {
            failures.push(MigrationError {
                from: 0,
                path,
                kind: MigrationErrorKind::UnknownButton { key: key.clone() },
            });
            continue;
        };
        match tag(*action) {
            Mapped::To(t) => {
                actions.insert(button.to_string(), Value::String(t.to_string()));
            }
            Mapped::Pruned => {}
            Mapped::Unmappable => failures.push(MigrationError {
                from: 0,
                path,
                kind: MigrationErrorKind::UnmappableAction {
                    action: action.tag().to_string(),
                },
            }),
        }
    }
    if !failures.is_empty() {
        return Err(failures);
    }

    let mut document = Table::new();
    document.insert("speed".into(), Value::Float(doc.speed));
    document.insert("speed_up".into(), Value::Float(doc.speed_up));
    document.insert("speed_down".into(), Value::Float(doc.speed_down));
    document.insert("speed_inc".into(), Value::Float(doc.speed_inc));
    document.insert("speed_dec".into(), Value::Float(doc.speed_inc));
    document.insert("actions".into(), Value::Table(actions));
    Ok(Migrated {
        document,
        advisories: Vec::new(),
    })
}
