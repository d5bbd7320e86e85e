//! Revision 1 to revision 2.

use toml::{Table, Value};
use tracing::debug;

use super::{
    Advisory, AdvisoryKind, Migrated, MigrationError, MigrationErrorKind, rename, tagged,
};
use crate::{
    FieldPath,
    validate::{PascalAction, PascalDoc},
};

/// Controller-library names to named shoulders and triggers.
///
/// `LeftTrigger` appears on both sides with different meanings: the
/// shoulder button is relabeled a bumper and the analog trigger takes over
/// the plain name.
pub(crate) const BUTTONS: [(&str, &str); 16] = [
    ("North", "North"),
    ("East", "East"),
    ("South", "South"),
    ("West", "West"),
    ("DPadUp", "DPadUp"),
    ("DPadRight", "DPadRight"),
    ("DPadDown", "DPadDown"),
    ("DPadLeft", "DPadLeft"),
    ("LeftTrigger", "LeftBumper"),
    ("RightTrigger", "RightBumper"),
    ("LeftTrigger2", "LeftTrigger"),
    ("RightTrigger2", "RightTrigger"),
    ("LeftThumb", "LeftThumb"),
    ("RightThumb", "RightThumb"),
    ("Start", "Start"),
    ("Select", "Select"),
];

/// One revision 1 tag as a revision 2 grouped entry.
fn entry(action: PascalAction) -> Value {
    let s = |v: &str| Value::String(v.to_string());
    match action {
        PascalAction::LClick => tagged("UpDown", tagged("Click", s("Left"))),
        PascalAction::RClick => tagged("UpDown", tagged("Click", s("Right"))),
        PascalAction::SpeedUp => tagged("UpDown", s("SpeedUp")),
        PascalAction::SpeedDown => tagged("UpDown", s("SpeedDown")),
        PascalAction::SpeedInc => tagged("Simple", s("SpeedInc")),
        PascalAction::SpeedDec => tagged("Simple", s("SpeedDec")),
    }
}

/// Relabel shoulders and triggers, wrap tags in lists, merge the speed steps.
pub fn migrate(doc: &PascalDoc) -> Result<Migrated, Vec<MigrationError>> {
    let mut failures = Vec::new();
    let mut actions = Table::new();
    for (key, action) in &doc.actions {
        // Only reachable through a hand-built document.
        match rename(&BUTTONS, key) {
            Some(button) => {
                actions.insert(button.to_string(), Value::Array(vec![entry(*action)]));
            }
            None => failures.push(MigrationError {
                from: 1,
                path: FieldPath::top("actions").key(key),
                kind: MigrationErrorKind::UnknownButton { key: key.clone() },
            }),
        }
    }
    if !failures.is_empty() {
        return Err(failures);
    }

    let mut advisories = Vec::new();
    if doc.speed_inc != doc.speed_dec {
        debug!(
            inc = doc.speed_inc,
            dec = doc.speed_dec,
            "merging asymmetric speed steps"
        );
        advisories.push(Advisory {
            revision: 1,
            path: FieldPath::top("speed_dec"),
            kind: AdvisoryKind::AsymmetricSpeedStep {
                inc: doc.speed_inc,
                dec: doc.speed_dec,
            },
        });
    }

    let mut document = Table::new();
    document.insert("speed".into(), Value::Float(doc.speed));
    document.insert("speed_up".into(), Value::Float(doc.speed_up));
    document.insert("speed_down".into(), Value::Float(doc.speed_down));
    document.insert("speed_step".into(), Value::Float(doc.speed_inc));
    document.insert("actions".into(), Value::Table(actions));
    Ok(Migrated {
        document,
        advisories,
    })
}
