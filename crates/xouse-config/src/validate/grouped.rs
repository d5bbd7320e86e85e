//! Revision 2: action lists split into `Simple` and `UpDown` groups.

use toml::Value;

use super::{
    Checker, Violation, ViolationKind, action_list, bare_tag, click_target, key_press_parts, walk,
};
use crate::{
    ActionError, Document, FieldPath, MouseButton,
    document::single_entry,
    schema::{GroupedEncoding, Revision},
};

/// Fire-once actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleAction {
    /// Raise base speed.
    SpeedInc,
    /// Lower base speed.
    SpeedDec,
    /// Pulse haptics.
    Rumble,
    /// Toggle the overlay.
    ToggleVis,
}

impl SimpleAction {
    /// Spellings of every simple action.
    pub(crate) const TAGS: [(&'static str, Self); 4] = [
        ("SpeedInc", Self::SpeedInc),
        ("SpeedDec", Self::SpeedDec),
        ("Rumble", Self::Rumble),
        ("ToggleVis", Self::ToggleVis),
    ];

    /// Spelling as written.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SpeedInc => "SpeedInc",
            Self::SpeedDec => "SpeedDec",
            Self::Rumble => "Rumble",
            Self::ToggleVis => "ToggleVis",
        }
    }
}

/// Modifier spellings of revision 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyModifier {
    /// Alt.
    Alt,
    /// Control.
    Ctrl,
    /// The platform key, later renamed `Meta`.
    Win,
    /// Shift.
    Shift,
}

impl LegacyModifier {
    /// Spellings of every legacy modifier.
    pub(crate) const NAMES: [(&'static str, Self); 4] = [
        ("Alt", Self::Alt),
        ("Ctrl", Self::Ctrl),
        ("Win", Self::Win),
        ("Shift", Self::Shift),
    ];

    /// Look up a modifier by spelling.
    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| *m)
    }
}

/// Actions with press and release behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpDownAction {
    /// Pointer click.
    Click(MouseButton),
    /// Hold to speed up.
    SpeedUp,
    /// Hold to slow down.
    SpeedDown,
    /// Key press with modifiers, in source order.
    KeyPress {
        /// Key name.
        key: String,
        /// Modifiers as written.
        modifiers: Vec<LegacyModifier>,
    },
    /// Inline script. Has no counterpart in later revisions.
    LuaScript {
        /// Script source.
        script: String,
    },
}

impl UpDownAction {
    /// Press-and-release actions written as a bare string.
    pub(crate) const BARE: [(&'static str, Self); 2] =
        [("SpeedUp", Self::SpeedUp), ("SpeedDown", Self::SpeedDown)];

    /// Variant name as written.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Click(_) => "Click",
            Self::SpeedUp => "SpeedUp",
            Self::SpeedDown => "SpeedDown",
            Self::KeyPress { .. } => "KeyPress",
            Self::LuaScript { .. } => "LuaScript",
        }
    }
}

/// One entry of a revision 2 action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedAction {
    /// `{ Simple = ... }`
    Simple(SimpleAction),
    /// `{ UpDown = ... }`
    UpDown(UpDownAction),
}

impl GroupedAction {
    /// Variant name as written inside its group.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Simple(s) => s.tag(),
            Self::UpDown(u) => u.tag(),
        }
    }
}

/// A validated revision 2 document.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedDoc {
    /// `(button key, actions)` in document order.
    pub actions: Vec<(String, Vec<GroupedAction>)>,
    /// Base speed.
    pub speed: f64,
    /// Speed-up multiplier.
    pub speed_up: f64,
    /// Speed-down divisor.
    pub speed_down: f64,
    /// Step shared by `SpeedInc` and `SpeedDec`.
    pub speed_step: f64,
}

/// Validate a revision 2 document.
pub(super) fn validate(
    doc: &Document,
    revision: &Revision,
    encoding: &GroupedEncoding,
) -> Result<GroupedDoc, Vec<Violation>> {
    let walked = walk(doc, revision, |checker, path, value| {
        decode_list(checker, path, value, encoding)
    })?;
    let [speed, speed_up, speed_down, speed_step] =
        walked.speeds(["speed", "speed_up", "speed_down", "speed_step"])?;
    Ok(GroupedDoc {
        actions: walked.entries,
        speed,
        speed_up,
        speed_down,
        speed_step,
    })
}

/// Decode one button's entry list.
fn decode_list(
    checker: &mut Checker,
    path: &FieldPath,
    value: &Value,
    encoding: &GroupedEncoding,
) -> Option<Vec<GroupedAction>> {
    let items = action_list(checker, path, value)?;
    let before = checker.len();
    let actions: Vec<_> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| decode_action(checker, &path.index(i), item, encoding))
        .collect();
    (checker.len() == before).then_some(actions)
}

/// Decode a `{ Simple = .. }` or `{ UpDown = .. }` entry.
fn decode_action(
    checker: &mut Checker,
    path: &FieldPath,
    value: &Value,
    encoding: &GroupedEncoding,
) -> Option<GroupedAction> {
    let Some((group, inner)) = value.as_table().and_then(single_entry) else {
        checker.wrong_type(path.clone(), "single-key table", value);
        return None;
    };
    let inner_path = path.key(group);
    match group {
        "Simple" => {
            let tags = &SimpleAction::TAGS;
            let action = bare_tag(checker, &inner_path, inner, encoding.simple, tags)?;
            Some(GroupedAction::Simple(action))
        }
        "UpDown" => {
            let action = decode_up_down(checker, &inner_path, inner, encoding)?;
            Some(GroupedAction::UpDown(action))
        }
        other => {
            checker.push(
                path.clone(),
                ViolationKind::UnknownAction {
                    tag: other.to_string(),
                },
            );
            None
        }
    }
}

/// Decode the body of an `UpDown` entry.
fn decode_up_down(
    checker: &mut Checker,
    path: &FieldPath,
    value: &Value,
    encoding: &GroupedEncoding,
) -> Option<UpDownAction> {
    match value {
        Value::String(tag) => {
            if let Some(variant) = encoding.payloads.iter().find(|p| **p == tag.as_str()) {
                let err = ActionError::MissingPayload { variant: *variant };
                checker.action(path.clone(), err);
                return None;
            }
            bare_tag(checker, path, value, encoding.up_down, &UpDownAction::BARE)
        }
        Value::Table(table) => {
            let Some((variant, payload)) = single_entry(table) else {
                checker.wrong_type(path.clone(), "single-key table", value);
                return None;
            };
            let payload_path = path.key(variant);
            if let Some(tag) = encoding.up_down.iter().find(|t| **t == variant) {
                let err = ActionError::UnexpectedPayload { variant: *tag };
                checker.action(payload_path, err);
                return None;
            }
            if !encoding.payloads.contains(&variant) {
                checker.push(
                    payload_path,
                    ViolationKind::UnknownAction {
                        tag: variant.to_string(),
                    },
                );
                return None;
            }
            match variant {
                "Click" => click_target(checker, &payload_path, payload, encoding.mouse_buttons)
                    .and_then(|t| MouseButton::from_name(t).ok())
                    .map(UpDownAction::Click),
                "KeyPress" => {
                    let (key, modifiers) =
                        key_press_parts(checker, &payload_path, payload, encoding.modifiers, true)?;
                    Some(UpDownAction::KeyPress {
                        key: key.to_string(),
                        modifiers: modifiers
                            .into_iter()
                            .filter_map(LegacyModifier::from_name)
                            .collect(),
                    })
                }
                "LuaScript" => decode_script(checker, &payload_path, payload),
                other => {
                    checker.push(
                        payload_path,
                        ViolationKind::UnknownAction {
                            tag: other.to_string(),
                        },
                    );
                    None
                }
            }
        }
        other => {
            checker.wrong_type(path.clone(), "string or table", other);
            None
        }
    }
}

/// Decode a `LuaScript` payload.
fn decode_script(checker: &mut Checker, path: &FieldPath, value: &Value) -> Option<UpDownAction> {
    let Value::Table(table) = value else {
        checker.wrong_type(path.clone(), "table", value);
        return None;
    };
    let before = checker.len();
    let mut script = None;
    for (field, v) in table {
        match (field.as_str(), v) {
            ("script", Value::String(s)) => script = Some(s.clone()),
            ("script", _) => checker.action(
                path.key(field),
                ActionError::WrongType {
                    variant: "LuaScript",
                    field: "script",
                    expected: "string",
                },
            ),
            (name, _) => checker.action(
                path.key(field),
                ActionError::UnknownField {
                    variant: "LuaScript",
                    field: name.to_string(),
                },
            ),
        }
    }
    if !table.contains_key("script") {
        checker.action(
            path.clone(),
            ActionError::MissingField {
                variant: "LuaScript",
                field: "script",
            },
        );
    }
    match script {
        Some(script) if checker.len() == before => Some(UpDownAction::LuaScript { script }),
        _ => None,
    }
}
