//! Bindable effects.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pointer button targeted by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    /// All pointer buttons.
    pub const ALL: [Self; 3] = [Self::Left, Self::Middle, Self::Right];

    /// Serialized spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Middle => "Middle",
            Self::Right => "Right",
        }
    }

    /// Parse a click target, rejecting anything outside `Left|Middle|Right`.
    pub fn from_name(name: &str) -> Result<Self, ActionError> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| ActionError::InvalidValue {
                variant: "Click",
                field: "button",
                value: name.to_string(),
            })
    }
}

/// Keyboard modifier held during a key press.
///
/// Ordering is the canonical emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Shift.
    Shift,
    /// Control.
    Ctrl,
    /// Alt / Option.
    Alt,
    /// Windows / Command / Super.
    Meta,
}

impl Modifier {
    /// All modifiers in canonical order.
    pub const ALL: [Self; 4] = [Self::Shift, Self::Ctrl, Self::Alt, Self::Meta];

    /// Serialized spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shift => "Shift",
            Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
            Self::Meta => "Meta",
        }
    }

    /// Parse a modifier, rejecting anything outside `Shift|Ctrl|Alt|Meta`.
    pub fn from_name(name: &str) -> Result<Self, ActionError> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| ActionError::InvalidValue {
                variant: "KeyPress",
                field: "modifiers",
                value: name.to_string(),
            })
    }
}

/// A single bindable effect.
///
/// The serde representation is the externally tagged shape used by the
/// current binding file revision: unit variants are bare strings and payload
/// variants are single-key tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Explicit no-op.
    None,
    /// Press and release a pointer button.
    Click(MouseButton),
    /// Press a key while holding a set of modifiers.
    KeyPress {
        /// Key name, passed through to the executor verbatim.
        key: String,
        /// Held modifiers. Duplicates collapse; order is not significant.
        #[serde(default)]
        modifiers: BTreeSet<Modifier>,
    },
    /// Multiply cursor speed by `speed_up` while held.
    SpeedUp,
    /// Divide cursor speed by `speed_down` while held.
    SpeedDown,
    /// Raise base speed by `speed_step`.
    SpeedInc,
    /// Lower base speed by `speed_step`.
    SpeedDec,
    /// Pulse controller haptics.
    Rumble,
    /// Toggle the overlay window.
    ToggleVis,
}

impl Action {
    /// Payload-free variants and their tags.
    pub const BARE: [(&'static str, Self); 7] = [
        ("None", Self::None),
        ("SpeedUp", Self::SpeedUp),
        ("SpeedDown", Self::SpeedDown),
        ("SpeedInc", Self::SpeedInc),
        ("SpeedDec", Self::SpeedDec),
        ("Rumble", Self::Rumble),
        ("ToggleVis", Self::ToggleVis),
    ];

    /// Tags of the variants that carry a payload.
    pub const PAYLOAD_TAGS: [&'static str; 2] = ["Click", "KeyPress"];

    /// Build a payload-free action from its tag.
    pub fn from_tag(tag: &str) -> Result<Self, ActionError> {
        if let Some((_, action)) = Self::BARE.iter().find(|(t, _)| *t == tag) {
            return Ok(action.clone());
        }
        match Self::PAYLOAD_TAGS.into_iter().find(|t| *t == tag) {
            Some(variant) => Err(ActionError::MissingPayload { variant }),
            None => Err(ActionError::UnknownTag {
                tag: tag.to_string(),
            }),
        }
    }

    /// Build a click on the named pointer button.
    pub fn click(target: &str) -> Result<Self, ActionError> {
        MouseButton::from_name(target).map(Self::Click)
    }

    /// Build a key press. Modifier duplicates collapse into one.
    pub fn key_press<'a, I>(key: &str, modifiers: I) -> Result<Self, ActionError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if key.is_empty() {
            return Err(ActionError::Empty {
                variant: "KeyPress",
                field: "key",
            });
        }
        let modifiers = modifiers
            .into_iter()
            .map(Modifier::from_name)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self::KeyPress {
            key: key.to_string(),
            modifiers,
        })
    }

    /// The variant tag as written in the current revision.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Click(_) => "Click",
            Self::KeyPress { .. } => "KeyPress",
            Self::SpeedUp => "SpeedUp",
            Self::SpeedDown => "SpeedDown",
            Self::SpeedInc => "SpeedInc",
            Self::SpeedDec => "SpeedDec",
            Self::Rumble => "Rumble",
            Self::ToggleVis => "ToggleVis",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click(b) => write!(f, "Click({})", b.name()),
            Self::KeyPress { key, modifiers } => {
                f.write_str("KeyPress(")?;
                for m in modifiers {
                    write!(f, "{}+", m.name())?;
                }
                write!(f, "{})", key)
            }
            other => f.write_str(other.tag()),
        }
    }
}

/// Failure to construct an [`Action`] from its serialized parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The tag names no action.
    #[error("unknown action '{tag}'")]
    UnknownTag {
        /// Offending tag.
        tag: String,
    },
    /// A payload variant was written as a bare tag.
    #[error("action '{variant}' requires a payload")]
    MissingPayload {
        /// Variant missing its payload.
        variant: &'static str,
    },
    /// A payload field holds a value outside its allowed set.
    #[error("{variant}.{field}: unknown value '{value}'")]
    InvalidValue {
        /// Variant being built.
        variant: &'static str,
        /// Offending field.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// A payload field has the wrong type.
    #[error("{variant}.{field}: expected {expected}")]
    WrongType {
        /// Variant being built.
        variant: &'static str,
        /// Offending field.
        field: &'static str,
        /// Expected type description.
        expected: &'static str,
    },
    /// A required payload field is absent.
    #[error("{variant}.{field} is required")]
    MissingField {
        /// Variant being built.
        variant: &'static str,
        /// Missing field.
        field: &'static str,
    },
    /// A payload field that must be non-empty is empty.
    #[error("{variant}.{field} must not be empty")]
    Empty {
        /// Variant being built.
        variant: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// A payload-free variant was written as a table.
    #[error("action '{variant}' takes no payload")]
    UnexpectedPayload {
        /// Variant given a payload.
        variant: &'static str,
    },
    /// A payload table carries a field the variant does not define.
    #[error("{variant}: unknown field '{field}'")]
    UnknownField {
        /// Variant being built.
        variant: &'static str,
        /// Unexpected field name.
        field: String,
    },
}
