//! Physical controls that can carry bindings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical gamepad control.
///
/// The set is fixed: every revision of the binding file describes these same
/// sixteen controls, only the spelling of their keys changed over time. The
/// variant names are the spellings used by the current revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Top face button.
    North,
    /// Right face button.
    East,
    /// Bottom face button.
    South,
    /// Left face button.
    West,
    /// D-pad up.
    DPadUp,
    /// D-pad right.
    DPadRight,
    /// D-pad down.
    DPadDown,
    /// D-pad left.
    DPadLeft,
    /// Left shoulder button.
    LeftBumper,
    /// Right shoulder button.
    RightBumper,
    /// Left analog trigger.
    LeftTrigger,
    /// Right analog trigger.
    RightTrigger,
    /// Left stick click.
    LeftThumb,
    /// Right stick click.
    RightThumb,
    /// Start / menu button.
    Start,
    /// Select / view button.
    Select,
}

impl Button {
    /// Number of canonical buttons.
    pub const COUNT: usize = 16;

    /// Every button, in canonical order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::DPadUp,
        Self::DPadRight,
        Self::DPadDown,
        Self::DPadLeft,
        Self::LeftBumper,
        Self::RightBumper,
        Self::LeftTrigger,
        Self::RightTrigger,
        Self::LeftThumb,
        Self::RightThumb,
        Self::Start,
        Self::Select,
    ];

    /// Key spelling used by the current revision.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
            Self::DPadUp => "DPadUp",
            Self::DPadRight => "DPadRight",
            Self::DPadDown => "DPadDown",
            Self::DPadLeft => "DPadLeft",
            Self::LeftBumper => "LeftBumper",
            Self::RightBumper => "RightBumper",
            Self::LeftTrigger => "LeftTrigger",
            Self::RightTrigger => "RightTrigger",
            Self::LeftThumb => "LeftThumb",
            Self::RightThumb => "RightThumb",
            Self::Start => "Start",
            Self::Select => "Select",
        }
    }

    /// Parse a current-revision key. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Position of this button in [`Button::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_and_index_matches_order() {
        for (i, b) in Button::ALL.into_iter().enumerate() {
            assert_eq!(Button::from_name(b.name()), Some(b));
            assert_eq!(b.index(), i);
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(Button::from_name("south"), None);
        assert_eq!(Button::from_name("Triangle"), None);
    }
}
