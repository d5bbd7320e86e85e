// Defaults for the canonical profile

use crate::{Action, BindingTable, Button, MouseButton, Profile, SpeedConfig};

/// Base pointer speed.
pub(crate) const SPEED: f64 = 70.0;
/// Multiplier while boosting.
pub(crate) const SPEED_UP: f64 = 3.0;
/// Divisor while slowing.
pub(crate) const SPEED_DOWN: f64 = 3.0;
/// Base speed change per step.
pub(crate) const SPEED_STEP: f64 = 5.0;

/// Out-of-box speed settings.
pub(crate) const fn default_speed() -> SpeedConfig {
    SpeedConfig {
        speed: SPEED,
        speed_up: SPEED_UP,
        speed_down: SPEED_DOWN,
        speed_step: SPEED_STEP,
    }
}

/// Build a key press from static parts known to be valid.
fn key(key: &str, modifiers: &[crate::Modifier]) -> Action {
    Action::KeyPress {
        key: key.to_string(),
        modifiers: modifiers.iter().copied().collect(),
    }
}

/// Out-of-box button bindings.
pub(crate) fn default_bindings() -> BindingTable {
    use crate::Modifier::{Ctrl, Shift};
    [
        (Button::South, vec![Action::Click(MouseButton::Left)]),
        (Button::East, vec![Action::Click(MouseButton::Right)]),
        (Button::North, vec![key("Space", &[])]),
        (Button::DPadUp, vec![Action::SpeedInc, Action::Rumble]),
        (Button::DPadDown, vec![Action::SpeedDec, Action::Rumble]),
        (
            Button::RightBumper,
            vec![key("Tab", &[Ctrl]), Action::Rumble],
        ),
        (
            Button::LeftBumper,
            vec![key("Tab", &[Ctrl, Shift]), Action::Rumble],
        ),
        (Button::RightTrigger, vec![Action::SpeedUp]),
        (Button::LeftTrigger, vec![Action::SpeedDown]),
        (Button::Select, vec![Action::ToggleVis]),
    ]
    .into_iter()
    .collect()
}

/// Speed and bindings together.
pub(crate) fn default_profile() -> Profile {
    Profile {
        speed: default_speed(),
        bindings: default_bindings(),
    }
}
