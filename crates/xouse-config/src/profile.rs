//! The canonical compile output handed to the executor.

use std::ops::Index;

use crate::{Action, Button, defaults};

/// Cursor speed settings in their canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedConfig {
    /// Base cursor speed.
    pub speed: f64,
    /// Multiplier applied while `SpeedUp` is held.
    pub speed_up: f64,
    /// Divisor applied while `SpeedDown` is held.
    pub speed_down: f64,
    /// Amount `SpeedInc`/`SpeedDec` add to or remove from the base speed.
    pub speed_step: f64,
}

impl SpeedConfig {
    /// Field names in emission order.
    pub const FIELDS: [&'static str; 4] = ["speed", "speed_up", "speed_down", "speed_step"];

    /// `(name, value)` pairs in emission order.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("speed", self.speed),
            ("speed_up", self.speed_up),
            ("speed_down", self.speed_down),
            ("speed_step", self.speed_step),
        ]
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        defaults::default_speed()
    }
}

/// Ordered action sequence for every canonical button.
///
/// There is exactly one slot per [`Button`]; an unbound button holds an empty
/// sequence. Actions keep their source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BindingTable {
    /// Slots indexed by [`Button::index`].
    slots: [Vec<Action>; Button::COUNT],
}

impl BindingTable {
    /// Actions bound to `button`, empty when unbound.
    pub fn get(&self, button: Button) -> &[Action] {
        &self.slots[button.index()]
    }

    /// All slots in canonical button order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Button, &[Action])> {
        Button::ALL
            .into_iter()
            .map(move |b| (b, self.slots[b.index()].as_slice()))
    }

    /// Only the buttons that carry at least one action.
    pub fn bound(&self) -> impl Iterator<Item = (Button, &[Action])> {
        self.iter().filter(|(_, actions)| !actions.is_empty())
    }

    /// Total number of actions across all buttons.
    pub fn action_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// Append `actions` to the slot for `button`.
    pub(crate) fn extend(&mut self, button: Button, actions: impl IntoIterator<Item = Action>) {
        self.slots[button.index()].extend(actions);
    }
}

impl Index<Button> for BindingTable {
    type Output = [Action];

    fn index(&self, button: Button) -> &Self::Output {
        self.get(button)
    }
}

impl FromIterator<(Button, Vec<Action>)> for BindingTable {
    fn from_iter<I: IntoIterator<Item = (Button, Vec<Action>)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (button, actions) in iter {
            table.extend(button, actions);
        }
        table
    }
}

/// A compiled binding file: the binding table plus speed settings.
///
/// Produced once per successful compile and owned by the caller. Editing a
/// binding means compiling a new document, never patching a profile.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    /// Cursor speed settings.
    pub speed: SpeedConfig,
    /// Per-button action sequences.
    pub bindings: BindingTable,
}

impl Profile {
    /// The out-of-box profile. Never substituted automatically on failure.
    pub fn builtin() -> Self {
        defaults::default_profile()
    }
}
