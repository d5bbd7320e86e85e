//! Declarative descriptors for every shipped binding file revision.
//!
//! Revisions are identified by their position in [`REVISIONS`]. Existing
//! entries are frozen: files on users' disks are recognised by shape alone,
//! so a new format is always appended at the end.

/// How a revision encodes the actions bound to one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Exactly one bare tag string per button.
    SingleTag {
        /// Accepted tags.
        tags: &'static [&'static str],
    },
    /// A list of `{ Simple = tag }` or `{ UpDown = tag | { variant = payload } }`.
    Grouped(GroupedEncoding),
    /// A list of bare tags or `{ variant = payload }` tables.
    Tagged(TaggedEncoding),
}

/// Vocabulary of the grouped list encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedEncoding {
    /// Tags accepted under `Simple`.
    pub simple: &'static [&'static str],
    /// Bare tags accepted under `UpDown`.
    pub up_down: &'static [&'static str],
    /// Payload variants accepted under `UpDown`.
    pub payloads: &'static [&'static str],
    /// Accepted click targets.
    pub mouse_buttons: &'static [&'static str],
    /// Accepted key press modifiers.
    pub modifiers: &'static [&'static str],
}

/// Vocabulary of the self-describing list encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedEncoding {
    /// Accepted bare tags.
    pub tags: &'static [&'static str],
    /// Accepted payload variants.
    pub payloads: &'static [&'static str],
    /// Accepted click targets.
    pub mouse_buttons: &'static [&'static str],
    /// Accepted key press modifiers.
    pub modifiers: &'static [&'static str],
}

/// A numeric speed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedField {
    /// Top-level key.
    pub name: &'static str,
    /// Whether negative values are rejected.
    pub non_negative: bool,
}

/// Shape of one historical binding file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    /// Position in the revision chain; 0 is the oldest.
    pub index: usize,
    /// Short human-readable name.
    pub name: &'static str,
    /// Dotted key paths that must all be present for a document to match.
    pub signature: &'static [&'static str],
    /// Top-level table holding the per-button bindings.
    pub bindings_key: &'static str,
    /// Accepted button keys (case-sensitive).
    pub buttons: &'static [&'static str],
    /// Action encoding.
    pub encoding: Encoding,
    /// Required numeric fields.
    pub speed_fields: &'static [SpeedField],
}

impl Revision {
    /// Whether this is the revision the executor consumes.
    pub fn is_current(&self) -> bool {
        self.index == CURRENT
    }

    /// Whether `key` is a button spelling in this revision.
    pub fn accepts_button(&self, key: &str) -> bool {
        self.buttons.contains(&key)
    }

    /// Look up a speed field descriptor by name.
    pub fn speed_field(&self, name: &str) -> Option<&SpeedField> {
        self.speed_fields.iter().find(|f| f.name == name)
    }
}

/// Required non-negative field.
const fn absolute(name: &'static str) -> SpeedField {
    SpeedField {
        name,
        non_negative: true,
    }
}

/// Required field that may be any finite number.
const fn relative(name: &'static str) -> SpeedField {
    SpeedField {
        name,
        non_negative: false,
    }
}

/// Short lowercase names of the oldest revision.
const LOWER_BUTTONS: &[&str] = &[
    "north", "east", "south", "west", "up", "down", "left", "right", "lb", "rb", "lt", "rt", "ls",
    "rs", "start", "select",
];

/// Controller-library naming: `*Trigger` are shoulders, `*Trigger2` analog triggers.
const GILRS_BUTTONS: &[&str] = &[
    "North",
    "East",
    "South",
    "West",
    "DPadUp",
    "DPadRight",
    "DPadDown",
    "DPadLeft",
    "LeftTrigger",
    "RightTrigger",
    "LeftTrigger2",
    "RightTrigger2",
    "LeftThumb",
    "RightThumb",
    "Start",
    "Select",
];

/// Canonical button names, bumpers and triggers distinct.
const NAMED_BUTTONS: &[&str] = &[
    "North",
    "East",
    "South",
    "West",
    "DPadUp",
    "DPadRight",
    "DPadDown",
    "DPadLeft",
    "LeftBumper",
    "RightBumper",
    "LeftTrigger",
    "RightTrigger",
    "LeftThumb",
    "RightThumb",
    "Start",
    "Select",
];

/// Number of shipped revisions.
pub const REVISION_COUNT: usize = 4;

/// Every revision, oldest first.
pub static REVISIONS: [Revision; REVISION_COUNT] = [
    Revision {
        index: 0,
        name: "tags",
        signature: &["buttons"],
        bindings_key: "buttons",
        buttons: LOWER_BUTTONS,
        encoding: Encoding::SingleTag {
            tags: &[
                "lClick",
                "rClick",
                "mClick",
                "speedUp",
                "speedDown",
                "speedInc",
                "speedDec",
                "none",
            ],
        },
        speed_fields: &[
            absolute("speed"),
            absolute("speed_up"),
            absolute("speed_down"),
            relative("speed_inc"),
        ],
    },
    Revision {
        index: 1,
        name: "pascal",
        signature: &["actions", "speed_inc"],
        bindings_key: "actions",
        buttons: GILRS_BUTTONS,
        encoding: Encoding::SingleTag {
            tags: &[
                "LClick",
                "RClick",
                "SpeedUp",
                "SpeedDown",
                "SpeedInc",
                "SpeedDec",
            ],
        },
        speed_fields: &[
            absolute("speed"),
            absolute("speed_up"),
            absolute("speed_down"),
            relative("speed_inc"),
            relative("speed_dec"),
        ],
    },
    Revision {
        index: 2,
        name: "grouped",
        signature: &["actions", "speed_step"],
        bindings_key: "actions",
        buttons: NAMED_BUTTONS,
        encoding: Encoding::Grouped(GroupedEncoding {
            simple: &["SpeedInc", "SpeedDec", "Rumble", "ToggleVis"],
            up_down: &["SpeedUp", "SpeedDown"],
            payloads: &["Click", "KeyPress", "LuaScript"],
            mouse_buttons: &["Left", "Right", "Middle"],
            modifiers: &["Alt", "Ctrl", "Win", "Shift"],
        }),
        speed_fields: &[
            absolute("speed"),
            absolute("speed_up"),
            absolute("speed_down"),
            relative("speed_step"),
        ],
    },
    Revision {
        index: 3,
        name: "canonical",
        signature: &["bindings"],
        bindings_key: "bindings",
        buttons: NAMED_BUTTONS,
        encoding: Encoding::Tagged(TaggedEncoding {
            tags: &[
                "None",
                "SpeedUp",
                "SpeedDown",
                "SpeedInc",
                "SpeedDec",
                "Rumble",
                "ToggleVis",
            ],
            payloads: &["Click", "KeyPress"],
            mouse_buttons: &["Left", "Middle", "Right"],
            modifiers: &["Shift", "Ctrl", "Alt", "Meta"],
        }),
        speed_fields: &[
            absolute("speed"),
            absolute("speed_up"),
            absolute("speed_down"),
            relative("speed_step"),
        ],
    },
];

/// Index of the current revision.
pub const CURRENT: usize = REVISION_COUNT - 1;

/// Look up a revision by index.
pub fn revision(index: usize) -> Option<&'static Revision> {
    REVISIONS.get(index)
}

/// The revision the executor consumes.
pub fn current() -> &'static Revision {
    &REVISIONS[CURRENT]
}
