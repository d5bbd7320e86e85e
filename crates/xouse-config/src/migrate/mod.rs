//! One pure step per adjacent revision pair.
//!
//! A step consumes a validated revision `N` document and produces a raw
//! revision `N + 1` document. The output is not trusted: the compiler always
//! validates it before taking the next step.

mod grouped_to_canonical;
mod pascal_to_grouped;
mod tags_to_pascal;

use thiserror::Error;
use toml::{Table, Value};

pub use grouped_to_canonical::migrate as grouped_to_canonical;
pub use pascal_to_grouped::migrate as pascal_to_grouped;
pub use tags_to_pascal::migrate as tags_to_pascal;

use crate::{Document, FieldPath};

/// Why a step could not carry a value forward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationErrorKind {
    /// The action has no equivalent in the next revision.
    #[error("action '{action}' has no equivalent in the next revision")]
    UnmappableAction {
        /// Action as written in the source revision.
        action: String,
    },
    /// The button key has no rename rule.
    #[error("button '{key}' has no rename rule")]
    UnknownButton {
        /// Key as written in the source revision.
        key: String,
    },
}

impl MigrationErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnmappableAction { .. } => "unmappable_action",
            Self::UnknownButton { .. } => "unknown_button",
        }
    }
}

/// A value a migration step has no rule for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct MigrationError {
    /// Revision the offending document was in.
    pub from: usize,
    /// Location in the source document.
    pub path: FieldPath,
    /// What could not be migrated.
    pub kind: MigrationErrorKind,
}

/// A non-fatal observation made while migrating.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AdvisoryKind {
    /// Separate increase and decrease steps were merged into one.
    #[error("speed_inc ({inc}) and speed_dec ({dec}) differ; speed_step takes speed_inc")]
    AsymmetricSpeedStep {
        /// Increase step kept as `speed_step`.
        inc: f64,
        /// Decrease step that was discarded.
        dec: f64,
    },
}

impl AdvisoryKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AsymmetricSpeedStep { .. } => "asymmetric_speed_step",
        }
    }
}

/// An advisory with its location.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {kind}")]
pub struct Advisory {
    /// Revision of the document the advisory refers to.
    pub revision: usize,
    /// Location in that document.
    pub path: FieldPath,
    /// What was observed.
    pub kind: AdvisoryKind,
}

/// Output of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated {
    /// Raw document in the next revision.
    pub document: Document,
    /// Advisories raised by the step.
    pub advisories: Vec<Advisory>,
}

/// Outcome of translating one value across a revision boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mapped<T> {
    /// Carried forward as the given value.
    To(T),
    /// Dropped with no change in meaning.
    Pruned,
    /// No equivalent exists.
    Unmappable,
}

/// Look up `key` in a fixed rename table.
pub(crate) fn rename(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

/// Single-key table `{ key = value }`.
pub(crate) fn tagged(key: &str, value: Value) -> Value {
    let mut t = Table::new();
    t.insert(key.to_string(), value);
    Value::Table(t)
}
