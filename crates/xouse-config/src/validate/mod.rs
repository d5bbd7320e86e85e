//! Shape validation against a single revision.
//!
//! Validation never stops at the first problem: every violation is collected
//! in document order so a user can fix a file in one pass.

mod canonical;
mod grouped;
mod pascal;
mod tags;

use std::{fmt, iter};

use thiserror::Error;
use toml::Value;
use tracing::debug;

pub use grouped::{GroupedAction, GroupedDoc, LegacyModifier, SimpleAction, UpDownAction};
pub use pascal::{PascalAction, PascalDoc};
pub use tags::{TagAction, TagsDoc};

use crate::{
    ActionError, Document, FieldPath, Profile,
    document::{as_number, type_name},
    schema::{self, Encoding, Revision},
};

/// What is wrong at a location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationKind {
    /// A bindings key that is not a button of this revision.
    #[error("unknown button '{key}'")]
    UnknownButton {
        /// Offending key as written.
        key: String,
    },
    /// An action tag this revision does not define.
    #[error("unknown action '{tag}'")]
    UnknownAction {
        /// Offending tag as written.
        tag: String,
    },
    /// An action whose payload does not parse.
    #[error("{0}")]
    MalformedAction(ActionError),
    /// A top-level key this revision does not define.
    #[error("unknown field '{key}'")]
    UnknownField {
        /// Offending key.
        key: String,
    },
    /// A required field is absent.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Missing field name.
        field: String,
    },
    /// A value has the wrong type.
    #[error("expected {expected}, found {found}")]
    WrongType {
        /// Expected type description.
        expected: &'static str,
        /// Type actually found.
        found: &'static str,
    },
    /// A numeric field is NaN or infinite.
    #[error("value {value} is not finite")]
    NotFinite {
        /// Offending value.
        value: f64,
    },
    /// A field that must be non-negative is negative.
    #[error("value {value} must not be negative")]
    Negative {
        /// Offending value.
        value: f64,
    },
    /// No validator decodes this revision's encoding.
    #[error("no revision with index {index}")]
    UnknownRevision {
        /// Requested index.
        index: usize,
    },
}

impl ViolationKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownButton { .. } => "unknown_button",
            Self::UnknownAction { .. } => "unknown_action",
            Self::MalformedAction(_) => "malformed_action",
            Self::UnknownField { .. } => "unknown_field",
            Self::MissingField { .. } => "missing_field",
            Self::WrongType { .. } => "wrong_type",
            Self::NotFinite { .. } => "not_finite",
            Self::Negative { .. } => "negative",
            Self::UnknownRevision { .. } => "unknown_revision",
        }
    }
}

/// One problem found while validating a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Location of the offending value.
    pub path: FieldPath,
    /// What is wrong with it.
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// A document that passed validation, typed by its revision.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    /// Revision 0.
    Tags(TagsDoc),
    /// Revision 1.
    Pascal(PascalDoc),
    /// Revision 2.
    Grouped(GroupedDoc),
    /// The current revision, already in canonical form.
    Canonical(Profile),
}

impl Validated {
    /// Index of the revision this document conforms to.
    pub fn revision(&self) -> usize {
        match self {
            Self::Tags(_) => 0,
            Self::Pascal(_) => 1,
            Self::Grouped(_) => 2,
            Self::Canonical(_) => schema::CURRENT,
        }
    }
}

/// Validate `doc` against `revision`, returning a typed document or every violation.
///
/// The accepted spellings come from `revision.encoding`. The two single-tag
/// revisions share an encoding but decode into different documents, so those
/// are told apart by index.
pub fn validate(doc: &Document, revision: &Revision) -> Result<Validated, Vec<Violation>> {
    let result = decode(doc, revision);
    match &result {
        Ok(_) => debug!(revision = revision.index, "validation passed"),
        Err(v) => debug!(
            revision = revision.index,
            violations = v.len(),
            "validation failed"
        ),
    }
    result
}

/// Pick the decoder for `revision.encoding` and run it.
fn decode(doc: &Document, revision: &Revision) -> Result<Validated, Vec<Violation>> {
    match (revision.encoding, revision.index) {
        (Encoding::SingleTag { tags: spellings }, 0) => {
            let typed = tags::validate(doc, revision, spellings)?;
            Ok(Validated::Tags(typed))
        }
        (Encoding::SingleTag { tags: spellings }, 1) => {
            let typed = pascal::validate(doc, revision, spellings)?;
            Ok(Validated::Pascal(typed))
        }
        (Encoding::Grouped(encoding), _) => {
            let typed = grouped::validate(doc, revision, &encoding)?;
            Ok(Validated::Grouped(typed))
        }
        (Encoding::Tagged(encoding), _) => {
            let profile = canonical::validate(doc, revision, &encoding)?;
            Ok(Validated::Canonical(profile))
        }
        (Encoding::SingleTag { .. }, index) => Err(vec![Violation {
            path: FieldPath::root(),
            kind: ViolationKind::UnknownRevision { index },
        }]),
    }
}

/// Violation accumulator shared by the per-revision decoders.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    /// Violations in the order they were found.
    violations: Vec<Violation>,
}

impl Checker {
    /// Record a violation.
    pub(crate) fn push(&mut self, path: FieldPath, kind: ViolationKind) {
        self.violations.push(Violation { path, kind });
    }

    /// Record a structural type mismatch.
    pub(crate) fn wrong_type(&mut self, path: FieldPath, expected: &'static str, found: &Value) {
        self.push(
            path,
            ViolationKind::WrongType {
                expected,
                found: type_name(found),
            },
        );
    }

    /// Record an action construction failure.
    pub(crate) fn action(&mut self, path: FieldPath, err: ActionError) {
        let kind = match err {
            ActionError::UnknownTag { tag } => ViolationKind::UnknownAction { tag },
            other => ViolationKind::MalformedAction(other),
        };
        self.push(path, kind);
    }

    /// Number of violations recorded so far.
    pub(crate) fn len(&self) -> usize {
        self.violations.len()
    }

    /// `Ok(value)` when nothing was recorded.
    fn finish<T>(self, value: T) -> Result<T, Vec<Violation>> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(self.violations)
        }
    }
}

/// Output of [`walk`]: decoded per-button entries and numeric fields.
#[derive(Debug)]
pub(crate) struct Walked<T> {
    /// `(button key, decoded entry)` in document order.
    pub(crate) entries: Vec<(String, T)>,
    /// Validated speed values.
    speeds: Vec<(&'static str, f64)>,
}

impl<T> Walked<T> {
    /// Fetch the named speed values in order.
    pub(crate) fn speeds<const N: usize>(
        &self,
        names: [&'static str; N],
    ) -> Result<[f64; N], Vec<Violation>> {
        let mut out = [0.0; N];
        let mut missing = Vec::new();
        for (slot, name) in out.iter_mut().zip(names) {
            match self.speeds.iter().find(|(n, _)| *n == name) {
                Some((_, v)) => *slot = *v,
                None => missing.push(Violation {
                    path: FieldPath::top(name),
                    kind: ViolationKind::MissingField {
                        field: name.to_string(),
                    },
                }),
            }
        }
        if missing.is_empty() {
            Ok(out)
        } else {
            Err(missing)
        }
    }
}

/// Walk the top level of `doc` in document order.
///
/// Speed fields and unknown keys are checked here; each entry of the bindings
/// table whose key is a button of `revision` is handed to `decode`.
pub(crate) fn walk<T>(
    doc: &Document,
    revision: &Revision,
    mut decode: impl FnMut(&mut Checker, &FieldPath, &Value) -> Option<T>,
) -> Result<Walked<T>, Vec<Violation>> {
    let mut checker = Checker::default();
    let mut entries = Vec::new();
    let mut speeds = Vec::new();

    for (key, value) in doc {
        let path = FieldPath::top(key);
        if key == revision.bindings_key {
            let Value::Table(table) = value else {
                checker.wrong_type(path, "table", value);
                continue;
            };
            for (button, entry) in table {
                let entry_path = path.key(button);
                if !revision.accepts_button(button) {
                    checker.push(
                        entry_path,
                        ViolationKind::UnknownButton {
                            key: button.clone(),
                        },
                    );
                    continue;
                }
                if let Some(decoded) = decode(&mut checker, &entry_path, entry) {
                    entries.push((button.clone(), decoded));
                }
            }
        } else if let Some(field) = revision.speed_field(key) {
            match as_number(value) {
                None => checker.wrong_type(path, "number", value),
                Some(v) if !v.is_finite() => {
                    checker.push(path, ViolationKind::NotFinite { value: v })
                }
                Some(v) if field.non_negative && v < 0.0 => {
                    checker.push(path, ViolationKind::Negative { value: v })
                }
                Some(v) => speeds.push((field.name, v)),
            }
        } else {
            checker.push(path, ViolationKind::UnknownField { key: key.clone() });
        }
    }

    let required = iter::once(revision.bindings_key)
        .chain(revision.speed_fields.iter().map(|f| f.name));
    for name in required {
        if !doc.contains_key(name) {
            checker.push(
                FieldPath::top(name),
                ViolationKind::MissingField {
                    field: name.to_string(),
                },
            );
        }
    }

    checker.finish(Walked { entries, speeds })
}

/// Decode a bare tag spelled in `accepted` through a `(tag, value)` table.
pub(crate) fn bare_tag<T: Clone>(
    checker: &mut Checker,
    path: &FieldPath,
    value: &Value,
    accepted: &[&str],
    table: &[(&str, T)],
) -> Option<T> {
    let Value::String(tag) = value else {
        checker.wrong_type(path.clone(), "string", value);
        return None;
    };
    let known = accepted.contains(&tag.as_str());
    match table.iter().find(|(t, _)| known && t == tag) {
        Some((_, v)) => Some(v.clone()),
        None => {
            let kind = ViolationKind::UnknownAction { tag: tag.clone() };
            checker.push(path.clone(), kind);
            None
        }
    }
}

/// Check a `Click` payload against the accepted targets.
pub(crate) fn click_target<'v>(
    checker: &mut Checker,
    path: &FieldPath,
    value: &'v Value,
    allowed: &[&str],
) -> Option<&'v str> {
    let Value::String(target) = value else {
        checker.action(
            path.clone(),
            ActionError::WrongType {
                variant: "Click",
                field: "button",
                expected: "string",
            },
        );
        return None;
    };
    if allowed.contains(&target.as_str()) {
        Some(target)
    } else {
        checker.action(
            path.clone(),
            ActionError::InvalidValue {
                variant: "Click",
                field: "button",
                value: target.clone(),
            },
        );
        None
    }
}

/// Check a `KeyPress` payload table, returning its key and modifier spellings.
///
/// Modifier spellings are checked against `allowed`; duplicates are kept.
pub(crate) fn key_press_parts<'v>(
    checker: &mut Checker,
    path: &FieldPath,
    value: &'v Value,
    allowed: &[&str],
    modifiers_required: bool,
) -> Option<(&'v str, Vec<&'v str>)> {
    let Value::Table(table) = value else {
        checker.wrong_type(path.clone(), "table", value);
        return None;
    };
    let before = checker.len();
    let mut key = None;
    let mut modifiers = Vec::new();
    let mut saw_modifiers = false;

    for (field, v) in table {
        let field_path = path.key(field);
        match field.as_str() {
            "key" => match v {
                Value::String(s) if s.is_empty() => checker.action(
                    field_path,
                    ActionError::Empty {
                        variant: "KeyPress",
                        field: "key",
                    },
                ),
                Value::String(s) => key = Some(s.as_str()),
                _ => checker.action(
                    field_path,
                    ActionError::WrongType {
                        variant: "KeyPress",
                        field: "key",
                        expected: "string",
                    },
                ),
            },
            "modifiers" => {
                saw_modifiers = true;
                let Value::Array(items) = v else {
                    checker.action(
                        field_path,
                        ActionError::WrongType {
                            variant: "KeyPress",
                            field: "modifiers",
                            expected: "array of strings",
                        },
                    );
                    continue;
                };
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(m) if allowed.contains(&m.as_str()) => {
                            modifiers.push(m.as_str())
                        }
                        Value::String(m) => checker.action(
                            field_path.index(i),
                            ActionError::InvalidValue {
                                variant: "KeyPress",
                                field: "modifiers",
                                value: m.clone(),
                            },
                        ),
                        _ => checker.action(
                            field_path.index(i),
                            ActionError::WrongType {
                                variant: "KeyPress",
                                field: "modifiers",
                                expected: "string",
                            },
                        ),
                    }
                }
            }
            other => checker.action(
                field_path,
                ActionError::UnknownField {
                    variant: "KeyPress",
                    field: other.to_string(),
                },
            ),
        }
    }

    if !table.contains_key("key") {
        checker.action(
            path.clone(),
            ActionError::MissingField {
                variant: "KeyPress",
                field: "key",
            },
        );
    }
    if modifiers_required && !saw_modifiers {
        checker.action(
            path.clone(),
            ActionError::MissingField {
                variant: "KeyPress",
                field: "modifiers",
            },
        );
    }

    match key {
        Some(k) if checker.len() == before => Some((k, modifiers)),
        _ => None,
    }
}

/// Require `value` to be an array, returning its items.
pub(crate) fn action_list<'v>(
    checker: &mut Checker,
    path: &FieldPath,
    value: &'v Value,
) -> Option<&'v [Value]> {
    match value {
        Value::Array(items) => Some(items),
        other => {
            checker.wrong_type(path.clone(), "array", other);
            None
        }
    }
}
