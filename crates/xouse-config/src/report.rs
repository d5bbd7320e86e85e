//! Flat, user-facing compile diagnostics.

use std::fmt;

use crate::{FieldPath, migrate::Advisory};

/// Whether an entry stopped the compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The compile failed.
    Error,
    /// The compile succeeded but something changed meaning.
    Advisory,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Advisory => "advisory",
        })
    }
}

/// One `(revision, field-path, kind)` triple plus rendered text.
///
/// `revision` is `None` when the problem precedes detection (read, parse, or
/// an unrecognised document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Revision the path refers to.
    pub revision: Option<usize>,
    /// Location within that revision's document.
    pub path: FieldPath,
    /// Error or advisory.
    pub severity: Severity,
    /// Stable machine-readable kind, e.g. `unknown_button`.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl From<&Advisory> for ReportEntry {
    fn from(a: &Advisory) -> Self {
        Self {
            revision: Some(a.revision),
            path: a.path.clone(),
            severity: Severity::Advisory,
            code: a.kind.code(),
            message: a.kind.to_string(),
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.revision {
            Some(r) => write!(f, "{} [rev {}] ", self.severity, r)?,
            None => write!(f, "{} ", self.severity)?,
        }
        if !self.path.is_root() {
            write!(f, "{}: ", self.path)?;
        }
        write!(f, "{} ({})", self.message, self.code)
    }
}
