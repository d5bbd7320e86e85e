//! Error types for loading and compiling binding files.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    FieldPath, Violation,
    migrate::MigrationError,
    report::{ReportEntry, Severity},
};

#[derive(Debug, Error, Clone, PartialEq)]
/// Errors produced while loading, detecting, validating, or migrating a binding file.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// TOML syntax error with a concrete line/column location and excerpt.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
    #[error("document matches no known revision (top-level keys: {})", .keys.join(", "))]
    /// No revision signature is satisfied.
    UnrecognizedSchema {
        /// Top-level keys the document does carry.
        keys: Vec<String>,
    },
    #[error("{count} violation(s) in revision {revision}", count = .violations.len())]
    /// The document does not conform to the revision it was detected as, or
    /// a migrated document does not conform to its successor.
    Validation {
        /// Revision being validated.
        revision: usize,
        /// Every violation, in document order.
        violations: Vec<Violation>,
    },
    #[error(
        "cannot migrate revision {from} to {to}: {count} value(s) have no equivalent",
        count = .failures.len()
    )]
    /// A migration step met values it has no rule for.
    Migration {
        /// Source revision.
        from: usize,
        /// Target revision.
        to: usize,
        /// Every failure, in document order.
        failures: Vec<MigrationError>,
    },
    #[error("{message}")]
    /// A profile could not be rendered as TOML.
    Emit {
        /// Serializer message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => match path {
                Some(p) => format!(
                    "Config parse error at {}:{}:{}\n{}\n{}",
                    p.display(),
                    line,
                    col,
                    message,
                    excerpt
                ),
                None => format!(
                    "Config parse error at line {}, column {}\n{}\n{}",
                    line, col, message, excerpt
                ),
            },
            Self::UnrecognizedSchema { .. } | Self::Emit { .. } => {
                format!("Config error: {}", self)
            }
            Self::Validation {
                revision,
                violations,
            } => {
                let mut out = format!("Config validation failed (revision {})", revision);
                for v in violations {
                    let _ignored = write!(out, "\n  {}", v);
                }
                out
            }
            Self::Migration { from, to, failures } => {
                let mut out = format!("Config migration from revision {} to {} failed", from, to);
                for f in failures {
                    let _ignored = write!(out, "\n  {}", f);
                }
                out
            }
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// Flatten into ordered `(revision, field-path, kind)` entries.
    pub fn report(&self) -> Vec<ReportEntry> {
        let whole = |code| ReportEntry {
            revision: None,
            path: FieldPath::root(),
            severity: Severity::Error,
            code,
            message: self.to_string(),
        };
        match self {
            Self::Read { .. } => vec![whole("read")],
            Self::Parse { .. } => vec![whole("parse")],
            Self::UnrecognizedSchema { .. } => vec![whole("unrecognized_schema")],
            Self::Emit { .. } => vec![whole("emit")],
            Self::Validation {
                revision,
                violations,
            } => violations
                .iter()
                .map(|v| ReportEntry {
                    revision: Some(*revision),
                    path: v.path.clone(),
                    severity: Severity::Error,
                    code: v.kind.code(),
                    message: v.kind.to_string(),
                })
                .collect(),
            Self::Migration { failures, .. } => failures
                .iter()
                .map(|f| ReportEntry {
                    revision: Some(f.from),
                    path: f.path.clone(),
                    severity: Severity::Error,
                    code: f.kind.code(),
                    message: f.kind.to_string(),
                })
                .collect(),
        }
    }
}

/// Build a short excerpt ending at `line_no` with a caret under `col_no`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let first = line_no.saturating_sub(1).max(1);
    let mut out = String::new();
    for (n, text) in source
        .lines()
        .enumerate()
        .map(|(i, t)| (i + 1, t))
        .skip(first - 1)
        .take(line_no + 1 - first)
    {
        let gutter = format!(" {:>4} | ", n);
        let _ignored = writeln!(out, "{}{}", gutter, text);
        if n == line_no {
            let _ignored = writeln!(
                out,
                "{}^",
                " ".repeat(gutter.len() + col_no.saturating_sub(1))
            );
        }
    }
    out
}
