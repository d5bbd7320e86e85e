//! Detect, validate, and migrate one document to the current revision.

use std::{borrow::Cow, fmt};

use tracing::{debug, warn};

use crate::{
    Document, Error, FieldPath, Profile, Violation, ViolationKind, detect,
    migrate::{self, Advisory, MigrationError},
    report::ReportEntry,
    schema::{self, Revision},
    validate::{Validated, validate},
};

/// Position of a compile in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Matching the document against revision signatures.
    Detecting,
    /// Checking the document against a revision.
    Validating(usize),
    /// Running the step between two adjacent revisions.
    Migrating {
        /// Source revision.
        from: usize,
        /// Target revision.
        to: usize,
    },
    /// The current revision validated; a profile exists.
    Canonical,
    /// The compile stopped.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detecting => f.write_str("detecting"),
            Self::Validating(r) => write!(f, "validating({r})"),
            Self::Migrating { from, to } => write!(f, "migrating({from}->{to})"),
            Self::Canonical => f.write_str("canonical"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// What happened during a successful compile.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompileReport {
    /// Revision the input was detected as.
    pub source_revision: usize,
    /// Every stage entered, in order.
    pub stages: Vec<Stage>,
    /// Non-fatal advisories raised along the way.
    pub advisories: Vec<Advisory>,
}

impl CompileReport {
    /// Revisions validated, oldest first.
    pub fn visited(&self) -> Vec<usize> {
        self.stages
            .iter()
            .filter_map(|s| match s {
                Stage::Validating(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Advisories as report entries.
    pub fn entries(&self) -> Vec<ReportEntry> {
        self.advisories.iter().map(ReportEntry::from).collect()
    }
}

/// A successful compile.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    /// The canonical output.
    pub profile: Profile,
    /// How it was reached.
    pub report: CompileReport,
}

/// Stages entered so far, logged as they happen.
#[derive(Default)]
struct Trace {
    /// Visited stages in order.
    stages: Vec<Stage>,
}

impl Trace {
    /// Record entering `stage`.
    fn enter(&mut self, stage: Stage) {
        debug!(%stage, "compile stage");
        self.stages.push(stage);
    }

    /// Mark the run failed and hand `err` back.
    fn fail(&mut self, err: Error) -> Error {
        self.enter(Stage::Failed);
        debug!(error = %err, "compile failed");
        err
    }
}

/// Compile a parsed document into a [`Profile`].
///
/// All-or-nothing: any violation or migration failure aborts with the full
/// set of problems for the revision where it occurred.
pub fn compile(doc: &Document) -> Result<Compiled, Error> {
    let mut trace = Trace::default();
    trace.enter(Stage::Detecting);
    let detected = detect(doc).map_err(|e| trace.fail(e))?;

    let mut advisories = Vec::new();
    let mut revision: &Revision = detected;
    let mut current: Cow<'_, Document> = Cow::Borrowed(doc);
    loop {
        trace.enter(Stage::Validating(revision.index));
        let validated = validate(&current, revision).map_err(|violations| {
            trace.fail(Error::Validation {
                revision: revision.index,
                violations,
            })
        })?;

        let from = revision.index;
        let to = from + 1;
        let step = match validated {
            Validated::Canonical(profile) => {
                trace.enter(Stage::Canonical);
                return Ok(Compiled {
                    profile,
                    report: CompileReport {
                        source_revision: detected.index,
                        stages: trace.stages,
                        advisories,
                    },
                });
            }
            Validated::Tags(d) => {
                migrate_step(&mut trace, from, to, || migrate::tags_to_pascal(&d))
            }
            Validated::Pascal(d) => {
                migrate_step(&mut trace, from, to, || migrate::pascal_to_grouped(&d))
            }
            Validated::Grouped(d) => {
                migrate_step(&mut trace, from, to, || migrate::grouped_to_canonical(&d))
            }
        }?;

        for advisory in &step.advisories {
            warn!(
                revision = advisory.revision,
                path = %advisory.path,
                code = advisory.kind.code(),
                "{}",
                advisory.kind
            );
        }
        advisories.extend(step.advisories);

        revision = schema::revision(to).ok_or_else(|| {
            trace.fail(Error::Validation {
                revision: to,
                violations: vec![Violation {
                    path: FieldPath::root(),
                    kind: ViolationKind::UnknownRevision { index: to },
                }],
            })
        })?;
        current = Cow::Owned(step.document);
    }
}

/// Run one migration step, tracing it and lifting its failures into [`Error`].
fn migrate_step(
    trace: &mut Trace,
    from: usize,
    to: usize,
    run: impl FnOnce() -> Result<migrate::Migrated, Vec<MigrationError>>,
) -> Result<migrate::Migrated, Error> {
    trace.enter(Stage::Migrating { from, to });
    run().map_err(|failures| trace.fail(Error::Migration { from, to, failures }))
}
