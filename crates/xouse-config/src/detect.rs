//! Structural revision detection.

use tracing::debug;

use crate::{
    Document, Error,
    document::has_path,
    schema::{REVISIONS, Revision},
};

/// Identify the oldest revision whose signature keys are all present in `doc`.
///
/// Revisions are tried in ascending order and the first match wins. A
/// document matching none of them is rejected rather than assumed current.
pub fn detect(doc: &Document) -> Result<&'static Revision, Error> {
    for revision in &REVISIONS {
        if revision.signature.iter().all(|key| has_path(doc, key)) {
            debug!(
                revision = revision.index,
                name = revision.name,
                "detected revision"
            );
            return Ok(revision);
        }
    }
    Err(Error::UnrecognizedSchema {
        keys: doc.keys().cloned().collect(),
    })
}
