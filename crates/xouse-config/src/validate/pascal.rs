//! Revision 1: one PascalCase tag per button, controller-library button names.

use super::{Violation, bare_tag, walk};
use crate::{Document, schema::Revision};

/// Action tags of revision 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PascalAction {
    /// Primary click.
    LClick,
    /// Secondary click.
    RClick,
    /// Hold to speed up.
    SpeedUp,
    /// Hold to slow down.
    SpeedDown,
    /// Raise base speed by `speed_inc`.
    SpeedInc,
    /// Lower base speed by `speed_dec`.
    SpeedDec,
}

impl PascalAction {
    /// Spelling table.
    pub(crate) const TAGS: [(&'static str, Self); 6] = [
        ("LClick", Self::LClick),
        ("RClick", Self::RClick),
        ("SpeedUp", Self::SpeedUp),
        ("SpeedDown", Self::SpeedDown),
        ("SpeedInc", Self::SpeedInc),
        ("SpeedDec", Self::SpeedDec),
    ];
}

/// A validated revision 1 document.
#[derive(Debug, Clone, PartialEq)]
pub struct PascalDoc {
    /// `(button key, tag)` in document order.
    pub actions: Vec<(String, PascalAction)>,
    /// Base speed.
    pub speed: f64,
    /// Speed-up multiplier.
    pub speed_up: f64,
    /// Speed-down divisor.
    pub speed_down: f64,
    /// Step added by `SpeedInc`.
    pub speed_inc: f64,
    /// Step removed by `SpeedDec`.
    pub speed_dec: f64,
}

/// Validate a revision 1 document.
pub(super) fn validate(
    doc: &Document,
    revision: &Revision,
    accepted: &[&str],
) -> Result<PascalDoc, Vec<Violation>> {
    let walked = walk(doc, revision, |checker, path, value| {
        bare_tag(checker, path, value, accepted, &PascalAction::TAGS)
    })?;
    let names = ["speed", "speed_up", "speed_down", "speed_inc", "speed_dec"];
    let [speed, speed_up, speed_down, speed_inc, speed_dec] = walked.speeds(names)?;
    Ok(PascalDoc {
        actions: walked.entries,
        speed,
        speed_up,
        speed_down,
        speed_inc,
        speed_dec,
    })
}
