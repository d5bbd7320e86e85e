//! Revision 0: one lower camel case tag per lowercase button key.

use super::{Violation, bare_tag, walk};
use crate::{Document, schema::Revision};

/// Action tags of revision 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// `lClick`
    LClick,
    /// `rClick`
    RClick,
    /// `mClick`
    MClick,
    /// `speedUp`
    SpeedUp,
    /// `speedDown`
    SpeedDown,
    /// `speedInc`
    SpeedInc,
    /// `speedDec`
    SpeedDec,
    /// `none`, an explicitly unbound button.
    None,
}

impl TagAction {
    /// Spelling table.
    pub(crate) const TAGS: [(&'static str, Self); 8] = [
        ("lClick", Self::LClick),
        ("rClick", Self::RClick),
        ("mClick", Self::MClick),
        ("speedUp", Self::SpeedUp),
        ("speedDown", Self::SpeedDown),
        ("speedInc", Self::SpeedInc),
        ("speedDec", Self::SpeedDec),
        ("none", Self::None),
    ];

    /// Spelling as written in revision 0.
    pub fn tag(self) -> &'static str {
        match self {
            Self::LClick => "lClick",
            Self::RClick => "rClick",
            Self::MClick => "mClick",
            Self::SpeedUp => "speedUp",
            Self::SpeedDown => "speedDown",
            Self::SpeedInc => "speedInc",
            Self::SpeedDec => "speedDec",
            Self::None => "none",
        }
    }
}

/// A validated revision 0 document.
#[derive(Debug, Clone, PartialEq)]
pub struct TagsDoc {
    /// `(button key, tag)` in document order.
    pub buttons: Vec<(String, TagAction)>,
    /// Base speed.
    pub speed: f64,
    /// Speed-up multiplier.
    pub speed_up: f64,
    /// Speed-down divisor.
    pub speed_down: f64,
    /// Step for both `speedInc` and `speedDec`.
    pub speed_inc: f64,
}

/// Validate a revision 0 document.
pub(super) fn validate(
    doc: &Document,
    revision: &Revision,
    accepted: &[&str],
) -> Result<TagsDoc, Vec<Violation>> {
    let walked = walk(doc, revision, |checker, path, value| {
        bare_tag(checker, path, value, accepted, &TagAction::TAGS)
    })?;
    let [speed, speed_up, speed_down, speed_inc] =
        walked.speeds(["speed", "speed_up", "speed_down", "speed_inc"])?;
    Ok(TagsDoc {
        buttons: walked.entries,
        speed,
        speed_up,
        speed_down,
        speed_inc,
    })
}
