//! Structural validation of a generated candidate.

use thiserror::Error;

use super::patterns::REFERENCE_LINE;
use crate::markers::{MarkerSet, Section};

/// How many leading lines may precede the verses marker.
pub const VERSES_MARKER_WINDOW: usize = 5;

/// Why a candidate document was rejected. Checks run in declaration order
/// and stop at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("verses section marker missing from the first {VERSES_MARKER_WINDOW} lines")]
    MissingVersesMarker,

    #[error("no reference found")]
    NoReference,

    /// A second citation line means the generator listed several
    /// translations or drifted from the requested format.
    #[error("multiple translations/references detected: found {count} reference lines")]
    MultipleReferences { count: usize },

    #[error("context section marker missing")]
    MissingContextMarker,

    #[error("reflection section marker missing")]
    MissingReflectionMarker,
}

/// Check a candidate against the required document structure.
///
/// # Errors
/// Returns the first [`ValidationFailure`] encountered.
pub fn validate(document: &str, markers: &MarkerSet) -> Result<(), ValidationFailure> {
    let lines: Vec<&str> = document.lines().collect();

    if !lines.iter().take(VERSES_MARKER_WINDOW).any(|l| markers.is_marker(l, Section::Verses)) {
        return Err(ValidationFailure::MissingVersesMarker);
    }

    let count = lines.iter().filter(|l| REFERENCE_LINE.is_match(l.trim())).count();
    match count {
        0 => return Err(ValidationFailure::NoReference),
        1 => {},
        count => return Err(ValidationFailure::MultipleReferences { count }),
    }

    if !lines.iter().any(|l| markers.is_marker(l, Section::Context)) {
        return Err(ValidationFailure::MissingContextMarker);
    }

    if !lines.iter().any(|l| markers.is_marker(l, Section::Reflection)) {
        return Err(ValidationFailure::MissingReflectionMarker);
    }

    Ok(())
}
