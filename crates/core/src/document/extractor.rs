//! Recover the citation string from a normalized document.

use thiserror::Error;

use super::patterns::{
    BRACKETED_REFERENCE, CHAPTER_VERSE, DECORATED_REFERENCE, NUMBERED_VERSE,
    UNDECORATED_REFERENCE,
};
use crate::markers::{MarkerSet, Section};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("reference not found after the verses marker")]
    ReferenceNotFound,
}

/// Find the citation line following the verses marker and return it as
/// `"Book C:V-V (Translation)"`.
///
/// # Errors
/// Returns [`ExtractError::ReferenceNotFound`] if no qualifying line follows
/// the marker (or the marker is absent).
pub fn extract_reference(document: &str, markers: &MarkerSet) -> Result<String, ExtractError> {
    let mut in_verses = false;

    for line in document.lines().map(str::trim) {
        if markers.is_marker(line, Section::Verses) {
            in_verses = true;
            continue;
        }
        if !in_verses || line.is_empty() {
            continue;
        }
        if NUMBERED_VERSE.is_match(line) {
            continue;
        }
        if let Some(reference) = match_reference_line(line) {
            return Ok(reference);
        }
    }

    Err(ExtractError::ReferenceNotFound)
}

fn match_reference_line(line: &str) -> Option<String> {
    if let Some(caps) = BRACKETED_REFERENCE.captures(line) {
        let reference = caps["reference"].trim();
        if CHAPTER_VERSE.is_match(reference) {
            return Some(format!("{reference} ({})", caps["translation"].trim()));
        }
    }

    if let Some(caps) = DECORATED_REFERENCE.captures(line) {
        let reference = caps["reference"].trim();
        if CHAPTER_VERSE.is_match(reference) {
            return Some(format!("{reference} ({})", caps["translation"].trim()));
        }
    }

    UNDECORATED_REFERENCE.captures(line).map(|caps| {
        format!(
            "{} {}:{} ({})",
            caps["book"].trim(),
            &caps["chapter"],
            caps["verses"].trim(),
            caps["translation"].trim()
        )
    })
}
