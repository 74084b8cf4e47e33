//! Rewrite marker and reference variants into the single decorated shape the
//! extractor expects.

use super::patterns::BARE_REFERENCE_LINE;
use crate::markers::MarkerSet;

/// Normalize a validated document line by line.
///
/// Marker lines (any accepted spelling) become the canonical decorated marker
/// and bare citation lines are wrapped in `*`. Everything else is untouched,
/// including its original indentation. Applying this twice is a no-op.
#[must_use]
pub fn normalize(document: &str, markers: &MarkerSet) -> String {
    document
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if let Some(section) = markers.classify(trimmed) {
                markers.spelling(section).decorated()
            } else if BARE_REFERENCE_LINE.is_match(trimmed) {
                format!("*{trimmed}*")
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
