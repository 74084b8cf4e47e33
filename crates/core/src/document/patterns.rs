//! Line patterns shared by the validator, normalizer and extractor.
//!
//! All patterns are applied to trimmed lines.

use std::sync::LazyLock;

use regex::Regex;

/// A single citation line, optionally wrapped in `*`:
/// `Book Chapter:Verse(-Verse) (Translation)`.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static REFERENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*?(?:[1-3]\s*)?[\p{L}\s]+\d+:\d+(?:-\d+)?\s*\([^)]+\)\*?$").unwrap()
});

/// The same citation shape with no decoration at all.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static BARE_REFERENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[1-3]\s*)?[\p{L}\s]+\d+:\d+(?:-\d+)?\s*\([^)]+\)$").unwrap()
});

/// `*[Book C:V] (Translation)*`
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static BRACKETED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\[\s*(?P<reference>.+?)\s*\]\s*\(\s*(?P<translation>[^)]+?)\s*\)\*$").unwrap()
});

/// `*Book C:V-V (Translation)*`
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static DECORATED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*(?P<reference>.+?)\s*\((?P<translation>[^)]+)\)\*$").unwrap()
});

/// `Book C:V-V (Translation)` with loose spacing, no decoration.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static UNDECORATED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<book>.+?)\s+(?P<chapter>\d+)\s*:\s*(?P<verses>\d+(?:\s*-\s*\d+)?)\s*\((?P<translation>[^)]+)\)\s*$",
    )
    .unwrap()
});

/// A verse body line: `16 - Porque Deus tanto amou o mundo...`
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static NUMBERED_VERSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*-\s*.+").unwrap());

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
pub(crate) static CHAPTER_VERSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*:\s*\d+").unwrap());
