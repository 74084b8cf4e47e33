//! Scripture citation parsing and verse-range arithmetic.
//!
//! A citation looks like `"1 Coríntios 13:4-7 (NVI)"`: a book name, a
//! `chapter:verse` pair, an optional `-verse` end and an optional trailing
//! parenthetical (usually the translation code).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TRAILING_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

// Lazy book capture: the book ends at the first `<ws><digits><ws>?:` run, so a
// leading ordinal ("1 Coríntios") stays part of the name.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<book>.+?)\s+(?P<chapter>\d+)\s*:\s*(?P<start>\d+)(?:\s*-\s*(?P<end>\d+))?")
        .unwrap()
});

/// Structured decomposition of a citation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceKey {
    pub book: String,
    pub chapter: u32,
    pub verse_start: u32,
    pub verse_end: u32,
}

impl ReferenceKey {
    /// Whether `[verse_start, verse_end]` shares at least one verse with
    /// `[start, end]`. Callers are responsible for matching book and chapter.
    #[must_use]
    pub const fn overlaps(&self, start: u32, end: u32) -> bool {
        self.verse_start <= end && start <= self.verse_end
    }

    /// Whether this key overlaps any stored range. Rows with a missing bound
    /// cannot be compared and are skipped.
    #[must_use]
    pub fn overlaps_any(&self, stored: &[VerseRange]) -> bool {
        stored.iter().any(|range| match (range.start, range.end) {
            (Some(start), Some(end)) => self.overlaps(start, end),
            _ => false,
        })
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verse_start == self.verse_end {
            write!(f, "{} {}:{}", self.book, self.chapter, self.verse_start)
        } else {
            write!(f, "{} {}:{}-{}", self.book, self.chapter, self.verse_start, self.verse_end)
        }
    }
}

/// A stored `(verse_start, verse_end)` pair; either bound may be absent in
/// rows written before the decomposed columns existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerseRange {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl VerseRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start: Some(start), end: Some(end) }
    }
}

/// Parse a citation into a [`ReferenceKey`].
///
/// Returns `None` for anything that does not contain a `book chapter:verse`
/// shape; an unparseable citation is a degraded but storable case, never an
/// error.
#[must_use]
pub fn parse_reference(raw: &str) -> Option<ReferenceKey> {
    let trimmed = raw.trim().trim_matches('*').trim();
    let without_note = TRAILING_ANNOTATION.replace(trimmed, "");
    let cleaned = without_note.trim().trim_start_matches('[').trim_end_matches(']').trim();

    let caps = CITATION.captures(cleaned)?;
    let book = collapse_whitespace(caps.name("book")?.as_str());
    if book.is_empty() {
        return None;
    }
    let chapter: u32 = caps.name("chapter")?.as_str().parse().ok()?;
    let first: u32 = caps.name("start")?.as_str().parse().ok()?;
    let last: u32 = match caps.name("end") {
        Some(m) => m.as_str().parse().ok()?,
        None => first,
    };

    Some(ReferenceKey {
        book,
        chapter,
        verse_start: first.min(last),
        verse_end: first.max(last),
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(book: &str, chapter: u32, start: u32, end: u32) -> ReferenceKey {
        ReferenceKey { book: book.to_owned(), chapter, verse_start: start, verse_end: end }
    }

    #[test]
    fn parses_range_with_translation() {
        assert_eq!(parse_reference("João 3:16-17 (NVI)"), Some(key("João", 3, 16, 17)));
    }

    #[test]
    fn single_verse_sets_end_to_start() {
        assert_eq!(parse_reference("Salmos 23:1 (NVI)"), Some(key("Salmos", 23, 1, 1)));
    }

    #[test]
    fn ordinal_book_keeps_numeral() {
        assert_eq!(
            parse_reference("1 Coríntios 13:4-7 (NVI)"),
            Some(key("1 Coríntios", 13, 4, 7))
        );
    }

    #[test]
    fn multi_word_book_and_loose_spacing() {
        assert_eq!(
            parse_reference("Cântico dos  Cânticos 2 : 10 - 13"),
            Some(key("Cântico dos Cânticos", 2, 10, 13))
        );
    }

    #[test]
    fn strips_decoration_and_brackets() {
        assert_eq!(parse_reference("*[Romanos 8:28] (ARA)*"), Some(key("Romanos", 8, 28, 28)));
    }

    #[test]
    fn reversed_range_is_normalized() {
        assert_eq!(parse_reference("Romans 8:17-16"), Some(key("Romans", 8, 16, 17)));
    }

    #[test]
    fn no_match_returns_none() {
        assert_eq!(parse_reference("Provérbios (NVI)"), None);
        assert_eq!(parse_reference(""), None);
        assert_eq!(parse_reference("João3:16 (NVI)"), None);
    }

    #[test]
    fn display_round_trips_through_parser() {
        let k = key("Romanos", 12, 1, 2);
        assert_eq!(k.to_string(), "Romanos 12:1-2");
        assert_eq!(parse_reference(&k.to_string()), Some(k));
        assert_eq!(key("Jó", 1, 21, 21).to_string(), "Jó 1:21");
    }

    #[test]
    fn overlap_table_against_romans_8_5_to_10() {
        let stored = [VerseRange::new(5, 10)];
        for (start, end) in [(1, 5), (10, 15), (6, 7), (1, 20)] {
            assert!(key("Romans", 8, start, end).overlaps_any(&stored), "{start}-{end}");
        }
        for (start, end) in [(11, 20), (1, 4)] {
            assert!(!key("Romans", 8, start, end).overlaps_any(&stored), "{start}-{end}");
        }
    }

    #[test]
    fn rows_with_missing_bounds_are_skipped() {
        let stored = [
            VerseRange { start: None, end: Some(10) },
            VerseRange { start: Some(5), end: None },
            VerseRange::default(),
        ];
        assert!(!key("Romans", 8, 1, 20).overlaps_any(&stored));
    }
}
