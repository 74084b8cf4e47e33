//! Section markers of a devotional document.
//!
//! A generated document has three sections, each introduced by a marker line
//! such as `[VERSÍCULOS]`. Generators are sloppy about decoration and accents,
//! so recognition folds both away: `[VERSICULOS]`, `*[VERSÍCULOS]*` and
//! `**[versículos]**` are all the verses marker. The canonical form written by
//! the normalizer is the accented spelling wrapped in single asterisks.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Which section a marker line introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Verses,
    Context,
    Reflection,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Verses, Self::Context, Self::Reflection];
}

/// Spellings of one section marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSpelling {
    /// Preferred spelling, e.g. `[VERSÍCULOS]`.
    pub canonical: String,
    /// Additional spellings accepted on input, e.g. `[VERSES]`.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl MarkerSpelling {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self { canonical: canonical.into(), aliases: Vec::new() }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Canonical marker wrapped in the emphasis used throughout the document.
    #[must_use]
    pub fn decorated(&self) -> String {
        format!("*{}*", self.canonical)
    }

    fn matches_folded(&self, folded: &str) -> bool {
        fold(&self.canonical) == folded || self.aliases.iter().any(|a| fold(a) == folded)
    }
}

/// The configured marker spellings for all three sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub verses: MarkerSpelling,
    pub context: MarkerSpelling,
    pub reflection: MarkerSpelling,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            verses: MarkerSpelling::new("[VERSÍCULOS]"),
            context: MarkerSpelling::new("[CONTEXTO]"),
            reflection: MarkerSpelling::new("[PARA PENSAR]"),
        }
    }
}

impl MarkerSet {
    #[must_use]
    pub const fn spelling(&self, section: Section) -> &MarkerSpelling {
        match section {
            Section::Verses => &self.verses,
            Section::Context => &self.context,
            Section::Reflection => &self.reflection,
        }
    }

    /// Identify the section a line introduces, if it is a marker line at all.
    ///
    /// The line must consist of the marker alone, optionally wrapped in one or
    /// two asterisks on both sides.
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<Section> {
        let inner = strip_emphasis(line.trim())?;
        let folded = fold(inner);
        Section::ALL.into_iter().find(|s| self.spelling(*s).matches_folded(&folded))
    }

    #[must_use]
    pub fn is_marker(&self, line: &str, section: Section) -> bool {
        self.classify(line) == Some(section)
    }
}

/// Strip a symmetric `*`/`**` wrapper. Returns `None` for lopsided decoration
/// such as `*[CONTEXTO]`.
fn strip_emphasis(line: &str) -> Option<&str> {
    let leading = line.len() - line.trim_start_matches('*').len();
    let trailing = line.len() - line.trim_end_matches('*').len();
    if leading != trailing || leading > 2 || line.len() <= leading * 2 {
        return None;
    }
    line.get(leading..line.len() - trailing).map(str::trim)
}

/// Uppercase, accent-free, whitespace-collapsed form used for comparison.
fn fold(s: &str) -> String {
    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}
