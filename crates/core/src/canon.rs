//! Book-to-testament classification for store statistics.

use serde::{Deserialize, Serialize};

/// Old Testament book names as the generator writes them (NVI, Portuguese),
/// plus common English spellings.
const OLD_TESTAMENT: &[&str] = &[
    "Gênesis", "Êxodo", "Levítico", "Números", "Deuteronômio", "Josué", "Juízes", "Rute",
    "1 Samuel", "2 Samuel", "1 Reis", "2 Reis", "1 Crônicas", "2 Crônicas", "Esdras",
    "Neemias", "Ester", "Jó", "Salmos", "Provérbios", "Eclesiastes", "Cantares",
    "Cântico dos Cânticos", "Isaías", "Jeremias", "Lamentações", "Ezequiel", "Daniel",
    "Oséias", "Joel", "Amós", "Obadias", "Jonas", "Miquéias", "Naum", "Habacuque",
    "Sofonias", "Ageu", "Zacarias", "Malaquias",
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy", "Joshua", "Judges", "Ruth",
    "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra", "Nehemiah", "Esther", "Job",
    "Psalms", "Psalm", "Proverbs", "Ecclesiastes", "Song of Songs", "Song of Solomon",
    "Isaiah", "Jeremiah", "Lamentations", "Ezekiel", "Hosea", "Amos", "Obadiah", "Jonah",
    "Micah", "Nahum", "Habakkuk", "Zephaniah", "Haggai", "Zechariah", "Malachi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    /// Anything not on the Old Testament list counts as New Testament.
    #[must_use]
    pub fn of_book(book: &str) -> Self {
        let book = book.trim().to_lowercase();
        if OLD_TESTAMENT.iter().any(|ot| ot.to_lowercase() == book) {
            Self::Old
        } else {
            Self::New
        }
    }
}
