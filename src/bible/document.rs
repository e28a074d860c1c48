//! Loaded Bible documents: books, chapters and verses.
//!
//! Documents are read from the EBF1 JSON layout:
//!
//! ```json
//! { "bible": { "name": "...", "books": [
//!     { "names": ["Gênesis"], "abbreviation": "Gn", "usfm_id": "GEN",
//!       "chapters": [ { "verses": [ { "text": "...", "title": "..." } ] } ] }
//! ] } }
//! ```
//!
//! A verse may also be a bare string, or `null` for a gap in the data.

use std::path::Path;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{library, search};
use crate::error::{Error, Result};

/// A single verse of a chapter.
///
/// An empty `text` marks a gap: the verse exists in the numbering but has
/// no content, and is skipped when formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawVerse")]
pub struct Verse {
    /// Verse text, unescaped.
    pub text: String,
    /// Section title printed before this verse, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Verse {
    /// Create an untitled verse.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
        }
    }

    /// Attach a section title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether this verse is missing from the source data.
    ///
    /// Only empty text counts; a whitespace-only verse is still emitted.
    pub fn is_gap(&self) -> bool {
        self.text.is_empty()
    }
}

/// On-disk verse shapes, folded into [`Verse`] at load time.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVerse {
    Text(String),
    Entry {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
}

impl From<RawVerse> for Verse {
    fn from(raw: RawVerse) -> Self {
        match raw {
            RawVerse::Text(text) => Self { text, title: None },
            RawVerse::Entry { text, title } => Self {
                text: text.unwrap_or_default(),
                title: title.filter(|t| !t.trim().is_empty()),
            },
        }
    }
}

fn verses_with_gaps<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<Verse>, D::Error> {
    let raw: Vec<Option<Verse>> = Vec::deserialize(d)?;
    Ok(raw.into_iter().map(Option::unwrap_or_default).collect())
}

/// An ordered list of verses; index 0 is verse 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Verses in order. Gaps are kept so numbering stays aligned.
    #[serde(default, deserialize_with = "verses_with_gaps")]
    pub verses: Vec<Verse>,
}

impl Chapter {
    /// Build a chapter from verse texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verses: texts.into_iter().map(Verse::new).collect(),
        }
    }

    /// Number of verse slots, gaps included.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether the chapter has no verse slots at all.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// A book of the Bible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Human-readable names; the first is used for display.
    #[serde(default)]
    pub names: Vec<String>,
    /// Short form used in citations (e.g. "Gn").
    #[serde(default)]
    pub abbreviation: String,
    /// Standard USFM identifier (e.g. "GEN").
    #[serde(default, alias = "usfmId", skip_serializing_if = "Option::is_none")]
    pub usfm_id: Option<String>,
    /// Chapters in order; index 0 is chapter 1.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Name shown in headers and error messages.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map_or(self.abbreviation.as_str(), String::as_str)
    }

    /// Case-insensitive match against the abbreviation, USFM id or any name.
    pub fn matches(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        if token.is_empty() {
            return false;
        }
        self.keys().any(|key| key.to_lowercase() == token)
    }

    /// Chapter by 1-based number.
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.chapters.get(index)
    }

    /// Every non-empty identifier this book can be looked up by.
    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.abbreviation.as_str())
            .chain(self.usfm_id.as_deref())
            .chain(self.names.iter().map(String::as_str))
            .filter(|key| !key.is_empty())
    }
}

/// Canon a document belongs to, judged by its book count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibleKind {
    /// 73 books, deuterocanonicals included.
    Catholic,
    /// 66 books.
    Protestant,
    /// Any other selection of books.
    Other,
}

impl BibleKind {
    /// Classify by number of books.
    pub const fn from_book_count(count: usize) -> Self {
        match count {
            library::CATHOLIC_BOOK_COUNT => Self::Catholic,
            library::PROTESTANT_BOOK_COUNT => Self::Protestant,
            _ => Self::Other,
        }
    }

    /// Lowercase name, as written in catalogs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Catholic => "catholic",
            Self::Protestant => "protestant",
            Self::Other => "other",
        }
    }
}

/// A complete Bible translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleDocument {
    /// Translation name; may be empty.
    #[serde(default)]
    pub name: String,
    /// Books in canonical order.
    #[serde(default)]
    pub books: Vec<Book>,
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    bible: T,
}

impl BibleDocument {
    /// Parse a document from EBF1 JSON text.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Envelope<Self>>(json).map(|e| e.bible)
    }

    /// Serialize back to EBF1 JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Envelope { bible: self })
    }

    /// Read and parse a document file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let document =
            Self::from_json_str(&content).map_err(|e| Error::json(e, path.to_path_buf()))?;
        tracing::info!(
            "Loaded Bible {:?} ({} books) from {}",
            document.name,
            document.books.len(),
            path.display()
        );
        Ok(document)
    }

    /// First book, in document order, matching `token`.
    pub fn find_book(&self, token: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.matches(token))
    }

    /// Closest fuzzy match for a token that [`find_book`](Self::find_book) missed.
    pub fn suggest_book(&self, token: &str) -> Option<&Book> {
        if token.trim().is_empty() {
            return None;
        }
        let matcher = SkimMatcherV2::default().ignore_case();
        self.books
            .iter()
            .filter_map(|book| {
                book.keys()
                    .filter_map(|key| matcher.fuzzy_match(key, token))
                    .max()
                    .map(|score| (score, book))
            })
            .filter(|(score, _)| *score >= search::MIN_SUGGESTION_SCORE)
            // max_by_key keeps the last of equal scores; reverse so earlier books win ties
            .rev()
            .max_by_key(|(score, _)| *score)
            .map(|(_, book)| book)
    }

    /// Canon classification of this document.
    pub fn kind(&self) -> BibleKind {
        BibleKind::from_book_count(self.books.len())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const SAMPLE: &str = r#"{
        "bible": {
            "name": "Sample",
            "books": [
                {
                    "names": ["Gênesis", "Genesis"],
                    "abbreviation": "Gn",
                    "usfm_id": "GEN",
                    "chapters": [
                        { "verses": [
                            { "text": "No princípio", "title": "A criação" },
                            "plain string verse",
                            null,
                            { "text": "" }
                        ] }
                    ]
                },
                { "names": ["Êxodo"], "abbreviation": "Ex", "chapters": [] }
            ]
        }
    }"#;

    #[test]
    fn parses_every_verse_shape() {
        let doc = BibleDocument::from_json_str(SAMPLE).unwrap();
        let verses = &doc.books[0].chapters[0].verses;
        assert_eq!(verses.len(), 4);
        assert_eq!(verses[0].title.as_deref(), Some("A criação"));
        assert_eq!(verses[1], Verse::new("plain string verse"));
        assert!(verses[2].is_gap());
        assert!(verses[3].is_gap());
    }

    #[test]
    fn whitespace_verse_is_not_a_gap() {
        assert!(Verse::new("").is_gap());
        assert!(!Verse::new(" ").is_gap());
        assert!(!Verse::new("\n").is_gap());
    }

    #[test]
    fn finds_book_by_any_key() {
        let doc = BibleDocument::from_json_str(SAMPLE).unwrap();
        for token in ["gn", "GEN", "genesis", "GÊNESIS"] {
            assert_eq!(doc.find_book(token).map(Book::display_name), Some("Gênesis"), "{token}");
        }
        assert!(doc.find_book("Xyz").is_none());
        assert!(doc.find_book("").is_none());
    }

    #[test]
    fn first_match_wins() {
        let doc = BibleDocument {
            name: String::new(),
            books: vec![
                Book { names: vec!["Jo".into()], abbreviation: "Jó".into(), ..Book::default() },
                Book { names: vec!["João".into()], abbreviation: "Jo".into(), ..Book::default() },
            ],
        };
        assert_eq!(doc.find_book("jo").map(Book::display_name), Some("Jo"));
    }

    #[test]
    fn chapter_numbers_are_one_based() {
        let doc = BibleDocument::from_json_str(SAMPLE).unwrap();
        let gn = &doc.books[0];
        assert!(gn.chapter(0).is_none());
        assert!(gn.chapter(1).is_some());
        assert!(gn.chapter(2).is_none());
    }

    #[test]
    fn suggests_close_book_names() {
        let doc = BibleDocument::from_json_str(SAMPLE).unwrap();
        assert_eq!(doc.suggest_book("Genes").map(|b| b.abbreviation.as_str()), Some("Gn"));
        assert!(doc.suggest_book("qqq").is_none());
    }

    #[test]
    fn classifies_by_book_count() {
        assert_eq!(BibleKind::from_book_count(73), BibleKind::Catholic);
        assert_eq!(BibleKind::from_book_count(66), BibleKind::Protestant);
        assert_eq!(BibleKind::from_book_count(2), BibleKind::Other);
        assert_eq!(BibleDocument::from_json_str(SAMPLE).unwrap().kind(), BibleKind::Other);
    }

    #[test]
    fn json_round_trips() {
        let doc = BibleDocument::from_json_str(SAMPLE).unwrap();
        let again = BibleDocument::from_json_str(&doc.to_json_string().unwrap()).unwrap();
        assert_eq!(doc, again);
    }
}
