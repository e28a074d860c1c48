//! Bible verse lookup and scripture reference parsing.
//!
//! Citations look like `"Gn 30,5-7.15"`: a book token, a chapter, and an
//! optional comma-separated verse specifier made of dot-separated segments.
//! The pipeline is [`parse_reference`] → [`normalize_verse_indices`] →
//! [`format_verses`], with [`encode_verse_ranges`] turning the shown verses
//! back into a compact citation.

pub mod citation;
pub mod document;
pub mod format;
pub mod lookup;
pub mod reference;
pub mod resolve;

use std::path::Path;

pub use citation::{encode_verse_ranges, Citation};
pub use document::{BibleDocument, BibleKind, Book, Chapter, Verse};
pub use format::{format_verses, DisplayOptions};
pub use lookup::{lookup, lookup_reference, Passage};
pub use reference::{parse_reference, ParsedReference};
pub use resolve::normalize_verse_indices;

use crate::error::{LookupError, Result};

/// Bible lookup service holding the currently loaded document.
#[derive(Debug, Default)]
pub struct BibleService {
    document: Option<BibleDocument>,
}

impl BibleService {
    /// Create a service with no document loaded.
    pub const fn new() -> Self {
        Self { document: None }
    }

    /// Create a service around an already loaded document.
    pub const fn with_document(document: BibleDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// Load a document from disk, replacing the current one.
    ///
    /// On failure the previously loaded document is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<&BibleDocument> {
        let document = BibleDocument::load(path)?;
        Ok(&*self.document.insert(document))
    }

    /// Replace the current document.
    pub fn set_document(&mut self, document: BibleDocument) {
        self.document = Some(document);
    }

    /// The loaded document, if any.
    pub const fn document(&self) -> Option<&BibleDocument> {
        self.document.as_ref()
    }

    /// Look up a citation in the loaded document.
    pub fn lookup(&self, input: &str, options: &DisplayOptions) -> std::result::Result<Passage, LookupError> {
        let document = self.document.as_ref().ok_or(LookupError::DocumentUnavailable)?;
        lookup(document, input, options)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_service_requires_document() {
        let service = BibleService::new();
        assert_eq!(
            service.lookup("Gn 1", &DisplayOptions::default()).unwrap_err(),
            LookupError::DocumentUnavailable
        );
    }

    #[test]
    fn test_service_keeps_document_on_failed_load() {
        let mut service = BibleService::with_document(BibleDocument {
            name: "Kept".into(),
            books: Vec::new(),
        });
        assert!(service.load_file(Path::new("/nonexistent/bible.ebf1.json")).is_err());
        assert_eq!(service.document().map(|d| d.name.as_str()), Some("Kept"));
    }

    #[test]
    fn test_service_lookup() {
        let mut service = BibleService::new();
        service.set_document(BibleDocument {
            name: String::new(),
            books: vec![Book {
                names: vec!["Salmos".into()],
                abbreviation: "Sl".into(),
                usfm_id: None,
                chapters: vec![Chapter::from_texts(["O Senhor é o meu pastor"])],
            }],
        });
        let options = DisplayOptions { quotes: false, ..DisplayOptions::default() };
        let passage = service.lookup("Sl 1,1", &options).unwrap();
        assert_eq!(passage.render(), "O Senhor é o meu pastor");
    }
}
