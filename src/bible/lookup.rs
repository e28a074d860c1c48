//! Citation lookup: parse, resolve the book and chapter, then format.

use serde::Serialize;

use super::citation::Citation;
use super::document::BibleDocument;
use super::format::{escape_markup, format_verses, to_plain_text, DisplayOptions};
use super::reference::{parse_reference, ParsedReference};
use super::resolve::normalize_verse_indices;
use crate::constants::markup;
use crate::error::LookupError;

/// A formatted passage, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passage {
    /// "Book chapter - Translation" line.
    pub header: String,
    /// Display name of the book.
    pub book: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// Zero-based verse indices shown, ascending.
    pub verses: Vec<usize>,
    /// Formatted verse and ellipsis fragments, in order.
    pub fragments: Vec<String>,
    /// Compact citation of what is shown.
    pub citation: Citation,
    /// Options the fragments were formatted with.
    pub options: DisplayOptions,
}

impl Passage {
    /// The parenthesized citation fragment, when enabled.
    pub fn citation_fragment(&self) -> Option<String> {
        self.options.parentheses_citation.then(|| {
            format!(
                "<span class=\"{}\">({})</span>",
                markup::CITATION_CLASS,
                escape_markup(&self.citation.to_string())
            )
        })
    }

    /// Fragments and citation joined into the verse content.
    pub fn render(&self) -> String {
        let mut fragments = self.fragments.clone();
        fragments.extend(self.citation_fragment());
        self.options.join(&fragments)
    }

    /// Header and content as HTML blocks.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"{}\">{}</div><div class=\"{}\">{}</div>",
            markup::REFERENCE_CLASS,
            escape_markup(&self.header),
            markup::VERSE_TEXT_CLASS,
            self.render()
        )
    }

    /// Header line followed by the content as plain text.
    pub fn to_plain_text(&self) -> String {
        format!("{}\n{}", self.header, to_plain_text(&self.render()))
    }
}

/// Look up a citation string in `document`.
pub fn lookup(
    document: &BibleDocument,
    input: &str,
    options: &DisplayOptions,
) -> Result<Passage, LookupError> {
    let reference = parse_reference(input).ok_or_else(|| LookupError::Parse {
        input: input.to_string(),
    })?;
    lookup_reference(document, &reference, options)
}

/// Resolve an already parsed reference in `document`.
pub fn lookup_reference(
    document: &BibleDocument,
    reference: &ParsedReference,
    options: &DisplayOptions,
) -> Result<Passage, LookupError> {
    let book = document.find_book(&reference.book).ok_or_else(|| LookupError::BookNotFound {
        book: reference.book.clone(),
        suggestion: document
            .suggest_book(&reference.book)
            .map(|b| b.display_name().to_string()),
    })?;

    let chapter = book
        .chapter(reference.chapter)
        .ok_or_else(|| LookupError::ChapterOutOfRange {
            book: book.display_name().to_string(),
            chapter: reference.chapter,
            available: book.chapters.len(),
        })?;

    let verses = normalize_verse_indices(reference, chapter.len());
    tracing::debug!(
        "Resolved {reference} to {} {} with {} verses",
        book.display_name(),
        reference.chapter,
        verses.len()
    );
    let fragments = format_verses(&verses, &chapter.verses, options);

    let mut header = format!("{} {}", book.display_name(), reference.chapter);
    if !document.name.is_empty() {
        header.push_str(" - ");
        header.push_str(&document.name);
    }

    let citation = if reference.whole_chapter {
        Citation::chapter(&book.abbreviation, reference.chapter)
    } else {
        Citation::verses(&book.abbreviation, reference.chapter, verses.clone())
    };

    Ok(Passage {
        header,
        book: book.display_name().to_string(),
        chapter: reference.chapter,
        verses,
        fragments,
        citation,
        options: *options,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::document::{Book, Chapter};

    fn document() -> BibleDocument {
        BibleDocument {
            name: "Test".into(),
            books: vec![Book {
                names: vec!["Genesis".into()],
                abbreviation: "Gn".into(),
                usfm_id: Some("GEN".into()),
                chapters: vec![
                    Chapter::from_texts(["one", "two", "three"]),
                    Chapter::from_texts(["alpha", "beta"]),
                ],
            }],
        }
    }

    fn plain() -> DisplayOptions {
        DisplayOptions { quotes: false, ellipsis: false, ..DisplayOptions::default() }
    }

    #[test]
    fn test_header_includes_translation() {
        let p = lookup(&document(), "gen 2", &plain()).unwrap();
        assert_eq!(p.header, "Genesis 2 - Test");
        assert_eq!(p.render(), "alpha beta");

        let mut doc = document();
        doc.name.clear();
        assert_eq!(lookup(&doc, "Gn 2", &plain()).unwrap().header, "Genesis 2");
    }

    #[test]
    fn test_citation_fragment() {
        let opts = DisplayOptions { parentheses_citation: true, ..plain() };
        let p = lookup(&document(), "Gn 1,3.1", &opts).unwrap();
        assert_eq!(p.render(), "one three <span class=\"verse-reference\">(Gn 1,1.3)</span>");

        // whole chapters cite without verses
        let p = lookup(&document(), "Gn 1", &opts).unwrap();
        assert_eq!(p.citation_fragment().unwrap(), "<span class=\"verse-reference\">(Gn 1)</span>");
    }

    #[test]
    fn test_open_range_citation_is_resolved() {
        let p = lookup(&document(), "Gn 1,2-", &plain()).unwrap();
        assert_eq!(p.verses, vec![1, 2]);
        assert_eq!(p.citation.to_string(), "Gn 1,2-3");
    }

    #[test]
    fn test_errors() {
        let doc = document();
        assert_eq!(
            lookup(&doc, "Gn", &plain()).unwrap_err(),
            LookupError::Parse { input: "Gn".into() }
        );
        assert!(matches!(
            lookup(&doc, "Xyz 1", &plain()).unwrap_err(),
            LookupError::BookNotFound { .. }
        ));
        for chapter in [0, 3] {
            assert_eq!(
                lookup(&doc, &format!("Gn {chapter}"), &plain()).unwrap_err(),
                LookupError::ChapterOutOfRange { book: "Genesis".into(), chapter, available: 2 }
            );
        }
    }

    #[test]
    fn test_html_and_plain_text() {
        let opts = DisplayOptions { verse_numbers: true, line_breaks: true, ..plain() };
        let p = lookup(&document(), "Gn 2", &opts).unwrap();
        assert_eq!(
            p.to_html(),
            "<div class=\"reference\">Genesis 2 - Test</div>\
             <div class=\"verse-text\"><sup>1</sup> alpha<br><sup>2</sup> beta</div>"
        );
        assert_eq!(p.to_plain_text(), "Genesis 2 - Test\n1 alpha\n2 beta");
    }
}
