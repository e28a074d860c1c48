//! Application constants.
//!
//! Centralizes markup fragments and catalog values for better maintainability.

/// Markup emitted by the verse formatter.
pub mod markup {
    /// Marker inserted between non-contiguous verses.
    pub const ELLIPSIS: &str = "[...]";

    /// Fragment separator when line breaks are enabled.
    pub const LINE_BREAK: &str = "<br>";

    /// Fragment separator otherwise.
    pub const SPACE: &str = " ";

    /// Quote wrapped around the whole passage.
    pub const PASSAGE_QUOTE: char = '"';

    /// Replacement for double quotes inside a quoted passage.
    pub const INNER_QUOTE: &str = "'";

    /// Double-quote forms rewritten to [`INNER_QUOTE`] inside quoted passages.
    pub const DOUBLE_QUOTES: &[&str] = &["&quot;", "\"", "\u{201c}", "\u{201d}"];

    /// CSS class of the passage header.
    pub const REFERENCE_CLASS: &str = "reference";

    /// CSS class of the verse content block.
    pub const VERSE_TEXT_CLASS: &str = "verse-text";

    /// CSS class of section titles.
    pub const TITLE_CLASS: &str = "verse-title";

    /// CSS class of the parenthesized citation.
    pub const CITATION_CLASS: &str = "verse-reference";
}

/// Citation grammar constants.
pub mod citation {
    /// Separates the chapter from the verse specifier.
    pub const CHAPTER_SEPARATOR: char = ',';

    /// Separates verse segments.
    pub const SEGMENT_SEPARATOR: char = '.';

    /// Separates the ends of a range.
    pub const RANGE_SEPARATOR: char = '-';

    /// Largest verse number a range expands to. No chapter comes close.
    pub const MAX_VERSE_NUMBER: i64 = 10_000;
}

/// Bible library (catalog) constants.
pub mod library {
    /// Suffix of Bible document files.
    pub const BIBLE_FILE_SUFFIX: &str = ".ebf1.json";

    /// Catalog file written next to the documents.
    pub const INDEX_FILE: &str = "index.json";

    /// Directory name under the platform data dir.
    pub const DATA_DIR_NAME: &str = "bibleref";

    /// Books in a Catholic canon (46 OT + 27 NT).
    pub const CATHOLIC_BOOK_COUNT: usize = 73;

    /// Books in a Protestant canon (39 OT + 27 NT).
    pub const PROTESTANT_BOOK_COUNT: usize = 66;
}

/// Search constants.
pub mod search {
    /// Minimum fuzzy score for a "did you mean" book suggestion.
    pub const MIN_SUGGESTION_SCORE: i64 = 50;
}
