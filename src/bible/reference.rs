//! Citation parsing.
//!
//! Grammar: `<book> <chapter>[,<segment>[.<segment>...]]` where a segment is
//! `<n>`, `<n>-<m>` or the open-ended `<n>-`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::citation::encode_verse_ranges;
use crate::constants::citation::{
    CHAPTER_SEPARATOR, MAX_VERSE_NUMBER, RANGE_SEPARATOR, SEGMENT_SEPARATOR,
};

/// Regex matching the part after the book token: chapter, then optional verses.
#[allow(clippy::expect_used)]
static RE_CHAPTER_VERSES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:,(.+))?$").expect("valid regex: RE_CHAPTER_VERSES")
});

/// A citation split into its parts, not yet checked against any document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReference {
    /// Book token as typed.
    pub book: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// Zero-based verse indices, ascending and unique.
    pub verses: Vec<usize>,
    /// No verse specifier was given.
    pub whole_chapter: bool,
    /// The specifier ended in an open range such as `5-`.
    pub continue_to_end: bool,
}

/// Parse a citation such as `"Gn 30,5-7.15"`.
///
/// Returns `None` only when the text after the book token is not a chapter
/// number optionally followed by `,` and a verse specifier. Unreadable verse
/// numbers inside the specifier are skipped.
///
/// An open-ended range stops the scan: `"Gn 1,5-.9"` reads as verse 5 to the
/// end of the chapter, and `9` is ignored.
pub fn parse_reference(input: &str) -> Option<ParsedReference> {
    let input = input.trim();
    let (book, rest) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));

    let caps = RE_CHAPTER_VERSES.captures(rest.trim_start())?;
    let chapter: u32 = caps[1].parse().ok()?;

    let Some(specifier) = caps.get(2) else {
        return Some(ParsedReference {
            book: book.to_string(),
            chapter,
            verses: Vec::new(),
            whole_chapter: true,
            continue_to_end: false,
        });
    };

    let mut verses = Vec::new();
    let mut continue_to_end = false;

    for segment in specifier.as_str().split(SEGMENT_SEPARATOR) {
        if segment.contains(RANGE_SEPARATOR) {
            let mut ends = segment.split(RANGE_SEPARATOR);
            let start = ends.next().and_then(parse_int);
            let mut end = ends.next().and_then(parse_int);
            if end.is_none() {
                continue_to_end = true;
                end = start;
            }
            if let (Some(start), Some(end)) = (start, end) {
                let end = end.min(MAX_VERSE_NUMBER);
                verses.extend((start.max(1)..=end).filter_map(to_index));
            }
        } else if let Some(number) = parse_int(segment) {
            verses.extend(to_index(number));
        }

        if continue_to_end {
            break;
        }
    }

    verses.sort_unstable();
    verses.dedup();

    Some(ParsedReference {
        book: book.to_string(),
        chapter,
        verses,
        whole_chapter: false,
        continue_to_end,
    })
}

/// Zero-based index of a 1-based verse number; `None` for numbers below 1.
fn to_index(number: i64) -> Option<usize> {
    usize::try_from(number.checked_sub(1)?).ok()
}

/// Read a leading integer, ignoring surrounding whitespace and trailing junk.
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = unsigned[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

impl ParsedReference {
    /// Re-render the verse specifier the way it was understood.
    ///
    /// An open-ended reference ends in `<n>-`, where `n` is its last verse, so
    /// the result parses back to the same reference.
    pub fn specifier(&self) -> String {
        if self.whole_chapter {
            return String::new();
        }
        let Some((&last, rest)) = self.verses.split_last().filter(|_| self.continue_to_end) else {
            return encode_verse_ranges(&self.verses);
        };
        let mut out = encode_verse_ranges(rest);
        out.push(if rest.is_empty() { CHAPTER_SEPARATOR } else { SEGMENT_SEPARATOR });
        out.push_str(&(last + 1).to_string());
        out.push(RANGE_SEPARATOR);
        out
    }
}

impl std::fmt::Display for ParsedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}{}", self.book, self.chapter, self.specifier())
    }
}
