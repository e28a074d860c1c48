//! Compact citations: the inverse of the verse-specifier grammar.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::constants::citation::{CHAPTER_SEPARATOR, RANGE_SEPARATOR, SEGMENT_SEPARATOR};

/// Group ascending indices into maximal runs of consecutive values.
pub fn verse_runs(indices: &[usize]) -> Vec<RangeInclusive<usize>> {
    let mut runs: Vec<RangeInclusive<usize>> = Vec::new();
    for &index in indices {
        match runs.last_mut() {
            Some(run) if *run.end() + 1 == index => *run = *run.start()..=index,
            _ => runs.push(index..=index),
        }
    }
    runs
}

/// Encode zero-based indices as a verse specifier, e.g. `[4, 5, 6, 14]`
/// becomes `",5-7.15"`. Empty input yields an empty string.
pub fn encode_verse_ranges(indices: &[usize]) -> String {
    let runs = verse_runs(indices);
    if runs.is_empty() {
        return String::new();
    }

    let segments: Vec<String> = runs
        .iter()
        .map(|run| {
            if run.start() == run.end() {
                format!("{}", run.start() + 1)
            } else {
                format!("{}{RANGE_SEPARATOR}{}", run.start() + 1, run.end() + 1)
            }
        })
        .collect();

    format!("{CHAPTER_SEPARATOR}{}", segments.join(&SEGMENT_SEPARATOR.to_string()))
}

/// A resolved citation such as `Gn 30,5-7.15`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// Book abbreviation.
    pub book: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// Zero-based verses; `None` for a whole chapter.
    pub verses: Option<Vec<usize>>,
}

impl Citation {
    /// Citation for a whole chapter.
    pub fn chapter(book: impl Into<String>, chapter: u32) -> Self {
        Self { book: book.into(), chapter, verses: None }
    }

    /// Citation for selected verses.
    pub fn verses(book: impl Into<String>, chapter: u32, verses: Vec<usize>) -> Self {
        Self { book: book.into(), chapter, verses: Some(verses) }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        if let Some(verses) = &self.verses {
            f.write_str(&encode_verse_ranges(verses))?;
        }
        Ok(())
    }
}
