//! Verse index normalization against a concrete chapter.

use super::reference::ParsedReference;

/// Clamp and expand a parsed reference's verse list for a chapter of
/// `chapter_len` verses.
///
/// Whole-chapter references become every index; open-ended references are
/// extended from their last verse to the end. Indices past the chapter are
/// dropped. The result is ascending.
pub fn normalize_verse_indices(reference: &ParsedReference, chapter_len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = if reference.whole_chapter {
        (0..chapter_len).collect()
    } else {
        reference
            .verses
            .iter()
            .copied()
            .filter(|&index| index < chapter_len)
            .collect()
    };

    if reference.continue_to_end {
        if let Some(&last) = indices.last() {
            indices.extend(last + 1..chapter_len);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::reference::parse_reference;

    fn normalize(citation: &str, len: usize) -> Vec<usize> {
        normalize_verse_indices(&parse_reference(citation).unwrap(), len)
    }

    #[test]
    fn whole_chapter_materializes_every_verse() {
        assert_eq!(normalize("Gn 1", 4), vec![0, 1, 2, 3]);
        assert!(normalize("Gn 1", 0).is_empty());
    }

    #[test]
    fn closed_range_is_exact() {
        for (a, b) in [(1, 1), (2, 5), (1, 31)] {
            let expected: Vec<usize> = (a - 1..b).collect();
            assert_eq!(normalize(&format!("Gn 1,{a}-{b}"), 31), expected);
        }
    }

    #[test]
    fn drops_indices_past_the_chapter() {
        assert_eq!(normalize("Gn 1,2.9.40-42", 10), vec![1, 8]);
    }

    #[test]
    fn open_range_runs_to_the_end() {
        assert_eq!(normalize("Gn 1,2.5-", 8), vec![1, 4, 5, 6, 7]);
    }

    #[test]
    fn open_range_past_the_end_stays_empty() {
        assert!(normalize("Gn 1,12-", 8).is_empty());
    }

    #[test]
    fn open_range_extends_from_last_kept_verse() {
        // verse 12 is dropped, so the tail starts after verse 3
        assert_eq!(normalize("Gn 1,3.12-", 6), vec![2, 3, 4, 5]);
    }
}
