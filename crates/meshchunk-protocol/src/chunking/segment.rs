//! Whitespace-preferring segmentation of text into body fragments.
//!
//! The segmenter walks the text once per fragment. A fragment ends at the
//! last whitespace character found in the trailing half of the body budget;
//! the whitespace stays with the earlier fragment so nothing is duplicated
//! or dropped. When a single word fills that window, the fragment is cut at
//! a fixed width slightly narrower than the budget.

use crate::error::SegmentError;
use crate::limits::FORCED_CUT_SLACK;

/// How a fragment came to end where it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutKind {
    /// Cut right after a whitespace character.
    WordBoundary,
    /// No whitespace in the search window; cut at the forced width.
    Forced,
    /// Remainder of the text that fit within the budget.
    Final,
}

/// A body fragment borrowed from the segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    text: &'a str,
    cut: CutKind,
}

impl<'a> Fragment<'a> {
    /// Fragment text.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// How the fragment ended.
    pub fn cut(&self) -> CutKind {
        self.cut
    }

    /// Length in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Width of a forced cut for the given body budget.
///
/// Strictly narrower than `budget` whenever `budget >= 2`.
pub fn forced_cut_width(budget: usize) -> usize {
    (budget - FORCED_CUT_SLACK.min(budget / 2)).max(1)
}

/// Split `text` into fragments of at most `budget` characters each.
///
/// Concatenating the fragments reproduces `text` exactly. Empty text
/// yields a single empty fragment.
///
/// # Errors
///
/// Returns [`SegmentError::ZeroBudget`] if `budget` is zero.
///
/// # Example
///
/// ```
/// use meshchunk_protocol::chunking::{CutKind, segment};
///
/// let fragments = segment("alpha beta gamma", 12).unwrap();
/// assert_eq!(fragments[0].as_str(), "alpha beta ");
/// assert_eq!(fragments[0].cut(), CutKind::WordBoundary);
/// assert_eq!(fragments[1].as_str(), "gamma");
/// ```
pub fn segment(text: &str, budget: usize) -> Result<Vec<Fragment<'_>>, SegmentError> {
    if budget == 0 {
        return Err(SegmentError::ZeroBudget);
    }

    Ok(split_fragments(text, budget))
}

/// Segment with a budget the caller has already checked to be non-zero.
pub(crate) fn split_fragments(text: &str, budget: usize) -> Vec<Fragment<'_>> {
    debug_assert!(budget >= 1);

    let mut fragments = Vec::new();
    let mut rest = text;

    while let Some((end, cut)) = next_cut(rest, budget) {
        let (head, tail) = rest.split_at(end);
        fragments.push(Fragment { text: head, cut });
        rest = tail;
    }

    fragments.push(Fragment {
        text: rest,
        cut: CutKind::Final,
    });
    fragments
}

/// Find where the next fragment of `text` ends, as a byte offset.
///
/// Returns `None` when the whole of `text` fits within `budget`.
fn next_cut(text: &str, budget: usize) -> Option<(usize, CutKind)> {
    let floor = budget - budget.div_ceil(2);
    let forced_width = forced_cut_width(budget);

    let mut boundary = None;
    let mut forced_end = 0;

    for (offset, (byte_index, ch)) in text.char_indices().enumerate() {
        if offset == forced_width {
            forced_end = byte_index;
        }

        if offset == budget {
            // forced_width <= budget, so forced_end is set by now
            return Some(match boundary {
                Some(end) => (end, CutKind::WordBoundary),
                None => (forced_end, CutKind::Forced),
            });
        }

        if offset >= floor && ch.is_whitespace() {
            boundary = Some(byte_index + ch.len_utf8());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(fragments: &[Fragment<'a>]) -> Vec<&'a str> {
        fragments.iter().map(Fragment::as_str).collect()
    }

    fn joined(fragments: &[Fragment<'_>]) -> String {
        fragments.iter().map(Fragment::as_str).collect()
    }

    #[test]
    fn test_zero_budget_rejected() {
        assert_eq!(segment("abc", 0), Err(SegmentError::ZeroBudget));
    }

    #[test]
    fn test_empty_text_single_empty_fragment() {
        let fragments = segment("", 10).unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_str(), "");
        assert_eq!(fragments[0].cut(), CutKind::Final);
    }

    #[test]
    fn test_text_within_budget() {
        let fragments = segment("fits fine", 9).unwrap();

        assert_eq!(texts(&fragments), vec!["fits fine"]);
        assert_eq!(fragments[0].cut(), CutKind::Final);
    }

    #[test]
    fn test_word_boundary_cut_keeps_space_on_left() {
        let fragments = segment("Word Word Word", 10).unwrap();

        assert_eq!(texts(&fragments), vec!["Word Word ", "Word"]);
        assert_eq!(fragments[0].cut(), CutKind::WordBoundary);
        assert_eq!(fragments[1].cut(), CutKind::Final);
    }

    #[test]
    fn test_prefers_last_whitespace_in_window() {
        let fragments = segment("aa bb cc dd ee", 9).unwrap();

        assert_eq!(fragments[0].as_str(), "aa bb cc ");
        assert_eq!(joined(&fragments), "aa bb cc dd ee");
    }

    #[test]
    fn test_whitespace_outside_window_is_ignored() {
        // Only space is at offset 1, below the window floor of 10.
        let text = format!("a {}", "b".repeat(30));
        let fragments = segment(&text, 20).unwrap();

        assert_eq!(fragments[0].cut(), CutKind::Forced);
        assert_eq!(fragments[0].char_count(), forced_cut_width(20));
    }

    #[test]
    fn test_forced_cut_on_single_long_word() {
        let text = "a".repeat(500);
        let fragments = segment(&text, 230).unwrap();

        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].char_count(), 220);
        assert_eq!(fragments[0].cut(), CutKind::Forced);
        assert_eq!(fragments[1].char_count(), 220);
        assert_eq!(fragments[1].cut(), CutKind::Forced);
        assert_eq!(fragments[2].char_count(), 60);
        assert_eq!(fragments[2].cut(), CutKind::Final);
    }

    #[test]
    fn test_forced_cut_width() {
        assert_eq!(forced_cut_width(1), 1);
        assert_eq!(forced_cut_width(2), 1);
        assert_eq!(forced_cut_width(3), 2);
        assert_eq!(forced_cut_width(20), 10);
        assert_eq!(forced_cut_width(21), 11);
        assert_eq!(forced_cut_width(230), 220);

        for budget in 2..500 {
            assert!(forced_cut_width(budget) < budget);
        }
    }

    #[test]
    fn test_budget_of_one() {
        let fragments = segment("a b", 1).unwrap();
        assert_eq!(texts(&fragments), vec!["a", " ", "b"]);
    }

    #[test]
    fn test_all_whitespace() {
        let text = " ".repeat(25);
        let fragments = segment(&text, 10).unwrap();

        assert!(fragments.iter().all(|f| f.char_count() <= 10));
        assert_eq!(joined(&fragments), text);
    }

    #[test]
    fn test_exact_budget_boundary() {
        let text = "a".repeat(160);
        assert_eq!(segment(&text, 160).unwrap().len(), 1);

        let text = "a".repeat(161);
        assert_eq!(segment(&text, 160).unwrap().len(), 2);
    }

    #[test]
    fn test_unicode_counts_characters() {
        let text = "\u{00E9}".repeat(25);
        let fragments = segment(&text, 10).unwrap();

        assert!(fragments.iter().all(|f| f.char_count() <= 10));
        assert_eq!(joined(&fragments), text);
    }

    #[test]
    fn test_newline_counts_as_whitespace() {
        let fragments = segment("first line\nsecond", 12).unwrap();
        assert_eq!(fragments[0].as_str(), "first line\n");
    }
}
