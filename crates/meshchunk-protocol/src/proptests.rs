//! Property-based tests for segmentation.
//!
//! These tests verify the splitting invariants hold for arbitrary inputs:
//!
//! - Every finished chunk fits the per-chunk ceiling
//! - Stripped bodies reconstruct the truncated message
//! - Markers number chunks consistently
//! - Fragments never exceed their body budget

use proptest::prelude::*;

use crate::chunking::{CutKind, segment, segment_message, strip_marker, truncate};
use crate::limits::{DEFAULT_CHUNK_LIMIT, DEFAULT_TOTAL_LIMIT, required_chunk_limit};

/// Arbitrary valid `(total_limit, chunk_limit)` pair.
fn limits() -> impl Strategy<Value = (usize, usize)> {
    (0usize..1500).prop_flat_map(|total| (Just(total), required_chunk_limit(total)..300))
}

/// Text mixing words, spaces and newlines.
fn wordy_text() -> impl Strategy<Value = String> {
    "([a-zA-Z]{1,30}[ \n]{1,3}){0,120}"
}

fn strip_all(chunks: &[String]) -> String {
    if chunks.len() == 1 {
        return chunks[0].clone();
    }
    chunks
        .iter()
        .map(|chunk| strip_marker(chunk).map_or("", |(_, _, body)| body))
        .collect()
}

// ==================== Segmenter Property Tests ====================

proptest! {
    /// Fragments fit the budget and rebuild the input.
    #[test]
    fn fragments_fit_and_rebuild(content in ".{0,600}", budget in 1usize..250) {
        let fragments = segment(&content, budget).unwrap();

        prop_assert!(!fragments.is_empty());
        for fragment in &fragments {
            prop_assert!(fragment.char_count() <= budget);
        }

        let rebuilt: String = fragments.iter().map(|f| f.as_str()).collect();
        prop_assert_eq!(rebuilt, content);
    }

    /// Only the last fragment is `Final`, and word-boundary cuts end in whitespace.
    #[test]
    fn cut_kinds_are_consistent(content in wordy_text(), budget in 1usize..120) {
        let fragments = segment(&content, budget).unwrap();
        let last = fragments.len() - 1;

        for (i, fragment) in fragments.iter().enumerate() {
            match fragment.cut() {
                CutKind::Final => {
                    prop_assert_eq!(i, last);
                }
                CutKind::WordBoundary => {
                    prop_assert!(fragment.as_str().ends_with(char::is_whitespace));
                }
                CutKind::Forced => {
                    prop_assert!(fragment.char_count() >= 1);
                }
            }
        }
    }

    /// Truncation keeps exactly the first `min(len, limit)` characters.
    #[test]
    fn truncate_keeps_prefix(content in ".{0,400}", limit in 0usize..500) {
        let truncated = truncate(&content, limit);
        let expected: String = content.chars().take(limit).collect();
        prop_assert_eq!(truncated, expected.as_str());
    }
}

// ==================== Splitter Property Tests ====================

proptest! {
    /// Every finished chunk fits the per-chunk ceiling.
    #[test]
    fn chunks_fit_ceiling(content in ".{0,1200}", (total, chunk) in limits()) {
        let chunks = segment_message(&content, total, chunk).unwrap();
        for c in &chunks {
            prop_assert!(c.chars().count() <= chunk);
        }
    }

    /// Stripped bodies reconstruct the truncated message.
    #[test]
    fn bodies_reconstruct_truncated(content in wordy_text(), (total, chunk) in limits()) {
        let chunks = segment_message(&content, total, chunk).unwrap();
        let expected: String = content.chars().take(total).collect();
        prop_assert_eq!(strip_all(&chunks), expected);
    }

    /// Chunk `i` of `N > 1` starts with exactly `"(i/N) "`.
    #[test]
    fn markers_are_consistent(content in ".{0,1200}", (total, chunk) in limits()) {
        let chunks = segment_message(&content, total, chunk).unwrap();
        let n = chunks.len();

        if n > 1 {
            for (i, c) in chunks.iter().enumerate() {
                let prefix = format!("({}/{}) ", i + 1, n);
                prop_assert!(c.starts_with(&prefix));
            }
        }
    }

    /// A single chunk is the truncated message verbatim.
    #[test]
    fn single_chunk_is_verbatim(content in ".{0,230}") {
        let chunks = segment_message(&content, DEFAULT_TOTAL_LIMIT, DEFAULT_CHUNK_LIMIT).unwrap();
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(&chunks[0], &content);
    }

    /// Splitting is deterministic.
    #[test]
    fn splitting_is_deterministic(content in ".{0,1200}", (total, chunk) in limits()) {
        let first = segment_message(&content, total, chunk).unwrap();
        let second = segment_message(&content, total, chunk).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Limits below the required chunk width are always rejected.
    #[test]
    fn undersized_chunk_limit_rejected(total in 0usize..5000, shortfall in 1usize..7) {
        let chunk = required_chunk_limit(total).saturating_sub(shortfall);
        prop_assert!(segment_message("hello", total, chunk).is_err());
    }
}
