//! Part markers and the fixed-point search for a self-consistent width.
//!
//! A `"(i/N) "` marker is paid for out of the same per-chunk ceiling as the
//! body, but `N` is only known once the body has been segmented. The
//! resolver guesses `N`, reserves the marker width for that guess, segments
//! again and stops as soon as the real count needs no more digits than the
//! guess. The loop is capped; past the cap the width for the largest count
//! the text could ever produce is reserved instead.

use tracing::{debug, warn};

use crate::limits::{MAX_MARKER_ITERATIONS, digits, marker_width};

use super::segment::{Fragment, split_fragments};

/// Render the marker for chunk `index` (1-based) of `total`.
pub fn format_marker(index: usize, total: usize) -> String {
    format!("({index}/{total}) ")
}

/// Split a leading `"(i/N) "` marker off `text`.
///
/// Returns `(index, total, body)` when `text` starts with a well-formed
/// marker, `None` otherwise.
///
/// # Example
///
/// ```
/// use meshchunk_protocol::chunking::strip_marker;
///
/// assert_eq!(strip_marker("(2/3) hello"), Some((2, 3, "hello")));
/// assert_eq!(strip_marker("hello"), None);
/// ```
pub fn strip_marker(text: &str) -> Option<(usize, usize, &str)> {
    let inner = text.strip_prefix('(')?;
    let (index, inner) = inner.split_once('/')?;
    let (total, body) = inner.split_once(") ")?;

    if !is_ascii_number(index) || !is_ascii_number(total) {
        return None;
    }

    Some((index.parse().ok()?, total.parse().ok()?, body))
}

fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Outcome of marker resolution for one truncated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    fragments: Vec<Fragment<'a>>,
    body_budget: usize,
    iterations: usize,
    fell_back: bool,
}

impl<'a> Resolution<'a> {
    /// Body fragments in transmission order.
    pub fn fragments(&self) -> &[Fragment<'a>] {
        &self.fragments
    }

    /// Final chunk count `N`.
    pub fn total(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the chunks carry `"(i/N) "` markers.
    pub fn needs_markers(&self) -> bool {
        self.total() > 1
    }

    /// Body budget the final segmentation ran with.
    pub fn body_budget(&self) -> usize {
        self.body_budget
    }

    /// Re-segmentation passes made after the unmarked attempt.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the iteration cap was hit and the worst-case width reserved.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }
}

/// Segment `text` so that every marked chunk fits `chunk_limit`.
///
/// `text` must already be truncated to a length whose worst-case marker
/// still leaves room for a body character within `chunk_limit`.
pub(crate) fn resolve(text: &str, chunk_limit: usize) -> Resolution<'_> {
    resolve_with_cap(text, chunk_limit, MAX_MARKER_ITERATIONS)
}

fn resolve_with_cap(text: &str, chunk_limit: usize, max_iterations: usize) -> Resolution<'_> {
    let unmarked = split_fragments(text, chunk_limit);
    if unmarked.len() == 1 {
        return Resolution {
            fragments: unmarked,
            body_budget: chunk_limit,
            iterations: 0,
            fell_back: false,
        };
    }

    let mut assumed = unmarked.len();
    for iteration in 1..=max_iterations {
        let budget = body_budget(chunk_limit, assumed);
        let fragments = split_fragments(text, budget);

        if digits(fragments.len()) <= digits(assumed) {
            debug!(
                chunks = fragments.len(),
                body_budget = budget,
                iterations = iteration,
                "Resolved marker width"
            );
            return Resolution {
                fragments,
                body_budget: budget,
                iterations: iteration,
                fell_back: false,
            };
        }

        assumed = fragments.len();
    }

    // Every fragment holds at least one character.
    let worst_case = text.chars().count();
    let budget = body_budget(chunk_limit, worst_case);
    let fragments = split_fragments(text, budget);

    warn!(
        chunks = fragments.len(),
        body_budget = budget,
        max_iterations,
        "Marker width did not converge; reserved worst-case width"
    );

    Resolution {
        fragments,
        body_budget: budget,
        iterations: max_iterations,
        fell_back: true,
    }
}

fn body_budget(chunk_limit: usize, total: usize) -> usize {
    debug_assert!(chunk_limit > marker_width(total));
    chunk_limit.saturating_sub(marker_width(total)).max(1)
}
