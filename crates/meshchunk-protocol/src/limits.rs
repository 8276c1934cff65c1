//! Segmentation limits and constants.
//!
//! All size limits are defined here for consistent enforcement. Every
//! length in this crate is a character count, not a byte length.

use crate::error::{ProtocolError, Result};

// === Ceilings ===

/// Default truncation ceiling: characters retained from a source message.
pub const DEFAULT_TOTAL_LIMIT: usize = 1000;

/// Default per-chunk ceiling for chat bridges (marker included).
pub const DEFAULT_CHUNK_LIMIT: usize = 230;

/// Per-chunk ceiling for direct mesh radio sends.
pub const MESH_CHUNK_LIMIT: usize = 160;

/// Smallest per-chunk ceiling that can carry one body character behind the
/// narrowest marker (`"(1/2) "`).
pub const MIN_CHUNK_LIMIT: usize = 7;

// === Markers ===

/// Characters a marker spends on punctuation: `(`, `/`, `)` and the
/// trailing space.
pub const MARKER_OVERHEAD: usize = 4;

/// Fixed-point iterations allowed before the resolver reserves the
/// worst-case marker width.
pub const MAX_MARKER_ITERATIONS: usize = 5;

// === Segmenter ===

/// How far short of the body budget a forced cut lands.
///
/// Capped at half the budget so that tiny budgets still make progress.
pub const FORCED_CUT_SLACK: usize = 10;

/// Number of decimal digits in `n` (`digits(0) == 1`).
pub fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Width reserved for a `"(i/N) "` marker when the sequence holds
/// `total` chunks.
///
/// Both `i` and `N` are budgeted at the width of `N`, so every marker in
/// the sequence fits the same reservation.
pub fn marker_width(total: usize) -> usize {
    2 * digits(total) + MARKER_OVERHEAD
}

/// Smallest per-chunk ceiling that is safe for a given truncation ceiling.
///
/// A truncated message never yields more chunks than it has characters, so
/// reserving the marker for `total_limit` chunks plus one body character
/// always leaves a non-empty body budget.
pub fn required_chunk_limit(total_limit: usize) -> usize {
    (marker_width(total_limit.max(1)) + 1).max(MIN_CHUNK_LIMIT)
}

/// Validated pair of ceilings driving one segmentation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentLimits {
    total_limit: usize,
    chunk_limit: usize,
}

impl SegmentLimits {
    /// Create limits after checking that `chunk_limit` can always hold a
    /// marker plus at least one body character.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ChunkLimitTooSmall`] when `chunk_limit` is
    /// below [`required_chunk_limit`] for `total_limit`.
    pub fn new(total_limit: usize, chunk_limit: usize) -> Result<Self> {
        let min = required_chunk_limit(total_limit);
        if chunk_limit < min {
            return Err(ProtocolError::ChunkLimitTooSmall {
                min,
                actual: chunk_limit,
            });
        }

        Ok(Self {
            total_limit,
            chunk_limit,
        })
    }

    /// Limits for direct mesh radio sends.
    pub fn mesh() -> Self {
        Self {
            total_limit: DEFAULT_TOTAL_LIMIT,
            chunk_limit: MESH_CHUNK_LIMIT,
        }
    }

    /// Truncation ceiling.
    pub fn total_limit(&self) -> usize {
        self.total_limit
    }

    /// Per-chunk ceiling, marker included.
    pub fn chunk_limit(&self) -> usize {
        self.chunk_limit
    }
}

impl Default for SegmentLimits {
    fn default() -> Self {
        Self {
            total_limit: DEFAULT_TOTAL_LIMIT,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }
}
