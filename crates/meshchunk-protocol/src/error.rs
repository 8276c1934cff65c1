//! Error types for segmentation and dispatch.

use thiserror::Error;

/// Errors raised by the segmenter before any text is processed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentError {
    /// Body budget of zero characters.
    #[error("Body budget must be at least one character")]
    ZeroBudget,
}

/// Errors that can occur while splitting a message into chunks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Per-chunk ceiling cannot hold a marker and one body character.
    #[error("Chunk limit too small: need at least {min} characters, got {actual}")]
    ChunkLimitTooSmall {
        /// Smallest accepted chunk limit.
        min: usize,
        /// Configured chunk limit.
        actual: usize,
    },

    /// A chunk's finished text exceeds the per-chunk ceiling.
    #[error("Chunk {index} too long: max {max} characters, got {actual}")]
    ChunkTooLong {
        /// 1-based chunk index.
        index: usize,
        /// Per-chunk ceiling.
        max: usize,
        /// Actual character count.
        actual: usize,
    },

    /// Invalid chunk index.
    #[error("Invalid chunk index: {index} not in 1..={total}")]
    InvalidChunkIndex {
        /// The invalid 1-based index.
        index: usize,
        /// Total number of chunks.
        total: usize,
    },

    /// Segmenter rejected its input.
    #[error("Segment error: {0}")]
    Segment(#[from] SegmentError),
}

/// Result type for segmentation operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors reported while pacing chunks over a transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The transport refused a chunk. Earlier chunks were already sent.
    #[error("Transport failed on chunk {index} of {total}: {reason}")]
    Transport {
        /// 1-based index of the failed chunk.
        index: usize,
        /// Total chunks in the sequence.
        total: usize,
        /// Transport-supplied reason.
        reason: String,
    },
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}
