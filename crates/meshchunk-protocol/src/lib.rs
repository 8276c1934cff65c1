//! # meshchunk-protocol
//!
//! Bounded-length message segmentation for size-limited channels.
//!
//! This crate provides:
//! - **Truncation**: hard cap on the characters kept from a message
//! - **Segmentation**: whitespace-preferring split with a forced-cut fallback
//! - **Markers**: `"(i/N) "` part markers sized for the final chunk count
//! - **Dispatch**: paced sending over a caller-supplied transport
//!
//! ## Ceilings
//!
//! Splitting is a pure function of the message and its limits:
//! - Every finished chunk, marker included, fits the per-chunk ceiling
//! - Stripping the markers and joining the bodies gives back the truncated
//!   message exactly
//! - A message that fits in one chunk is sent verbatim with no marker
//!
//! ```
//! use meshchunk_protocol::segment_message;
//!
//! let chunks = segment_message(&"Word ".repeat(100), 1000, 230).unwrap();
//! for (i, chunk) in chunks.iter().enumerate() {
//!     assert!(chunk.starts_with(&format!("({}/{}) ", i + 1, chunks.len())));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunking;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod limits;

#[cfg(test)]
mod proptests;

pub use chunking::{
    ChunkInfo, CutKind, Fragment, MessageChunk, MessageSplitter, Resolution, segment_message,
    split_message,
};
pub use config::{DispatchConfig, LimitsConfig, SplitterConfig, SplitterConfigBuilder};
pub use dispatch::{BoxFuture, ChunkTransport, DispatchReport, Dispatcher};
pub use error::{ConfigError, DispatchError, ProtocolError, Result, SegmentError};
pub use limits::{
    DEFAULT_CHUNK_LIMIT, DEFAULT_TOTAL_LIMIT, MESH_CHUNK_LIMIT, MIN_CHUNK_LIMIT, SegmentLimits,
};
