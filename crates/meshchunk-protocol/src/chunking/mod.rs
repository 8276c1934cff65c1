//! Message segmentation.
//!
//! This module splits messages into chunks that fit a transport's
//! per-unit payload ceiling. The pipeline runs in three stages:
//!
//! 1. [`truncate`] clips the message to the overall truncation ceiling.
//! 2. [`segment`] splits text into body fragments within a body budget,
//!    preferring to break after whitespace.
//! 3. The marker resolver picks a body budget that leaves room for a
//!    `"(i/N) "` marker sized for the final chunk count.
//!
//! # Limits
//!
//! - Lengths are character counts, not byte lengths (supports Unicode)
//! - A lone chunk carries no marker and equals the truncated message
//! - Every finished chunk, marker included, fits the per-chunk ceiling
//!
//! # Example
//!
//! ```
//! use meshchunk_protocol::chunking::split_message;
//! use meshchunk_protocol::limits::SegmentLimits;
//!
//! let limits = SegmentLimits::default();
//!
//! let chunks = split_message("This is a short message", &limits).unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].marker(), None);
//!
//! let long_message = "a".repeat(600);
//! let chunks = split_message(&long_message, &limits).unwrap();
//! assert_eq!(chunks.len(), 3);
//! assert_eq!(chunks[0].info().index(), 1);
//! assert_eq!(chunks[0].info().total(), 3);
//! assert!(chunks[0].finished_text().starts_with("(1/3) "));
//! ```

mod chunk;
mod marker;
mod segment;
mod splitter;
mod truncate;

pub use chunk::{ChunkInfo, MessageChunk};
pub use marker::{Resolution, format_marker, strip_marker};
pub use segment::{CutKind, Fragment, forced_cut_width, segment};
pub use splitter::{MessageSplitter, segment_message, split_message};
pub use truncate::truncate;
