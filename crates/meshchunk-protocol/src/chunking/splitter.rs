//! The truncate → segment → resolve pipeline.

use tracing::debug;

use crate::error::Result;
use crate::limits::SegmentLimits;

use super::chunk::{ChunkInfo, MessageChunk};
use super::marker::{Resolution, resolve};
use super::truncate::truncate;

/// Splits messages under a fixed pair of limits.
///
/// # Example
///
/// ```
/// use meshchunk_protocol::chunking::MessageSplitter;
/// use meshchunk_protocol::limits::SegmentLimits;
///
/// let splitter = MessageSplitter::new(SegmentLimits::new(1000, 230).unwrap());
/// let chunks = splitter.split(&"Word ".repeat(100)).unwrap();
///
/// assert_eq!(chunks.len(), 3);
/// assert!(chunks[0].finished_text().starts_with("(1/3) "));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageSplitter {
    limits: SegmentLimits,
}

impl MessageSplitter {
    /// Create a splitter for already-validated limits.
    pub fn new(limits: SegmentLimits) -> Self {
        Self { limits }
    }

    /// The limits this splitter enforces.
    pub fn limits(&self) -> &SegmentLimits {
        &self.limits
    }

    /// Truncate `text` and resolve its fragments and marker width.
    pub fn resolve<'a>(&self, text: &'a str) -> Resolution<'a> {
        resolve(
            truncate(text, self.limits.total_limit()),
            self.limits.chunk_limit(),
        )
    }

    /// Split `text` into finished chunks.
    ///
    /// # Errors
    ///
    /// Returns an error only if a finished chunk would exceed the per-chunk
    /// ceiling, which the resolver rules out for validated limits.
    pub fn split(&self, text: &str) -> Result<Vec<MessageChunk>> {
        let resolution = self.resolve(text);
        let total = resolution.total();

        let chunks = resolution
            .fragments()
            .iter()
            .enumerate()
            .map(|(i, fragment)| {
                let info = ChunkInfo::new(i + 1, total)?;
                MessageChunk::new(info, fragment.as_str(), self.limits.chunk_limit())
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            chunks = total,
            total_chars = chunks.iter().map(MessageChunk::char_count).sum::<usize>(),
            "Split message"
        );

        Ok(chunks)
    }

    /// Split `text` and return only the transmitted strings.
    ///
    /// # Errors
    ///
    /// See [`MessageSplitter::split`].
    pub fn split_text(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .split(text)?
            .into_iter()
            .map(MessageChunk::into_finished_text)
            .collect())
    }
}

/// Split a message into chunks under the given limits.
///
/// # Errors
///
/// See [`MessageSplitter::split`].
pub fn split_message(text: &str, limits: &SegmentLimits) -> Result<Vec<MessageChunk>> {
    MessageSplitter::new(*limits).split(text)
}

/// Split a message into ready-to-transmit strings.
///
/// Keeps the first `total_limit` characters of `text`, then splits them
/// into strings of at most `chunk_limit` characters. When more than one
/// string is produced each starts with a `"(i/N) "` marker.
///
/// # Errors
///
/// Returns [`ProtocolError::ChunkLimitTooSmall`](crate::ProtocolError::ChunkLimitTooSmall)
/// before doing any work if `chunk_limit` cannot hold the widest marker
/// `total_limit` could need plus one character.
///
/// # Example
///
/// ```
/// use meshchunk_protocol::segment_message;
///
/// let chunks = segment_message("", 1000, 230).unwrap();
/// assert_eq!(chunks, vec![String::new()]);
///
/// let chunks = segment_message(&"a".repeat(500), 1000, 230).unwrap();
/// assert!(chunks.len() > 1);
/// assert!(chunks.iter().all(|c| c.chars().count() <= 230));
/// ```
pub fn segment_message(text: &str, total_limit: usize, chunk_limit: usize) -> Result<Vec<String>> {
    let limits = SegmentLimits::new(total_limit, chunk_limit)?;
    MessageSplitter::new(limits).split_text(text)
}
