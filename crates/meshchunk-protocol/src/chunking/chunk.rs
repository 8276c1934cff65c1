//! Finished chunk types.
//!
//! A [`MessageChunk`] is what actually goes over the wire: an optional
//! `"(i/N) "` marker followed by the body text.

use crate::error::{ProtocolError, Result};

use super::marker::format_marker;

/// Position of a chunk within its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkInfo {
    /// One-based index of this chunk within the message.
    index: usize,
    /// Total number of chunks in the message.
    total: usize,
}

impl ChunkInfo {
    /// Chunk info for a message that fits in one chunk.
    pub fn single() -> Self {
        Self { index: 1, total: 1 }
    }

    /// Chunk info for chunk `index` (1-based) of `total`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn new(index: usize, total: usize) -> Result<Self> {
        let info = Self { index, total };
        info.validate()?;
        Ok(info)
    }

    /// Validate the chunk info.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidChunkIndex`] unless
    /// `1 <= index <= total`.
    pub fn validate(&self) -> Result<()> {
        if self.index == 0 || self.index > self.total {
            return Err(ProtocolError::InvalidChunkIndex {
                index: self.index,
                total: self.total,
            });
        }

        Ok(())
    }

    /// Check if this is the first chunk.
    pub fn is_first(&self) -> bool {
        self.index == 1
    }

    /// Check if this is the last chunk.
    pub fn is_last(&self) -> bool {
        self.index == self.total
    }

    /// Get the 1-based chunk index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the total number of chunks.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Marker text for this position, or `None` for a lone chunk.
    pub fn marker(&self) -> Option<String> {
        (self.total > 1).then(|| format_marker(self.index, self.total))
    }
}

/// A single ready-to-transmit chunk of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChunk {
    /// Chunk position.
    info: ChunkInfo,
    /// Marker followed by body.
    finished_text: String,
    /// Byte offset where the body starts within `finished_text`.
    body_start: usize,
}

impl MessageChunk {
    /// Create a chunk from its position and body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ChunkTooLong`] if the marker plus body
    /// exceeds `chunk_limit` characters.
    pub fn new(info: ChunkInfo, body: &str, chunk_limit: usize) -> Result<Self> {
        let mut finished_text = info.marker().unwrap_or_default();
        let body_start = finished_text.len();
        finished_text.push_str(body);

        let char_count = finished_text.chars().count();
        if char_count > chunk_limit {
            return Err(ProtocolError::ChunkTooLong {
                index: info.index(),
                max: chunk_limit,
                actual: char_count,
            });
        }

        Ok(Self {
            info,
            finished_text,
            body_start,
        })
    }

    /// Get the chunk info.
    pub fn info(&self) -> &ChunkInfo {
        &self.info
    }

    /// Body text without the marker.
    pub fn body(&self) -> &str {
        &self.finished_text[self.body_start..]
    }

    /// The `"(i/N) "` prefix, if any.
    pub fn marker(&self) -> Option<&str> {
        (self.body_start > 0).then(|| &self.finished_text[..self.body_start])
    }

    /// Marker and body as transmitted.
    pub fn finished_text(&self) -> &str {
        &self.finished_text
    }

    /// Length of the transmitted text in characters.
    pub fn char_count(&self) -> usize {
        self.finished_text.chars().count()
    }

    /// Consume the chunk and return the transmitted text.
    pub fn into_finished_text(self) -> String {
        self.finished_text
    }
}
