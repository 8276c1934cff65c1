//! Paced dispatch of finished chunks over a caller-supplied transport.
//!
//! The transport itself lives outside this crate; this module only fixes
//! the order chunks go out in and the waits between them. A message is
//! always split completely before the first chunk is sent, since every
//! marker depends on the final chunk count.
//!
//! There is no retry or acknowledgement handling here. The first transport
//! failure stops the dispatch and is reported to the caller.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::chunking::MessageChunk;
use crate::config::DispatchConfig;
use crate::error::DispatchError;

/// Boxed future type for transport operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for the transport that carries chunks.
///
/// Implemented by the surrounding application for its radio interface or
/// chat API client.
pub trait ChunkTransport: Send + Sync {
    /// Send one chunk's finished text.
    ///
    /// Returns a human-readable reason on failure.
    fn send_chunk<'a>(&'a self, chunk: &'a MessageChunk) -> BoxFuture<'a, Result<(), String>>;
}

/// Summary of a completed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// Chunks handed to the transport.
    pub sent: usize,
    /// Chunks in the sequence.
    pub total: usize,
}

/// Sends chunk sequences with the configured pacing.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the given pacing.
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// The pacing in use.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Wait owed after chunk `index` (1-based) of `total`.
    pub fn pause_after(&self, index: usize, total: usize) -> Duration {
        if index >= total {
            return Duration::ZERO;
        }

        let mut pause = self.config.split_delay;
        if self.config.throttle_every > 0 && index % self.config.throttle_every == 0 {
            pause += self.config.throttle_pause;
        }
        pause
    }

    /// Send `chunks` in order through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] for the first chunk the
    /// transport rejects; chunks before it have already been sent.
    #[instrument(skip(self, transport, chunks), fields(total = chunks.len()))]
    pub async fn send<T>(
        &self,
        transport: &T,
        chunks: &[MessageChunk],
    ) -> Result<DispatchReport, DispatchError>
    where
        T: ChunkTransport + ?Sized,
    {
        let total = chunks.len();

        for (i, chunk) in chunks.iter().enumerate() {
            let index = i + 1;

            transport
                .send_chunk(chunk)
                .await
                .map_err(|reason| DispatchError::Transport {
                    index,
                    total,
                    reason,
                })?;

            debug!(index, total, chars = chunk.char_count(), "Sent chunk");

            let pause = self.pause_after(index, total);
            if pause > self.config.split_delay {
                info!(
                    index,
                    total,
                    pause_ms = pause.as_millis() as u64,
                    "Throttling chunk dispatch"
                );
            }
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        Ok(DispatchReport { sent: total, total })
    }
}
