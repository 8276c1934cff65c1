//! Configuration for message splitting and dispatch.
//!
//! # Example
//!
//! ```
//! use meshchunk_protocol::config::{SplitterConfig, SplitterConfigBuilder};
//! use std::time::Duration;
//!
//! // Use defaults
//! let config = SplitterConfig::default();
//!
//! // Or use builder for customization
//! let config = SplitterConfigBuilder::new()
//!     .with_chunk_limit(160)
//!     .with_split_delay(Duration::from_secs(1))
//!     .build();
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ConfigError, ProtocolError};
use crate::limits::{
    DEFAULT_CHUNK_LIMIT, DEFAULT_TOTAL_LIMIT, MESH_CHUNK_LIMIT, SegmentLimits,
    required_chunk_limit,
};

/// Default wait between consecutive chunks, in milliseconds.
const DEFAULT_SPLIT_DELAY_MS: u64 = 2500;

/// Default number of chunks sent before an extra throttle pause.
const DEFAULT_THROTTLE_EVERY: usize = 4;

/// Default extra throttle pause, in seconds.
const DEFAULT_THROTTLE_PAUSE_SECS: u64 = 6;

/// Top-level splitter configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Truncation and per-chunk ceilings.
    pub limits: LimitsConfig,

    /// Pacing between chunk sends.
    pub dispatch: DispatchConfig,
}

impl SplitterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> SplitterConfigBuilder {
        SplitterConfigBuilder::new()
    }

    /// Configuration for direct mesh radio sends.
    pub fn mesh() -> Self {
        SplitterConfigBuilder::new()
            .with_chunk_limit(MESH_CHUNK_LIMIT)
            .build()
    }

    /// Validate the configuration.
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = required_chunk_limit(self.limits.total_limit);
        if self.limits.chunk_limit < min {
            return Err(ConfigError::InvalidValue {
                field: "limits.chunk_limit".into(),
                reason: format!(
                    "must be at least {min} to fit a marker for {} characters",
                    self.limits.total_limit
                ),
            });
        }

        if self.dispatch.throttle_every > 0 && self.dispatch.throttle_pause.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.throttle_pause".into(),
                reason: "throttle pause must be greater than zero when throttling is enabled"
                    .into(),
            });
        }

        Ok(())
    }

    /// Validated segmentation limits.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ChunkLimitTooSmall`] if the configured
    /// chunk limit cannot hold a marker plus one character.
    pub fn segment_limits(&self) -> Result<SegmentLimits, ProtocolError> {
        SegmentLimits::new(self.limits.total_limit, self.limits.chunk_limit)
    }
}

/// Truncation and per-chunk ceilings, in characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Characters retained from a message before splitting.
    pub total_limit: usize,

    /// Characters allowed in one transmitted chunk, marker included.
    ///
    /// Match this to the transport's payload ceiling: a chat API's
    /// message length, or a mesh radio packet's text payload.
    pub chunk_limit: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            total_limit: DEFAULT_TOTAL_LIMIT,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }
}

/// Pacing applied while sending the chunks of one message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Wait between consecutive chunks.
    ///
    /// Keeps a slow radio link from dropping back-to-back packets.
    #[serde(with = "duration_serde")]
    pub split_delay: Duration,

    /// Insert [`throttle_pause`](Self::throttle_pause) after every this
    /// many chunks. Zero disables throttling.
    pub throttle_every: usize,

    /// Extra pause applied on top of the split delay when throttling.
    #[serde(with = "duration_serde")]
    pub throttle_pause: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            split_delay: Duration::from_millis(DEFAULT_SPLIT_DELAY_MS),
            throttle_every: DEFAULT_THROTTLE_EVERY,
            throttle_pause: Duration::from_secs(DEFAULT_THROTTLE_PAUSE_SECS),
        }
    }
}

impl DispatchConfig {
    /// Pacing with no waits at all.
    pub fn immediate() -> Self {
        Self {
            split_delay: Duration::ZERO,
            throttle_every: 0,
            throttle_pause: Duration::ZERO,
        }
    }
}

/// Builder for constructing `SplitterConfig` with custom values.
#[derive(Clone, Debug, Default)]
pub struct SplitterConfigBuilder {
    config: SplitterConfig,
}

impl SplitterConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: SplitterConfig::default(),
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> SplitterConfig {
        self.config
    }

    /// Build and validate the configuration.
    ///
    /// Returns an error if validation fails.
    pub fn build_validated(self) -> Result<SplitterConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }

    // ===== Limits =====

    /// Set the truncation ceiling.
    pub fn with_total_limit(mut self, total_limit: usize) -> Self {
        self.config.limits.total_limit = total_limit;
        self
    }

    /// Set the per-chunk ceiling.
    pub fn with_chunk_limit(mut self, chunk_limit: usize) -> Self {
        self.config.limits.chunk_limit = chunk_limit;
        self
    }

    // ===== Dispatch =====

    /// Set the wait between consecutive chunks.
    pub fn with_split_delay(mut self, delay: Duration) -> Self {
        self.config.dispatch.split_delay = delay;
        self
    }

    /// Pause for `pause` after every `every` chunks.
    pub fn with_throttle(mut self, every: usize, pause: Duration) -> Self {
        self.config.dispatch.throttle_every = every;
        self.config.dispatch.throttle_pause = pause;
        self
    }

    /// Send chunks back to back.
    pub fn without_delays(mut self) -> Self {
        self.config.dispatch = DispatchConfig::immediate();
        self
    }
}

/// Serde helper for Duration.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    /// Serializable representation of Duration.
    #[derive(Serialize, Deserialize)]
    struct DurationRepr {
        secs: u64,
        nanos: u32,
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let repr = DurationRepr {
            secs: duration.as_secs(),
            nanos: duration.subsec_nanos(),
        };
        repr.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = DurationRepr::deserialize(deserializer)?;
        Ok(Duration::new(repr.secs, repr.nanos))
    }
}
