//! Configuration types for chunking.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChunkerError, Result};
use crate::{DEFAULT_BATCH_CONCURRENCY, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_STRATEGY};

/// Global chunking configuration, usually loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Default chunk size in characters
    pub default_chunk_size: usize,

    /// Default chunk overlap in characters
    pub default_chunk_overlap: usize,

    /// Strategy used when a caller names an unknown one
    pub default_strategy: String,

    /// Maximum documents split concurrently by the batch processor
    pub batch_concurrency: usize,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            default_strategy: DEFAULT_STRATEGY.to_string(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            json_logs: false,
        }
    }
}

impl ChunkingConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            default_chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            default_chunk_overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            default_strategy: std::env::var("CHUNK_STRATEGY")
                .unwrap_or_else(|_| DEFAULT_STRATEGY.to_string()),
            batch_concurrency: std::env::var("BATCH_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_BATCH_CONCURRENCY),
            json_logs: log_format_is_json(std::env::var("LOG_FORMAT").ok().as_deref()),
        }
    }

    /// Load configuration from environment variables, rejecting values that
    /// are present but cannot be parsed.
    pub fn try_from_env() -> Result<Self> {
        Ok(Self {
            default_chunk_size: parse_var("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            default_chunk_overlap: parse_var("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
            default_strategy: std::env::var("CHUNK_STRATEGY")
                .unwrap_or_else(|_| DEFAULT_STRATEGY.to_string()),
            batch_concurrency: parse_var("BATCH_CONCURRENCY", DEFAULT_BATCH_CONCURRENCY)?,
            json_logs: log_format_is_json(std::env::var("LOG_FORMAT").ok().as_deref()),
        })
    }

    /// Per-call parameters derived from the configured defaults.
    pub fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig {
            chunk_size: self.default_chunk_size,
            chunk_overlap: self.default_chunk_overlap,
        }
    }
}

/// `LOG_FORMAT=json` selects JSON logs; anything else keeps plain text.
fn log_format_is_json(value: Option<&str>) -> bool {
    value.map_or(false, |v| v.trim().eq_ignore_ascii_case("json"))
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(value) => parse_value(key, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ChunkerError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parameters for a single split call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Target upper bound on chunk length, in characters
    pub chunk_size: usize,

    /// Characters of trailing context carried into the next chunk
    pub chunk_overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkConfig {
    /// Create a config with the given chunk size and no overlap.
    pub fn with_size(size: usize) -> Self {
        Self {
            chunk_size: size,
            chunk_overlap: 0,
        }
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }
}
