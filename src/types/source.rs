//! Source document definitions for batch chunking.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChunkConfig;

/// A document to be chunked.
///
/// The optional fields override the batch-wide settings for this item only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceItem {
    /// Unique identifier for this document
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// The text to chunk
    pub content: String,

    /// Strategy alias (e.g. "fixed", "recursive")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Chunk size override, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,

    /// Chunk overlap override, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_overlap: Option<usize>,
}

impl SourceItem {
    /// Create an item with a fresh id and no overrides.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            strategy: None,
            chunk_size: None,
            chunk_overlap: None,
        }
    }

    /// Select a strategy for this item.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Override chunk parameters for this item.
    pub fn with_config(mut self, config: ChunkConfig) -> Self {
        self.chunk_size = Some(config.chunk_size);
        self.chunk_overlap = Some(config.chunk_overlap);
        self
    }

    /// Resolve the effective parameters against batch-wide defaults.
    pub fn effective_config(&self, defaults: &ChunkConfig) -> ChunkConfig {
        ChunkConfig {
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            chunk_overlap: self.chunk_overlap.unwrap_or(defaults.chunk_overlap),
        }
    }

    /// Content length in characters.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}
