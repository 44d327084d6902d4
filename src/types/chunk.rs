//! Chunk output definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The chunks produced for one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunks {
    /// ID of the source item the chunks came from
    pub source_item_id: Uuid,

    /// Name of the strategy that actually ran
    pub strategy: String,

    /// Ordered, trimmed, non-empty chunk texts
    pub chunks: Vec<String>,
}

impl DocumentChunks {
    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if no chunks were produced.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
