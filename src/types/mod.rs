//! Core types for the chunking library.

mod chunk;
mod config;
mod source;

pub use chunk::DocumentChunks;
pub use config::{ChunkConfig, ChunkingConfig};
pub use source::SourceItem;
