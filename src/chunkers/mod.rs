//! Chunking strategies.

mod accumulator;
mod base;
mod fixed_window_chunker;
mod recursive_chunker;
mod separators;

pub use accumulator::{Admission, ChunkAccumulator};
pub use base::Chunker;
pub use fixed_window_chunker::FixedWindowChunker;
pub use recursive_chunker::RecursiveChunker;
pub use separators::{SeparatorHierarchy, SplitPoint, DEFAULT_SEPARATORS, MARKDOWN_SEPARATORS};
