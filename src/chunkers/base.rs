//! Base trait for all chunkers.

use crate::types::ChunkConfig;

/// The core trait that all chunking strategies implement.
///
/// A chunker takes a text and splits it into an ordered sequence of bounded
/// chunks suitable for embedding. Lengths are measured in unicode code
/// points, not bytes or model tokens.
///
/// Implementations are pure: they keep no state between calls, so one
/// instance can serve any number of threads at once.
pub trait Chunker: Send + Sync {
    /// Get the name of this chunker.
    ///
    /// This is the alias it is registered under.
    fn name(&self) -> &'static str;

    /// Split `text` into chunks of at most `chunk_size` characters, carrying
    /// up to `chunk_overlap` characters of context between neighbours.
    ///
    /// Never fails. A `chunk_size` of zero or an overlap at least as large as
    /// the chunk size is handled by a documented defensive default.
    fn split_text(&self, text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String>;

    /// Split `text` using the parameters in `config`.
    fn chunk(&self, text: &str, config: &ChunkConfig) -> Vec<String> {
        self.split_text(text, config.chunk_size, config.chunk_overlap)
    }

    /// Get the description of this chunker.
    fn description(&self) -> &'static str {
        "A text chunker"
    }
}

/// Length of `text` in unicode code points.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
