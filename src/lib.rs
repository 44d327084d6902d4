//! Text Splitting Library
//!
//! A hierarchical text-chunking engine for RAG ingestion pipelines.
//! Splits long unicode text into bounded, overlapping chunks ready for
//! embedding, using either a fixed sliding window or recursive separator
//! fallback. Lengths are measured in unicode code points.

pub mod batch;
pub mod chunkers;
pub mod error;
pub mod registry;
pub mod types;

pub use batch::{BatchConfig, BatchProcessor, BatchResult};
pub use chunkers::{Chunker, FixedWindowChunker, RecursiveChunker, SeparatorHierarchy};
pub use error::{ChunkerError, Result};
pub use registry::SplitterRegistry;
pub use types::{ChunkConfig, ChunkingConfig, DocumentChunks, SourceItem};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::types::*;
    pub use crate::chunkers::{Chunker, FixedWindowChunker, RecursiveChunker, SeparatorHierarchy};
    pub use crate::registry::SplitterRegistry;
    pub use crate::batch::*;
}

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default chunk overlap in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Strategy that unknown names resolve to
pub const DEFAULT_STRATEGY: &str = "recursive";

/// Default number of documents split concurrently in a batch
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Split `text` with the named strategy from the process-wide registry.
///
/// Unknown names fall back to the default strategy.
pub fn split_text(strategy: &str, text: &str, chunk_size: usize, chunk_overlap: usize) -> Result<Vec<String>> {
    registry::global().split_text(strategy, text, chunk_size, chunk_overlap)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "# Retrieval\n\n\
                          Retrieval pipelines embed text in pieces. \
                          Each piece should be small enough for the embedding model, \
                          yet large enough to carry meaning.\n\
                          ## Overlap\n\
                          Overlap keeps context flowing between neighbours. It repeats a tail.";

    /// Assert that `chunks` cover every non-whitespace code point of
    /// `original` in order: each chunk starts inside or right after the text
    /// already covered, and covers something new.
    pub(crate) fn assert_covers(original: &str, chunks: &[String], label: &str) {
        let source: Vec<char> = original.chars().filter(|c| !c.is_whitespace()).collect();
        let mut covered: usize = 0;

        for chunk in chunks {
            let piece: Vec<char> = chunk.chars().filter(|c| !c.is_whitespace()).collect();
            let lo = (covered + 1).saturating_sub(piece.len());
            let hi = covered.min(source.len().saturating_sub(piece.len()));

            let start = (lo..=hi)
                .rev()
                .find(|&start| source[start..start + piece.len()] == piece[..]);
            let Some(start) = start else {
                panic!("{label}: {chunk:?} does not continue the text covered so far ({covered} chars)");
            };

            covered = start + piece.len();
        }

        assert_eq!(covered, source.len(), "{label}: text not fully covered");
    }

    #[test]
    fn test_split_text_with_global_registry() {
        let chunks = split_text("fixed", "abcdefghij", 4, 1).unwrap();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);

        let chunks = split_text("no-such-strategy", "", 100, 10).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_every_strategy_honours_common_properties() {
        let registry = SplitterRegistry::default();

        for (name, _) in registry.list() {
            let chunker = registry.get(&name).unwrap();
            for size in [1, 7, 16, 40, 1000] {
                for overlap in [0, 1, 4, size, size + 5] {
                    let label = format!("{name} {size}/{overlap}");
                    let chunks = chunker.split_text(SAMPLE, size, overlap);

                    assert!(!chunks.is_empty(), "{label}");
                    assert!(chunks.iter().all(|c| !c.trim().is_empty()), "{label}");
                    assert!(
                        chunks.iter().all(|c| c.chars().count() <= size),
                        "{label} exceeded bound"
                    );
                    assert_covers(SAMPLE, &chunks, &label);
                    assert_eq!(chunks, chunker.split_text(SAMPLE, size, overlap));
                }
            }

            // Non-positive size: the whole text comes back as one chunk.
            assert_eq!(chunker.split_text(SAMPLE, 0, 0).len(), 1);
        }
    }

    #[test]
    fn test_assert_covers_rejects_gaps() {
        let chunks = vec!["abc".to_string(), "ghi".to_string()];
        let result = std::panic::catch_unwind(|| assert_covers("abcdefghi", &chunks, "gap"));
        assert!(result.is_err());

        let chunks = vec!["ab c".to_string(), "c de".to_string()];
        assert_covers("ab cde", &chunks, "overlap");
    }
}
