//! Fixed-size sliding window chunker.

use tracing::debug;

use super::base::Chunker;

/// Sliding window chunker that splits text into fixed-size character windows.
///
/// This is the most basic chunker that doesn't consider semantic boundaries
/// and may cut words in half. It's fast and predictable, useful as a
/// fallback and as a baseline for the recursive chunker.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWindowChunker;

impl FixedWindowChunker {
    /// Create a new fixed window chunker.
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for FixedWindowChunker {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn description(&self) -> &'static str {
        "Splits text into fixed-size character windows with optional overlap"
    }

    fn split_text(&self, text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
        if text.trim().is_empty() {
            return vec![];
        }

        if chunk_size == 0 {
            return vec![text.to_string()];
        }

        // Byte offset of every code point, plus the end of the text, so that
        // windows are measured in characters but sliced on byte boundaries.
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = offsets.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + chunk_size).min(char_count);
            let window = &text[offsets[start]..offsets[end]];

            if !window.trim().is_empty() {
                chunks.push(window.to_string());
            }

            // Stop if we've reached the end
            if end >= char_count {
                break;
            }

            let next = end.saturating_sub(chunk_overlap);
            start = if next > start { next } else { end };
        }

        debug!(
            chunk_size,
            chunk_overlap,
            chunks = chunks.len(),
            "Fixed window split complete"
        );

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_content() {
        let chunker = FixedWindowChunker::new();
        assert!(chunker.split_text("", 10, 2).is_empty());
        assert!(chunker.split_text("", 0, 0).is_empty());
    }

    #[test]
    fn test_small_content() {
        let chunker = FixedWindowChunker::new();
        let chunks = chunker.chunk("Hello, world!", &ChunkConfig::with_size(100));
        assert_eq!(chunks, vec!["Hello, world!"]);
    }

    #[test]
    fn test_windows_advance_by_size_minus_overlap() {
        let chunker = FixedWindowChunker::new();
        let chunks = chunker.split_text("abcdefghij", 4, 1);
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn test_last_window_is_short() {
        let chunker = FixedWindowChunker::new();
        let chunks = chunker.split_text("abcdefghij", 4, 0);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_zero_size_returns_whole_text() {
        let chunker = FixedWindowChunker::new();
        assert_eq!(chunker.split_text("hello", 0, 0), vec!["hello"]);
    }

    #[test]
    fn test_overlap_clamped_to_forward_progress() {
        let chunker = FixedWindowChunker::new();
        for overlap in [4, 5, 100] {
            let chunks = chunker.split_text("abcdefghij", 4, overlap);
            assert_eq!(chunks, vec!["abcd", "efgh", "ij"], "overlap {overlap}");
        }
    }

    #[test]
    fn test_multibyte_windows() {
        let chunker = FixedWindowChunker::new();
        let chunks = chunker.split_text("日本語のテキスト", 3, 1);
        assert_eq!(chunks, vec!["日本語", "語のテ", "テキス", "スト"]);
    }

    #[test]
    fn test_whitespace_only_windows_skipped() {
        let chunker = FixedWindowChunker::new();
        let chunks = chunker.split_text("ab      cd", 3, 0);
        assert_eq!(chunks, vec!["ab ", "  c", "d"]);
    }

    #[test]
    fn test_chunk_overlap() {
        let chunker = FixedWindowChunker::new();
        let content = "This is a test sentence. ".repeat(50);
        let config = ChunkConfig::with_size(50).with_overlap(10);
        let chunks = chunker.chunk(&content, &config);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50);
        }
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(40).collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn test_windows_rebuild_text() {
        let chunker = FixedWindowChunker::new();
        let text = "Sliding windows repeat a fixed tail of every chunk at the head of the next.";

        // No window of two or more characters is whitespace only here.
        for size in [2, 7, 16] {
            for overlap in [0, 1, 4, size, size + 5] {
                let chunks = chunker.split_text(text, size, overlap);
                crate::tests::assert_covers(text, &chunks, &format!("fixed {size}/{overlap}"));

                // Each window repeats exactly the step overlap, so dropping it
                // from every later window gives the input back.
                let repeated = if overlap < size { overlap } else { 0 };
                let mut rebuilt = chunks[0].clone();
                for chunk in &chunks[1..] {
                    rebuilt.extend(chunk.chars().skip(repeated));
                }
                assert_eq!(rebuilt, text, "size {size}, overlap {overlap}");
            }
        }
    }
}
