//! Recursive text chunker with hierarchical splitting.

use tracing::debug;

use super::accumulator::{Admission, ChunkAccumulator};
use super::base::Chunker;
use super::separators::{SeparatorHierarchy, SplitPoint};

/// Recursive chunker that splits text hierarchically.
///
/// This chunker tries separators in order of preference:
/// 1. Double newlines (paragraphs)
/// 2. Single newlines
/// 3. Spaces (words)
/// 4. Characters (last resort)
///
/// At each level it packs the resulting segments greedily into chunks, and
/// only descends to a finer separator for a segment that is still larger
/// than the chunk size on its own.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    name: &'static str,
    /// Separators in order of preference (most to least preferred)
    separators: SeparatorHierarchy,
}

impl RecursiveChunker {
    /// Create a new recursive chunker with default separators.
    pub fn new() -> Self {
        Self {
            name: "recursive",
            separators: SeparatorHierarchy::default(),
        }
    }

    /// Create a recursive chunker for markdown content.
    pub fn for_markdown() -> Self {
        Self {
            name: "markdown",
            separators: SeparatorHierarchy::markdown(),
        }
    }

    /// Create a recursive chunker with custom separators.
    pub fn with_separators(separators: SeparatorHierarchy) -> Self {
        Self {
            name: "recursive",
            separators,
        }
    }

    /// The separator hierarchy in use.
    pub fn separators(&self) -> &SeparatorHierarchy {
        &self.separators
    }

    /// Split `text` using separators from `level` onwards.
    fn split_at(
        &self,
        text: &str,
        level: usize,
        chunk_size: usize,
        chunk_overlap: usize,
        chunks: &mut Vec<String>,
    ) {
        let Some(index) = self.separators.select(text, level) else {
            // No finer level left: the segment is atomic.
            push_trimmed(chunks, text);
            return;
        };
        let separator = self.separators.as_slice()[index].as_str();
        let joint = SplitPoint::of(separator).joint;

        let mut accumulator = ChunkAccumulator::new(joint, chunk_size, chunk_overlap);
        for segment in split_by_separator(text, separator) {
            if accumulator.admit(segment, chunks) == Admission::Oversized {
                self.split_at(segment, index + 1, chunk_size, chunk_overlap, chunks);
            }
        }

        chunks.extend(accumulator.finish());
    }
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunker for RecursiveChunker {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        if self.name == "markdown" {
            "Hierarchically splits markdown at sections, headings, paragraphs, lines and words"
        } else {
            "Hierarchically splits text at paragraphs, lines, words and characters"
        }
    }

    fn split_text(&self, text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
        let mut chunks = Vec::new();

        if chunk_size == 0 {
            push_trimmed(&mut chunks, text);
        } else {
            self.split_at(text, 0, chunk_size, chunk_overlap, &mut chunks);
        }

        debug!(
            chunker = self.name,
            chunk_size,
            chunk_overlap,
            chunks = chunks.len(),
            "Recursive split complete"
        );

        chunks
    }
}

/// Split text on every occurrence of `separator`, discarding empty pieces.
///
/// Only the separator's joint is cut out; its other characters stay on the
/// neighbouring pieces. The empty separator splits at each code point.
fn split_by_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let point = SplitPoint::of(separator);
    let mut pieces = Vec::new();
    let mut start = 0;

    for (pos, _) in text.match_indices(separator) {
        pieces.push(&text[start..pos + point.keep_before]);
        start = pos + point.keep_before + point.joint.len();
    }
    pieces.push(&text[start..]);

    pieces.retain(|piece| !piece.is_empty());
    pieces
}

fn push_trimmed(chunks: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
