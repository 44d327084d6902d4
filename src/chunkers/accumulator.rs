//! Greedy chunk packing with a sliding overlap window.

use std::collections::VecDeque;

use super::base::char_len;

/// Outcome of offering a segment to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The segment was appended to the pending buffer.
    Buffered,
    /// The segment is larger than the chunk size on its own and must be
    /// split further by the caller. The pending buffer is empty.
    Oversized,
}

/// Packs consecutive segments into chunks of bounded length.
///
/// Segments are buffered until the next one would push the joined length
/// past `chunk_size`. The buffer is then emitted as a chunk and evicted from
/// the front until at most `chunk_overlap` characters remain, so the tail of
/// one chunk seeds the next. Eviction only drops whole segments; the
/// configured overlap is an upper bound, not a guaranteed minimum.
#[derive(Debug)]
pub struct ChunkAccumulator<'a> {
    separator: &'a str,
    separator_len: usize,
    chunk_size: usize,
    chunk_overlap: usize,
    /// Buffered segments with their character lengths
    pending: VecDeque<(&'a str, usize)>,
    /// Length of the pending segments joined by the separator
    total_len: usize,
}

impl<'a> ChunkAccumulator<'a> {
    /// Create an empty accumulator that joins segments with `separator`.
    pub fn new(separator: &'a str, chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separator,
            separator_len: char_len(separator),
            chunk_size,
            chunk_overlap,
            pending: VecDeque::new(),
            total_len: 0,
        }
    }

    /// Offer the next segment. Any chunk completed along the way is pushed
    /// onto `out`.
    pub fn admit(&mut self, segment: &'a str, out: &mut Vec<String>) -> Admission {
        let len = char_len(segment);

        if self.len_with(len) <= self.chunk_size {
            self.push(segment, len);
            return Admission::Buffered;
        }

        if let Some(chunk) = self.joined() {
            out.push(chunk);
        }
        self.evict_for(len);

        if len > self.chunk_size {
            return Admission::Oversized;
        }

        self.push(segment, len);
        Admission::Buffered
    }

    /// Emit whatever is still buffered.
    pub fn finish(self) -> Option<String> {
        self.joined()
    }

    /// Joined length of the pending buffer.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Check if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Joined length after appending a segment of `len` characters.
    fn len_with(&self, len: usize) -> usize {
        if self.pending.is_empty() {
            len
        } else {
            self.total_len + self.separator_len + len
        }
    }

    fn push(&mut self, segment: &'a str, len: usize) {
        self.total_len = self.len_with(len);
        self.pending.push_back((segment, len));
    }

    /// Drop segments from the front until the buffer fits the overlap budget
    /// and leaves room for a segment of `len` characters.
    fn evict_for(&mut self, len: usize) {
        while self.total_len > self.chunk_overlap || self.len_with(len) > self.chunk_size {
            let Some((_, front_len)) = self.pending.pop_front() else {
                break;
            };
            let joint = if self.pending.is_empty() { 0 } else { self.separator_len };
            self.total_len = self.total_len.saturating_sub(front_len + joint);
        }
    }

    /// The pending buffer joined and trimmed, or `None` if that is empty.
    fn joined(&self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }

        let mut joined = String::new();
        for (i, (segment, _)) in self.pending.iter().enumerate() {
            if i > 0 {
                joined.push_str(self.separator);
            }
            joined.push_str(segment);
        }

        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pack(segments: &[&'static str], separator: &'static str, size: usize, overlap: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut acc = ChunkAccumulator::new(separator, size, overlap);
        for segment in segments {
            assert_eq!(acc.admit(segment, &mut out), Admission::Buffered);
        }
        out.extend(acc.finish());
        out
    }

    #[test]
    fn test_packs_until_full() {
        let chunks = pack(&["aa", "bb", "cc", "dd"], " ", 5, 0);
        assert_eq!(chunks, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn test_overlap_seeds_next_chunk() {
        let chunks = pack(&["one", "two", "three", "four", "five"], " ", 10, 4);
        assert_eq!(chunks, vec!["one two", "two three", "four five"]);
    }

    #[test]
    fn test_overlap_larger_than_size_still_progresses() {
        let chunks = pack(&["ab", "cd", "ef"], " ", 5, 50);
        assert_eq!(chunks, vec!["ab cd", "cd ef"]);
    }

    #[test]
    fn test_total_len_tracks_joints() {
        let mut out = Vec::new();
        let mut acc = ChunkAccumulator::new("--", 100, 0);
        acc.admit("abc", &mut out);
        assert_eq!(acc.total_len(), 3);
        acc.admit("de", &mut out);
        assert_eq!(acc.total_len(), 7);
        assert!(out.is_empty());
    }

    #[test]
    fn test_oversized_drains_buffer() {
        let mut out = Vec::new();
        let mut acc = ChunkAccumulator::new(" ", 4, 3);
        assert_eq!(acc.admit("ab", &mut out), Admission::Buffered);
        assert_eq!(acc.admit("toolong", &mut out), Admission::Oversized);
        assert!(acc.is_empty());
        assert_eq!(out, vec!["ab"]);
    }

    #[test]
    fn test_whitespace_only_buffer_is_dropped() {
        let chunks = pack(&["  ", " "], "\n", 3, 0);
        assert!(chunks.is_empty());
    }
}
