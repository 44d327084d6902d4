//! Separator hierarchies for recursive splitting.

/// Default separators, most to least semantically meaningful.
pub const DEFAULT_SEPARATORS: [&str; 4] = [
    "\n\n", // Paragraphs
    "\n",   // Lines
    " ",    // Words
    "",     // Characters (always usable)
];

/// Separators tuned for markdown documents.
pub const MARKDOWN_SEPARATORS: [&str; 9] = [
    "\n\n\n",  // Section breaks
    "\n# ",    // Headers
    "\n## ",   // Subheaders
    "\n### ",  // Sub-subheaders
    "\n\n",    // Paragraphs
    "\n",      // Lines
    ". ",      // Sentences
    " ",       // Words
    "",        // Characters
];

/// An ordered, immutable list of split markers.
///
/// Every hierarchy ends with the empty-string sentinel, which splits at
/// each code point. Since the sentinel is always usable, recursion over a
/// hierarchy always bottoms out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorHierarchy {
    separators: Vec<String>,
}

impl SeparatorHierarchy {
    /// Build a hierarchy from a custom list.
    ///
    /// Anything after the first empty separator is unreachable and dropped;
    /// the sentinel is appended when the list lacks one.
    pub fn new<I, S>(separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for separator in separators {
            let separator = separator.into();
            let is_sentinel = separator.is_empty();
            list.push(separator);
            if is_sentinel {
                break;
            }
        }

        if list.last().map_or(true, |s| !s.is_empty()) {
            list.push(String::new());
        }

        Self { separators: list }
    }

    /// The markdown-aware hierarchy.
    pub fn markdown() -> Self {
        Self::new(MARKDOWN_SEPARATORS)
    }

    /// All separators in priority order.
    pub fn as_slice(&self) -> &[String] {
        &self.separators
    }

    /// Number of levels, sentinel included.
    pub fn len(&self) -> usize {
        self.separators.len()
    }

    /// Always false: the sentinel is always present.
    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }

    /// Index of the first separator at or after `from` that is usable for
    /// `text`: either the sentinel or a marker that occurs in the text.
    ///
    /// Returns `None` only when `from` is past the sentinel.
    pub fn select(&self, text: &str, from: usize) -> Option<usize> {
        self.separators
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, separator)| separator.is_empty() || text.contains(separator.as_str()))
            .map(|(index, _)| index)
    }
}

/// Where a separator is cut when splitting.
///
/// Only the first whitespace run of a separator is removed from the text and
/// re-inserted between packed segments. Characters before it stay with the
/// preceding segment (the period of `". "`), characters after it start the
/// next one (the `## ` of `"\n## "`). A separator without whitespace is kept
/// whole on the preceding segment and joined with nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPoint<'s> {
    /// Bytes of the separator kept on the preceding segment
    pub keep_before: usize,
    /// The part removed from the text and used to join segments
    pub joint: &'s str,
}

impl<'s> SplitPoint<'s> {
    /// Locate the joint within `separator`.
    pub fn of(separator: &'s str) -> Self {
        let Some(start) = separator.find(char::is_whitespace) else {
            return Self {
                keep_before: separator.len(),
                joint: "",
            };
        };
        let len = separator[start..]
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(separator.len() - start);

        Self {
            keep_before: start,
            joint: &separator[start..start + len],
        }
    }
}

impl Default for SeparatorHierarchy {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATORS)
    }
}
