//! Styled segments, the unit of text inside a paragraph.

use std::fmt;

use crate::text::{char_len, char_slice};

/// A run of text paired with its style.
///
/// The character length is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyledSegment<S> {
    text: String,
    style: S,
    char_len: usize,
}

impl<S> StyledSegment<S> {
    /// Create a segment.
    pub fn new(text: impl Into<String>, style: S) -> Self {
        let text = text.into();
        let char_len = char_len(&text);
        Self {
            text,
            style,
            char_len,
        }
    }

    /// The segment text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The segment style.
    pub fn style(&self) -> &S {
        &self.style
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    /// Returns `true` if the segment holds no text.
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Consume the segment, returning its text and style.
    pub fn into_parts(self) -> (String, S) {
        (self.text, self.style)
    }
}

impl<S: Clone> StyledSegment<S> {
    /// The characters in `[start, end)`, keeping the style. Bounds saturate.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self::new(char_slice(&self.text, start, end), self.style.clone())
    }
}

impl<S> fmt::Display for StyledSegment<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
