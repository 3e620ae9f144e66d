//! Errors produced by the document model.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by `richtext-core` operations.
pub enum ModelError {
    #[error("style span length cannot be negative (got {0})")]
    /// A span was built from a negative length.
    NegativeSpanLength(i64),

    #[error("paragraph index {index} out of bounds (paragraph count: {count})")]
    /// A paragraph index did not address an existing paragraph.
    ParagraphIndexOutOfBounds {
        /// The requested paragraph index.
        index: usize,
        /// Number of paragraphs in the document.
        count: usize,
    },

    #[error("offset {offset} out of bounds (length: {len})")]
    /// A character offset fell outside `[0, len]`.
    OffsetOutOfBounds {
        /// The requested offset (may be negative when computed from a column).
        offset: i64,
        /// Length of the addressed text.
        len: usize,
    },

    #[error("invalid range: {start}..{end}")]
    /// A range whose start lies after its end.
    InvalidRange {
        /// Inclusive start offset.
        start: usize,
        /// Exclusive end offset.
        end: usize,
    },

    #[error("not a line terminator: {0:?}")]
    /// A string that is not one of `\r`, `\n`, `\r\n`.
    NotALineTerminator(String),

    #[error("a styled document needs at least one paragraph")]
    /// A document was built from an empty paragraph list.
    NoParagraphs,

    #[error("a paragraph needs at least one segment")]
    /// A paragraph was built from an empty segment list.
    NoSegments,

    #[error(
        "an empty paragraph cannot infer a style for plain text; concatenate or insert a paragraph instead"
    )]
    /// Plain text concatenated to or inserted into an empty paragraph.
    UnsupportedOnEmptyParagraph,

    #[error("no style spans have been added")]
    /// A span builder was finished before any span was added.
    NoSpans,

    #[error("nothing to undo")]
    /// `undo` was called with an empty undo history.
    NothingToUndo,

    #[error("nothing to redo")]
    /// `redo` was called with an empty redo history.
    NothingToRedo,

    #[error("the undo manager has been closed")]
    /// The undo manager was used after `close`.
    UndoManagerClosed,
}
