#![warn(missing_docs)]
//! Richtext Core - Immutable Rich-Text Document Model
//!
//! # Overview
//!
//! `richtext-core` is a headless document model for styled text. It does not render anything;
//! it stores paragraphs of styled segments and answers the questions an editing surface asks:
//! which style applies where, how flat offsets map to paragraph/column positions, what changed
//! after an edit, and where carets and selections end up afterwards.
//!
//! Styles are opaque type parameters: `PS` for paragraph styles, `S` for character styles.
//! The model only ever clones and compares them.
//!
//! # Core Features
//!
//! - **Immutable Snapshots**: every edit yields a new [`StyledDocument`] sharing unchanged
//!   paragraphs with the previous one
//! - **Style Spans**: run-length style sequences with merging of equal neighbours
//! - **Offset Mapping**: two-level navigation between flat offsets and `(major, minor)` positions
//! - **Change Tracking**: [`RichTextChange`]s with inversion and merging, plus undo/redo
//! - **Selection Adjustment**: caret and selection positions kept consistent across edits
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditableStyledDocument + UndoManager       │  ← Mutable API
//! ├─────────────────────────────────────────────┤
//! │  TextChange / selection adjustment          │  ← Edit Tracking
//! ├─────────────────────────────────────────────┤
//! │  StyledDocument (paragraph list)            │  ← Snapshots
//! ├─────────────────────────────────────────────┤
//! │  Paragraph / StyledSegment / StyleSpans     │  ← Styled Content
//! ├─────────────────────────────────────────────┤
//! │  TwoDimensional navigation                  │  ← Offset Mapping
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Building Style Spans
//!
//! ```rust
//! use richtext_core::{StyleSpan, StyleSpansBuilder};
//!
//! let mut builder = StyleSpansBuilder::new();
//! builder.add_style("plain", 3).add_style("plain", 2).add(StyleSpan::new("bold", 4));
//! let spans = builder.create().unwrap();
//!
//! // Equal neighbours are merged.
//! assert_eq!(spans.span_count(), 2);
//! assert_eq!(spans.len(), 9);
//! ```
//!
//! ## Editing a Document
//!
//! ```rust
//! use richtext_core::{
//!     ChangeQueueUndoManager, EditableStyledDocument, StyledDocument, UndoManager,
//! };
//!
//! let text = StyledDocument::from_string("abc\ndefg", (), "plain");
//! let mut doc = EditableStyledDocument::new(text);
//! let mut undo = ChangeQueueUndoManager::default();
//!
//! let edit = doc.set_style(2, 5, "bold").unwrap();
//! undo.record(edit.change);
//! assert_eq!(*doc.snapshot().style_of_char(4), "bold");
//!
//! undo.undo(&mut doc).unwrap();
//! assert_eq!(*doc.snapshot().style_of_char(4), "plain");
//! ```
//!
//! # Module Description
//!
//! - [`two_dimensional`] - Offset/position navigation over two-level structures
//! - [`style_spans`] - Run-length style sequences and their builder
//! - [`segment`] - Text runs with a single style
//! - [`paragraph`] - Styled paragraphs (normal and empty)
//! - [`line_terminator`] - Paragraph terminator handling
//! - [`document`] - Immutable styled documents
//! - [`change`] - Structured text changes
//! - [`selection`] - Caret and selection adjustment
//! - [`editable`] - Versioned editable document with change notifications
//! - [`undo`] - Undo/redo history
//!
//! # Offsets
//!
//! All offsets count Unicode scalar values. Each boundary between two paragraphs counts as one
//! character, whatever line terminator the source text used.

pub mod change;
pub mod document;
pub mod editable;
pub mod error;
pub mod line_terminator;
pub mod paragraph;
pub mod segment;
pub mod selection;
pub mod style_spans;
mod text;
pub mod two_dimensional;
pub mod undo;

pub use change::{
    ChangeContent, ChangeType, OffsetChange, PlainTextChange, RichTextChange, TextChange,
    merge_consecutive,
};
pub use document::{ParagraphModification, Replacement, StyledDocument};
pub use editable::{
    DocumentEdit, DocumentEditCallback, EditableStyledDocument, MultiEdit, MultiEditCallback,
};
pub use error::ModelError;
pub use line_terminator::LineTerminator;
pub use paragraph::{EmptyParagraph, NormalParagraph, Paragraph};
pub use segment::StyledSegment;
pub use selection::{adjust_caret, adjust_selection, caret_position_after, selection_after};
pub use style_spans::{StyleSpan, StyleSpans, StyleSpansBuilder};
pub use two_dimensional::{Bias, Position, TwoDimensional, TwoLevelNavigator};
pub use undo::{ChangeQueueUndoManager, UndoConfig, UndoManager, UndoState};
