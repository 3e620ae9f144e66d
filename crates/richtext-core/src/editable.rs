//! Editable document
//!
//! [`EditableStyledDocument`] is the mutable face of the model: it owns the current immutable
//! snapshot and replaces it on every edit.
//!
//! # Overview
//!
//! - **Snapshots**: every edit produces a new [`StyledDocument`]; readers holding an older
//!   snapshot keep seeing it unchanged
//! - **Version Tracking**: the version number is incremented after each modification
//! - **Change Notifications**: subscribers receive the [`RichTextChange`], its plain-text
//!   projection, and the paragraph splice of every edit
//! - **Multi-Changes**: [`replace_multi`](EditableStyledDocument::replace_multi) applies several
//!   replacements as one update; [`subscribe_multi`](EditableStyledDocument::subscribe_multi)
//!   observers receive each update's changes as one list
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{EditableStyledDocument, StyledDocument};
//!
//! let mut doc = EditableStyledDocument::new(StyledDocument::from_string("Hello", (), "plain"));
//!
//! doc.subscribe(|edit| {
//!     println!("v{} -> v{}: {}", edit.old_version, edit.new_version, edit.plain_change);
//! });
//!
//! doc.insert_text(5, ", World").unwrap();
//! assert_eq!(doc.text(), "Hello, World");
//! assert_eq!(doc.version(), 1);
//! ```

use std::ops::Range;

use crate::change::{PlainTextChange, RichTextChange};
use crate::document::{ParagraphModification, Replacement, StyledDocument};
use crate::error::ModelError;
use crate::style_spans::StyleSpans;

/// One applied edit, as reported to subscribers.
#[derive(Debug, Clone)]
pub struct DocumentEdit<PS, S> {
    /// Version before the edit.
    pub old_version: u64,
    /// Version after the edit.
    pub new_version: u64,
    /// The styled change.
    pub change: RichTextChange<PS, S>,
    /// The same change without styles, for caret and selection adjustment.
    pub plain_change: PlainTextChange,
    /// The paragraph splice.
    pub modification: ParagraphModification<PS, S>,
}

/// All changes of one update, in the order they were applied.
///
/// Each change is expressed against the document as left by the changes before it, which is
/// the order [`caret_position_after`](crate::caret_position_after) and
/// [`selection_after`](crate::selection_after) fold over.
#[derive(Debug, Clone)]
pub struct MultiEdit<PS, S> {
    /// Version before the update.
    pub old_version: u64,
    /// Version after the update.
    pub new_version: u64,
    /// The styled changes.
    pub changes: Vec<RichTextChange<PS, S>>,
    /// The paragraph splice of each change.
    pub modifications: Vec<ParagraphModification<PS, S>>,
}

impl<PS, S> MultiEdit<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    /// Plain-text projections of the changes, skipping those that only restyle text.
    pub fn plain_changes(&self) -> Vec<PlainTextChange> {
        self.changes
            .iter()
            .filter(|change| !change.is_plain_text_identity())
            .map(RichTextChange::to_plain_text_change)
            .collect()
    }

    fn edits(&self) -> impl Iterator<Item = DocumentEdit<PS, S>> + '_ {
        self.changes
            .iter()
            .zip(&self.modifications)
            .map(|(change, modification)| DocumentEdit {
                old_version: self.old_version,
                new_version: self.new_version,
                change: change.clone(),
                plain_change: change.to_plain_text_change(),
                modification: modification.clone(),
            })
    }
}

/// Edit callback function type
pub type DocumentEditCallback<PS, S> = Box<dyn FnMut(&DocumentEdit<PS, S>) + Send>;

/// Multi-change callback function type
pub type MultiEditCallback<PS, S> = Box<dyn FnMut(&MultiEdit<PS, S>) + Send>;

/// A document that can be edited in place, backed by immutable snapshots.
pub struct EditableStyledDocument<PS, S> {
    document: StyledDocument<PS, S>,
    version: u64,
    callbacks: Vec<DocumentEditCallback<PS, S>>,
    multi_callbacks: Vec<MultiEditCallback<PS, S>>,
}

impl<PS, S> EditableStyledDocument<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    /// Start editing `document`.
    pub fn new(document: StyledDocument<PS, S>) -> Self {
        Self {
            document,
            version: 0,
            callbacks: Vec::new(),
            multi_callbacks: Vec::new(),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &StyledDocument<PS, S> {
        &self.document
    }

    /// Current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if the document has changed since a version.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Length of the current snapshot.
    pub fn len(&self) -> usize {
        self.document.len()
    }

    /// Returns `true` if the current snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Plain text of the current snapshot.
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// Replace `[from, to)` with styled content.
    pub fn replace(
        &mut self,
        from: usize,
        to: usize,
        replacement: &StyledDocument<PS, S>,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        let result = self.document.replace(from, to, replacement)?;
        Ok(self.commit(result))
    }

    /// Replace `[from, to)` with plain text.
    ///
    /// The text takes the style at `from` and the paragraph style of the paragraph containing
    /// `from`.
    pub fn replace_text(
        &mut self,
        from: usize,
        to: usize,
        text: &str,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        let replacement = self.plain_text_at(from, text);
        self.replace(from, to, &replacement)
    }

    /// Insert plain text at `position`.
    pub fn insert_text(
        &mut self,
        position: usize,
        text: &str,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        self.replace_text(position, position, text)
    }

    /// Remove `[from, to)`.
    pub fn delete_text(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        self.replace_text(from, to, "")
    }

    /// Apply several replacements in one update.
    ///
    /// Each range refers to the document as left by the replacements before it. Either every
    /// replacement is applied or, on the first invalid range, none is and the error is returned.
    /// An empty list is not an update: nothing is notified and the version stays put.
    pub fn replace_multi(
        &mut self,
        replacements: Vec<(Range<usize>, StyledDocument<PS, S>)>,
    ) -> Result<MultiEdit<PS, S>, ModelError> {
        let mut document = self.document.clone();
        let mut changes = Vec::with_capacity(replacements.len());
        let mut modifications = Vec::with_capacity(replacements.len());
        for (range, replacement) in &replacements {
            let result = document.replace(range.start, range.end, replacement)?;
            document = result.document;
            changes.push(result.change);
            modifications.push(result.modification);
        }

        if changes.is_empty() {
            return Ok(MultiEdit {
                old_version: self.version,
                new_version: self.version,
                changes,
                modifications,
            });
        }

        let old_version = self.version;
        self.version += 1;
        self.document = document;

        let multi = MultiEdit {
            old_version,
            new_version: self.version,
            changes,
            modifications,
        };
        log::debug!(
            "document v{} -> v{}: {} replacement(s)",
            multi.old_version,
            multi.new_version,
            multi.changes.len()
        );
        for edit in multi.edits() {
            for callback in &mut self.callbacks {
                callback(&edit);
            }
        }
        for callback in &mut self.multi_callbacks {
            callback(&multi);
        }
        Ok(multi)
    }

    /// Apply `style` to `[from, to)`.
    pub fn set_style(
        &mut self,
        from: usize,
        to: usize,
        style: S,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        let result = self.document.restyle(from, to, style)?;
        Ok(self.commit(result))
    }

    /// Apply `style` to all of paragraph `index`.
    pub fn set_style_of_paragraph(
        &mut self,
        index: usize,
        style: S,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        let result = self.document.restyle_paragraph(index, style)?;
        Ok(self.commit(result))
    }

    /// Apply `spans` starting at `from`.
    pub fn set_style_spans(
        &mut self,
        from: usize,
        spans: &StyleSpans<S>,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        let result = self.document.restyle_spans(from, spans)?;
        Ok(self.commit(result))
    }

    /// Set the paragraph style of paragraph `index`.
    pub fn set_paragraph_style(
        &mut self,
        index: usize,
        paragraph_style: PS,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        let result = self.document.set_paragraph_style(index, paragraph_style)?;
        Ok(self.commit(result))
    }

    /// Apply a recorded change: replace its removed range with its inserted content.
    pub fn apply(
        &mut self,
        change: &RichTextChange<PS, S>,
    ) -> Result<DocumentEdit<PS, S>, ModelError> {
        self.replace(change.position(), change.removal_end(), change.inserted())
    }

    /// Subscribe to edit notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&DocumentEdit<PS, S>) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Subscribe to the list of changes made by each update.
    ///
    /// Single edits arrive as one-element lists.
    pub fn subscribe_multi<F>(&mut self, callback: F)
    where
        F: FnMut(&MultiEdit<PS, S>) + Send + 'static,
    {
        self.multi_callbacks.push(Box::new(callback));
    }

    fn plain_text_at(&self, position: usize, text: &str) -> StyledDocument<PS, S> {
        let style = self.document.style_at_position(position).clone();
        let paragraph_style = self.document.paragraph_style_at_position(position).clone();
        StyledDocument::from_string(text, paragraph_style, style)
    }

    fn commit(&mut self, result: Replacement<PS, S>) -> DocumentEdit<PS, S> {
        let Replacement {
            document,
            change,
            modification,
        } = result;

        let old_version = self.version;
        self.version += 1;
        self.document = document;

        let edit = DocumentEdit {
            old_version,
            new_version: self.version,
            plain_change: change.to_plain_text_change(),
            change,
            modification,
        };
        log::debug!(
            "document v{} -> v{}: {} paragraph(s) spliced at {}",
            edit.old_version,
            edit.new_version,
            edit.modification.removed.len(),
            edit.modification.index
        );
        self.notify_callbacks(&edit);
        edit
    }

    fn notify_callbacks(&mut self, edit: &DocumentEdit<PS, S>) {
        for callback in &mut self.callbacks {
            callback(edit);
        }
        if self.multi_callbacks.is_empty() {
            return;
        }
        let multi = MultiEdit {
            old_version: edit.old_version,
            new_version: edit.new_version,
            changes: vec![edit.change.clone()],
            modifications: vec![edit.modification.clone()],
        };
        for callback in &mut self.multi_callbacks {
            callback(&multi);
        }
    }
}
