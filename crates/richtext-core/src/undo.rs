//! Undo/redo over recorded document changes.
//!
//! [`ChangeQueueUndoManager`] keeps a linear history of [`RichTextChange`]s. Changes are recorded
//! explicitly (typically from [`DocumentEdit::change`](crate::DocumentEdit)); undo applies the
//! inverse of the latest change to an [`EditableStyledDocument`], redo re-applies it.
//!
//! Consecutive changes are merged with [`TextChange::merge_with`](crate::TextChange::merge_with)
//! unless merging is disabled in [`UndoConfig`], explicitly prevented, or would cross the marked
//! position.

use crate::change::RichTextChange;
use crate::editable::EditableStyledDocument;
use crate::error::ModelError;

/// Undo manager settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoConfig {
    /// Maximum number of undoable changes kept; the oldest are dropped first.
    pub max_history: usize,
    /// Merge consecutive adjacent changes into one undo step.
    pub merge_changes: bool,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: 1000,
            merge_changes: true,
        }
    }
}

/// Undo/redo stack state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    /// Can undo
    pub can_undo: bool,
    /// Can redo
    pub can_redo: bool,
    /// Undo stack depth
    pub undo_depth: usize,
    /// Redo stack depth
    pub redo_depth: usize,
    /// Whether the history sits at the marked position
    pub at_marked_position: bool,
}

/// The undo service consumed by editing surfaces.
pub trait UndoManager<PS, S> {
    /// Record a change that has just been applied to the document.
    fn record(&mut self, change: RichTextChange<PS, S>);

    /// Undo the latest change.
    fn undo(&mut self, document: &mut EditableStyledDocument<PS, S>) -> Result<(), ModelError>;

    /// Redo the latest undone change.
    fn redo(&mut self, document: &mut EditableStyledDocument<PS, S>) -> Result<(), ModelError>;

    /// Returns `true` if there is a change to undo.
    fn can_undo(&self) -> bool;

    /// Returns `true` if there is a change to redo.
    fn can_redo(&self) -> bool;

    /// Mark the current position in the history (e.g. after saving).
    fn mark(&mut self);

    /// Returns `true` if the history is at the marked position.
    fn is_at_marked_position(&self) -> bool;

    /// Keep the next recorded change from merging into the previous one.
    fn prevent_merge(&mut self);

    /// Drop every undoable change. Redo history is kept.
    fn forget_history(&mut self);

    /// Stop recording; subsequent undo and redo calls fail.
    fn close(&mut self);
}

/// A bounded, linear undo history of rich-text changes.
#[derive(Debug)]
pub struct ChangeQueueUndoManager<PS, S> {
    undo_stack: Vec<RichTextChange<PS, S>>,
    redo_stack: Vec<RichTextChange<PS, S>>,
    config: UndoConfig,
    /// Marked position, as an `undo_stack.len()` value. May lie in the redo area.
    clean_index: Option<usize>,
    merge_prevented: bool,
    closed: bool,
}

impl<PS, S> ChangeQueueUndoManager<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    /// Create an empty history.
    pub fn new(config: UndoConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            config,
            clean_index: Some(0),
            merge_prevented: false,
            closed: false,
        }
    }

    /// Snapshot of the stack state.
    pub fn state(&self) -> UndoState {
        UndoState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_depth: self.undo_stack.len(),
            redo_depth: self.redo_stack.len(),
            at_marked_position: self.is_at_marked_position(),
        }
    }

    /// The settings in use.
    pub fn config(&self) -> &UndoConfig {
        &self.config
    }

    fn clear_redo_and_adjust_clean(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }

        // A mark inside the redo area becomes unreachable.
        if let Some(clean_index) = self.clean_index
            && clean_index > self.undo_stack.len()
        {
            self.clean_index = None;
        }

        self.redo_stack.clear();
    }

    fn try_merge(&mut self, change: &RichTextChange<PS, S>) -> bool {
        let allowed = self.config.merge_changes
            && !self.merge_prevented
            && self.clean_index != Some(self.undo_stack.len());
        if !allowed {
            return false;
        }

        let Some(last) = self.undo_stack.last_mut() else {
            return false;
        };
        match last.merge_with(change) {
            Some(merged) => {
                log::trace!("merged change at {} into undo history", change.position());
                *last = merged;
                true
            }
            None => false,
        }
    }

    fn ensure_open(&self) -> Result<(), ModelError> {
        if self.closed {
            Err(ModelError::UndoManagerClosed)
        } else {
            Ok(())
        }
    }
}

impl<PS, S> Default for ChangeQueueUndoManager<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    fn default() -> Self {
        Self::new(UndoConfig::default())
    }
}

impl<PS, S> UndoManager<PS, S> for ChangeQueueUndoManager<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    fn record(&mut self, change: RichTextChange<PS, S>) {
        if self.closed {
            log::debug!("ignoring change recorded after close");
            return;
        }
        if change.is_identity() {
            return;
        }

        self.clear_redo_and_adjust_clean();

        if self.try_merge(&change) {
            self.merge_prevented = false;
            return;
        }
        self.merge_prevented = false;

        if self.undo_stack.len() >= self.config.max_history {
            if self.undo_stack.is_empty() {
                return;
            }
            self.undo_stack.remove(0);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean_index) => Some(clean_index - 1),
            };
        }
        self.undo_stack.push(change);
    }

    fn undo(&mut self, document: &mut EditableStyledDocument<PS, S>) -> Result<(), ModelError> {
        self.ensure_open()?;
        let change = self.undo_stack.pop().ok_or(ModelError::NothingToUndo)?;

        if let Err(err) = document.apply(&change.clone().invert()) {
            self.undo_stack.push(change);
            return Err(err);
        }
        log::debug!("undo: change at {}", change.position());
        self.redo_stack.push(change);
        self.merge_prevented = true;
        Ok(())
    }

    fn redo(&mut self, document: &mut EditableStyledDocument<PS, S>) -> Result<(), ModelError> {
        self.ensure_open()?;
        let change = self.redo_stack.pop().ok_or(ModelError::NothingToRedo)?;

        if let Err(err) = document.apply(&change) {
            self.redo_stack.push(change);
            return Err(err);
        }
        log::debug!("redo: change at {}", change.position());
        self.undo_stack.push(change);
        self.merge_prevented = true;
        Ok(())
    }

    fn can_undo(&self) -> bool {
        !self.closed && !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.closed && !self.redo_stack.is_empty()
    }

    fn mark(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }

    fn is_at_marked_position(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    fn prevent_merge(&mut self) {
        self.merge_prevented = true;
    }

    fn forget_history(&mut self) {
        let dropped = self.undo_stack.len();
        self.undo_stack.clear();
        self.clean_index = self.clean_index.and_then(|c| c.checked_sub(dropped));
    }

    fn close(&mut self) {
        self.closed = true;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
