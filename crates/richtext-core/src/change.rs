//! Structured text changes.
//!
//! A [`TextChange`] records one replacement: at `position`, `removed` was replaced by `inserted`.
//! The content type is generic so that the same value type describes both plain-text edits
//! ([`PlainTextChange`]) and styled edits ([`RichTextChange`]).
//!
//! Positions and lengths are expressed in **character offsets** (Unicode scalar values), with
//! paragraph terminators counting as one character.

use std::fmt;

use crate::document::StyledDocument;
use crate::text::{char_len, char_slice};

/// Content that can be removed or inserted by a [`TextChange`].
pub trait ChangeContent: Clone + PartialEq {
    /// Length in characters.
    fn content_len(&self) -> usize;

    /// `self` followed by `other`.
    fn concat_content(&self, other: &Self) -> Self;

    /// The part of `self` in `[from, to)`.
    fn sub_content(&self, from: usize, to: usize) -> Self;
}

impl ChangeContent for String {
    fn content_len(&self) -> usize {
        char_len(self)
    }

    fn concat_content(&self, other: &Self) -> Self {
        let mut joined = String::with_capacity(self.len() + other.len());
        joined.push_str(self);
        joined.push_str(other);
        joined
    }

    fn sub_content(&self, from: usize, to: usize) -> Self {
        char_slice(self, from, to).to_string()
    }
}

impl<PS, S> ChangeContent for StyledDocument<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    fn content_len(&self) -> usize {
        self.len()
    }

    fn concat_content(&self, other: &Self) -> Self {
        self.concat(other)
    }

    fn sub_content(&self, from: usize, to: usize) -> Self {
        self.sub_sequence(from, to)
    }
}

/// Anything describing an edit by its start offset and net length.
///
/// This is all the caret and selection adjustment functions need to know about a change.
pub trait OffsetChange {
    /// Start offset of the edit.
    fn position(&self) -> usize;

    /// Inserted length minus removed length.
    fn net_length(&self) -> isize;
}

impl<C: OffsetChange + ?Sized> OffsetChange for &C {
    fn position(&self) -> usize {
        (**self).position()
    }

    fn net_length(&self) -> isize {
        (**self).net_length()
    }
}

/// Whether a plain-text change inserts, deletes, or replaces text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Only inserts text.
    Insertion,
    /// Only removes text.
    Deletion,
    /// Removes and inserts text.
    Replacement,
}

/// A single replacement of `removed` by `inserted` at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextChange<T> {
    position: usize,
    removed: T,
    inserted: T,
}

/// A change over plain text.
pub type PlainTextChange = TextChange<String>;

/// A change over styled content.
pub type RichTextChange<PS, S> = TextChange<StyledDocument<PS, S>>;

impl<T> TextChange<T> {
    /// Create a change.
    pub fn new(position: usize, removed: T, inserted: T) -> Self {
        Self {
            position,
            removed,
            inserted,
        }
    }

    /// Start offset of the change.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The removed content.
    pub fn removed(&self) -> &T {
        &self.removed
    }

    /// The inserted content.
    pub fn inserted(&self) -> &T {
        &self.inserted
    }

    /// Consume the change, returning `(position, removed, inserted)`.
    pub fn into_parts(self) -> (usize, T, T) {
        (self.position, self.removed, self.inserted)
    }

    /// The change that undoes this one.
    pub fn invert(self) -> Self {
        Self::new(self.position, self.inserted, self.removed)
    }
}

impl<T: ChangeContent> TextChange<T> {
    /// Length of the removed content.
    pub fn removed_len(&self) -> usize {
        self.removed.content_len()
    }

    /// Length of the inserted content.
    pub fn inserted_len(&self) -> usize {
        self.inserted.content_len()
    }

    /// Offset where the removed content ended, before the change.
    pub fn removal_end(&self) -> usize {
        self.position + self.removed_len()
    }

    /// Offset where the inserted content ends, after the change.
    pub fn insertion_end(&self) -> usize {
        self.position + self.inserted_len()
    }

    /// Inserted length minus removed length.
    pub fn net_length(&self) -> isize {
        self.inserted_len() as isize - self.removed_len() as isize
    }

    /// Returns `true` if the change removes exactly what it inserts.
    pub fn is_identity(&self) -> bool {
        self.removed == self.inserted
    }

    /// Merge `latter`, applied right after `self`, into a single change.
    ///
    /// Two changes merge when either
    ///
    /// - `latter` starts where `self`'s inserted content ends, or
    /// - `latter`'s removed content ends where `self`'s inserted content ends.
    ///
    /// Returns `None` when neither holds.
    pub fn merge_with(&self, latter: &Self) -> Option<Self> {
        let insertion_end = self.insertion_end();

        if latter.position == insertion_end {
            return Some(Self::new(
                self.position,
                self.removed.concat_content(&latter.removed),
                self.inserted.concat_content(&latter.inserted),
            ));
        }

        if latter.removal_end() != insertion_end {
            return None;
        }
        if self.position <= latter.position {
            let kept = self
                .inserted
                .sub_content(0, latter.position - self.position);
            Some(Self::new(
                self.position,
                self.removed.clone(),
                kept.concat_content(&latter.inserted),
            ))
        } else {
            let extra = latter
                .removed
                .sub_content(0, self.position - latter.position);
            Some(Self::new(
                latter.position,
                extra.concat_content(&self.removed),
                latter.inserted.clone(),
            ))
        }
    }
}

impl<T: ChangeContent> OffsetChange for TextChange<T> {
    fn position(&self) -> usize {
        self.position
    }

    fn net_length(&self) -> isize {
        self.inserted.content_len() as isize - self.removed.content_len() as isize
    }
}

/// Fold [`TextChange::merge_with`] over consecutive changes.
///
/// The result describes the same edit sequence with as few changes as the merge rules allow.
pub fn merge_consecutive<T, I>(changes: I) -> Vec<TextChange<T>>
where
    T: ChangeContent,
    I: IntoIterator<Item = TextChange<T>>,
{
    let mut merged: Vec<TextChange<T>> = Vec::new();
    for change in changes {
        match merged.last().and_then(|last| last.merge_with(&change)) {
            Some(combined) => {
                if let Some(last) = merged.last_mut() {
                    *last = combined;
                }
            }
            None => merged.push(change),
        }
    }
    merged
}

impl PlainTextChange {
    /// Classify the change, or `None` for a change that neither removes nor inserts.
    pub fn change_type(&self) -> Option<ChangeType> {
        match (self.removed.is_empty(), self.inserted.is_empty()) {
            (true, true) => None,
            (true, false) => Some(ChangeType::Insertion),
            (false, true) => Some(ChangeType::Deletion),
            (false, false) => Some(ChangeType::Replacement),
        }
    }
}

impl<PS, S> RichTextChange<PS, S>
where
    PS: Clone + PartialEq,
    S: Clone + PartialEq,
{
    /// The same change with styles dropped.
    pub fn to_plain_text_change(&self) -> PlainTextChange {
        TextChange::new(self.position, self.removed.text(), self.inserted.text())
    }

    /// Returns `true` if the change only restyles text (plain text is unchanged).
    pub fn is_plain_text_identity(&self) -> bool {
        self.removed.text() == self.inserted.text()
    }
}

impl<T: fmt::Display> fmt::Display for TextChange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{}: {:?} -> {:?}",
            self.position,
            self.removed.to_string(),
            self.inserted.to_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(position: usize, removed: &str, inserted: &str) -> PlainTextChange {
        TextChange::new(position, removed.to_string(), inserted.to_string())
    }

    #[test]
    fn test_lengths_and_ends() {
        let change = plain(3, "héllo", "ab");
        assert_eq!(change.removed_len(), 5);
        assert_eq!(change.inserted_len(), 2);
        assert_eq!(change.removal_end(), 8);
        assert_eq!(change.insertion_end(), 5);
        assert_eq!(change.net_length(), -3);
    }

    #[test]
    fn test_invert_and_identity() {
        let change = plain(1, "a", "b");
        assert_eq!(change.clone().invert(), plain(1, "b", "a"));
        assert!(plain(1, "x", "x").is_identity());
        assert!(!change.is_identity());
    }

    #[test]
    fn test_merge_typing() {
        let merged = plain(0, "", "ab").merge_with(&plain(2, "", "c"));
        assert_eq!(merged, Some(plain(0, "", "abc")));
    }

    #[test]
    fn test_merge_backspace_inside_insertion() {
        // Typed "abc" at 5, then backspaced the "c".
        let merged = plain(5, "", "abc").merge_with(&plain(7, "c", ""));
        assert_eq!(merged, Some(plain(5, "", "ab")));
    }

    #[test]
    fn test_merge_backspace_past_insertion_start() {
        // Typed "ab" at 5 over nothing, then deleted "xab" starting at 4.
        let merged = plain(5, "", "ab").merge_with(&plain(4, "xab", ""));
        assert_eq!(merged, Some(plain(4, "x", "")));
    }

    #[test]
    fn test_merge_rejects_unrelated() {
        assert_eq!(plain(0, "", "ab").merge_with(&plain(10, "", "c")), None);
    }

    #[test]
    fn test_merge_consecutive() {
        let merged = merge_consecutive(vec![
            plain(0, "", "a"),
            plain(1, "", "b"),
            plain(2, "", "c"),
            plain(10, "z", ""),
        ]);
        assert_eq!(merged, vec![plain(0, "", "abc"), plain(10, "z", "")]);
    }

    #[test]
    fn test_change_type() {
        assert_eq!(plain(0, "", "a").change_type(), Some(ChangeType::Insertion));
        assert_eq!(plain(0, "a", "").change_type(), Some(ChangeType::Deletion));
        assert_eq!(plain(0, "a", "b").change_type(), Some(ChangeType::Replacement));
        assert_eq!(plain(0, "", "").change_type(), None);
    }

    #[test]
    fn test_rich_change_to_plain() {
        let removed = StyledDocument::from_string("ab\nc", (), 1u8);
        let inserted = StyledDocument::from_string("ab\nc", (), 2u8);
        let change = TextChange::new(4, removed, inserted);
        assert!(change.is_plain_text_identity());
        assert!(!change.is_identity());
        assert_eq!(change.to_plain_text_change(), plain(4, "ab\nc", "ab\nc"));
    }
}
