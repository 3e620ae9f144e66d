//! Keeping carets and selections consistent across edits.
//!
//! Both adjustments are sequential folds: every change in the list updates the position before
//! the next change is considered, so the list must be in application order.
//!
//! For a change at `start` with net length `net`, let `end = start + |net|`:
//!
//! - positions at or after `end` shift by `net`;
//! - positions strictly inside `(start, end)` collapse to `start`;
//! - a caret exactly at `start` moves past a pure growth (`start + max(0, net)`);
//! - positions before `start` are unaffected.
//!
//! A selection applies the caret rule to its start. Its end only moves for changes strictly
//! before it, so text inserted exactly at the end of a selection stays outside of it.

use std::ops::Range;

use crate::change::OffsetChange;

/// Adjust `caret` for a single change.
pub fn adjust_caret<C: OffsetChange>(caret: usize, change: &C) -> usize {
    let start = change.position();
    let net = change.net_length();
    if net == 0 {
        return caret;
    }

    if start == caret && net > 0 {
        caret + net.unsigned_abs()
    } else if start < caret {
        shift_after(caret, start, net)
    } else {
        caret
    }
}

/// Adjust `caret` for every change in `changes`, in order.
pub fn caret_position_after<I>(caret: usize, changes: I) -> usize
where
    I: IntoIterator,
    I::Item: OffsetChange,
{
    changes
        .into_iter()
        .fold(caret, |caret, change| adjust_caret(caret, &change))
}

/// Adjust a selection for a single change.
///
/// The result never has `start > end`.
pub fn adjust_selection<C: OffsetChange>(selection: Range<usize>, change: &C) -> Range<usize> {
    let start = adjust_caret(selection.start, change);
    let index = change.position();
    let net = change.net_length();

    let end = if net != 0 && index < selection.end {
        shift_after(selection.end, index, net)
    } else {
        selection.end
    };

    start.min(end)..end
}

/// Adjust a selection for every change in `changes`, in order.
pub fn selection_after<I>(selection: Range<usize>, changes: I) -> Range<usize>
where
    I: IntoIterator,
    I::Item: OffsetChange,
{
    changes
        .into_iter()
        .fold(selection, |selection, change| adjust_selection(selection, &change))
}

// `position` lies after `start`: collapse it when the change swallowed it, shift otherwise.
fn shift_after(position: usize, start: usize, net: isize) -> usize {
    if position < start + net.unsigned_abs() {
        start
    } else {
        position.saturating_add_signed(net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{PlainTextChange, TextChange};

    fn insert(at: usize, text: &str) -> PlainTextChange {
        TextChange::new(at, String::new(), text.to_string())
    }

    fn delete(at: usize, text: &str) -> PlainTextChange {
        TextChange::new(at, text.to_string(), String::new())
    }

    fn replace(at: usize, removed: &str, inserted: &str) -> PlainTextChange {
        TextChange::new(at, removed.to_string(), inserted.to_string())
    }

    #[test]
    fn test_caret_insertion_before() {
        assert_eq!(adjust_caret(5, &insert(2, "abc")), 8);
        assert_eq!(adjust_caret(4, &insert(1, "and")), 7);
    }

    #[test]
    fn test_caret_insertion_after_is_ignored() {
        assert_eq!(adjust_caret(3, &insert(4, "and")), 3);
        assert_eq!(adjust_caret(3, &delete(4, "and")), 3);
    }

    #[test]
    fn test_caret_at_change_start() {
        assert_eq!(adjust_caret(3, &insert(3, "ab")), 5);
        assert_eq!(adjust_caret(3, &delete(3, "abc")), 3);
    }

    #[test]
    fn test_caret_inside_deletion_collapses() {
        assert_eq!(adjust_caret(5, &delete(3, "abcdefg")), 3);
        assert_eq!(adjust_caret(3, &delete(2, "and")), 2);
        assert_eq!(adjust_caret(3, &delete(0, "and")), 0);
        assert_eq!(adjust_caret(4, &delete(0, "and")), 1);
    }

    #[test]
    fn test_caret_close_after_insertion_start_collapses() {
        // The affected range is [start, start + |net|) for insertions too.
        assert_eq!(adjust_caret(3, &insert(2, "and")), 2);
    }

    #[test]
    fn test_caret_same_size_replacement_does_not_move() {
        assert_eq!(adjust_caret(5, &replace(2, "abc", "xyz")), 5);
    }

    #[test]
    fn test_caret_sequential_fold() {
        let changes = vec![insert(0, "ab"), delete(1, "bcd")];
        // 4 -> 6 after the insertion, then back by 3 after the deletion.
        assert_eq!(caret_position_after(4, &changes), 3);
        assert_eq!(caret_position_after(4, changes.iter().take(1)), 6);
    }

    #[test]
    fn test_selection_insertion_at_start_pushes_start() {
        assert_eq!(adjust_selection(3..8, &insert(3, "ab")), 5..10);
        // The caret rule agrees at the exact start; the end rule differs.
        assert_eq!(adjust_caret(3, &insert(3, "ab")), 5);
        assert_eq!(adjust_selection(3..3, &insert(3, "ab")), 3..3);
    }

    #[test]
    fn test_selection_insertion_at_end_stays_outside() {
        assert_eq!(adjust_selection(1..5, &insert(5, "xy")), 1..5);
    }

    #[test]
    fn test_selection_insertion_inside() {
        assert_eq!(adjust_selection(1..5, &insert(3, "Two")), 1..3);
    }

    #[test]
    fn test_selection_replacement() {
        assert_eq!(adjust_selection(3..8, &replace(3, "One", "Four")), 4..9);
        assert_eq!(adjust_selection(6..8, &replace(3, "One", "A")), 4..6);
    }

    #[test]
    fn test_selection_removal() {
        let removal = delete(3, "One");
        assert_eq!(adjust_selection(4..8, &removal), 3..5);
        assert_eq!(adjust_selection(7..8, &removal), 4..5);
        assert_eq!(adjust_selection(8..8, &removal), 5..5);
    }

    #[test]
    fn test_selection_through_several_changes() {
        let changes = [
            replace(3, "One", "Four"),
            replace(2, "This", ""),
            replace(3, "A", "Test"),
            replace(0, "", "Test"),
        ];
        assert_eq!(selection_after(1..8, changes.iter().take(1)), 1..9);
        assert_eq!(selection_after(1..8, changes.iter().take(2)), 1..5);
        assert_eq!(selection_after(1..8, changes.iter().take(3)), 1..3);
        // The leading insertion swallows both ends: each lies inside [0, 4).
        assert_eq!(selection_after(1..8, &changes), 0..0);
    }

    #[test]
    fn test_selection_never_inverted() {
        let changes = [delete(0, "abcdefghij")];
        let selection = selection_after(2..12, &changes);
        assert!(selection.start <= selection.end);
        assert_eq!(selection, 0..2);
    }
}
