use pretty_assertions::assert_eq;
use richtext_core::{
    ChangeQueueUndoManager, EditableStyledDocument, PlainTextChange, StyleSpans, StyledDocument,
    TextChange, UndoConfig, UndoManager, adjust_caret, adjust_selection, caret_position_after,
    selection_after,
};

fn insertion(at: usize, len: usize) -> PlainTextChange {
    TextChange::new(at, String::new(), "x".repeat(len))
}

fn deletion(from: usize, to: usize) -> PlainTextChange {
    TextChange::new(from, "x".repeat(to - from), String::new())
}

#[test]
fn test_caret_follows_documented_cases() {
    assert_eq!(adjust_caret(5, &insertion(2, 3)), 8);
    assert_eq!(adjust_caret(5, &deletion(3, 10)), 3);
    assert_eq!(adjust_caret(3, &insertion(3, 2)), 5);
    assert_eq!(adjust_caret(3, &deletion(3, 6)), 3);
}

#[test]
fn test_selection_start_and_end_rules_diverge() {
    let change = insertion(3, 2);

    // Same position, same change: the start follows the caret rule.
    assert_eq!(adjust_caret(3, &change), 5);
    assert_eq!(adjust_selection(3..8, &change).start, 5);

    // The end stays put when the insertion happens exactly there.
    assert_eq!(adjust_selection(0..3, &change), 0..3);
}

#[test]
fn test_caret_tracks_editable_document_edits() {
    let mut doc = EditableStyledDocument::new(StyledDocument::from_string("hello world", (), "s"));
    let mut changes = Vec::new();

    changes.push(doc.insert_text(0, ">> ").unwrap().plain_change);
    changes.push(doc.replace_text(9, 14, "you").unwrap().plain_change);
    assert_eq!(doc.text(), ">> hello you");

    // Caret before "world" in the original text.
    assert_eq!(caret_position_after(6, &changes), 9);
    assert_eq!(caret_position_after(6, changes.iter().take(1)), 9);
    assert_eq!(selection_after(6..11, &changes), 9..12);
}

#[test]
fn test_selection_follows_multi_change() {
    let mut doc = EditableStyledDocument::new(StyledDocument::from_string("(text)", (), "plain"));
    let nothing = StyledDocument::from_string("", (), "plain");

    // Strip both parentheses, then embolden what is left. Each range is read against the
    // document left by the replacements before it.
    let multi = doc
        .replace_multi(vec![
            (0..1, nothing.clone()),
            (4..5, nothing),
            (0..4, StyledDocument::from_string("text", (), "bold")),
        ])
        .unwrap();
    assert_eq!(doc.text(), "text");
    assert_eq!(*doc.snapshot().style_of_char(0), "bold");
    assert_eq!(multi.changes.len(), 3);

    // The restyle leaves the plain text alone and is not part of the plain projection.
    let plain = multi.plain_changes();
    assert_eq!(plain.len(), 2);
    assert_eq!(selection_after(1..5, &plain), 0..4);
    assert_eq!(caret_position_after(6, &plain), 4);
}

#[test]
fn test_set_style_of_paragraph() {
    let mut doc =
        EditableStyledDocument::new(StyledDocument::from_string("one\ntwo\nthree", 0u8, "plain"));
    doc.set_style_of_paragraph(1, "bold").unwrap();

    assert_eq!(
        doc.snapshot().style_spans(0, doc.len()),
        StyleSpans::singleton("plain", 4)
            .append_style("bold", 4)
            .append_style("plain", 5)
    );
}

#[test]
fn test_set_style_spans_across_paragraphs() {
    let mut doc = EditableStyledDocument::new(StyledDocument::from_string("ab\ncd", 0u8, "plain"));
    let spans = StyleSpans::singleton("red", 2).append_style("blue", 3);
    let edit = doc.set_style_spans(0, &spans).unwrap();

    assert!(edit.change.is_plain_text_identity());
    assert_eq!(edit.plain_change.net_length(), 0);
    let snapshot = doc.snapshot();
    assert_eq!(
        [0, 1, 3, 4].map(|i| *snapshot.style_of_char(i)),
        ["red", "red", "blue", "blue"]
    );
}

#[test]
fn test_undo_redo_through_history() {
    let mut doc =
        EditableStyledDocument::new(StyledDocument::from_string("abc\ndefg", (), "plain"));
    let mut undo = ChangeQueueUndoManager::new(UndoConfig::default());

    undo.record(doc.set_style(2, 5, "bold").unwrap().change);
    undo.prevent_merge();
    undo.record(doc.insert_text(8, "!").unwrap().change);
    undo.mark();
    assert!(undo.is_at_marked_position());

    undo.undo(&mut doc).unwrap();
    assert_eq!(doc.text(), "abc\ndefg");
    assert_eq!(*doc.snapshot().style_of_char(3), "bold");
    assert!(!undo.is_at_marked_position());

    undo.undo(&mut doc).unwrap();
    assert_eq!(
        doc.snapshot().style_spans(0, doc.len()),
        StyleSpans::singleton("plain", 8)
    );

    undo.redo(&mut doc).unwrap();
    undo.redo(&mut doc).unwrap();
    assert_eq!(doc.text(), "abc\ndefg!");
    assert_eq!(*doc.snapshot().style_of_char(4), "bold");
    assert!(undo.is_at_marked_position());

    let state = undo.state();
    assert_eq!((state.undo_depth, state.redo_depth), (2, 0));
}
