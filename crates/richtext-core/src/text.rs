//! Character-offset helpers over UTF-8 strings.
//!
//! All offsets in this crate count Unicode scalar values (`char`s), never bytes.

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `char_offset`-th character, saturating at the end of `text`.
pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Substring over `[start, end)` in character offsets. Both bounds saturate.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let end = end.max(start);
    let from = byte_index(text, start);
    let to = from + byte_index(&text[from..], end - start);
    &text[from..to]
}

/// Split `text` into `(head, tail)` at a character offset.
pub(crate) fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_multibyte() {
        let text = "añb€c";
        assert_eq!(char_len(text), 5);
        assert_eq!(char_slice(text, 1, 4), "ñb€");
        assert_eq!(char_slice(text, 3, 99), "€c");
        assert_eq!(char_slice(text, 4, 2), "");
    }

    #[test]
    fn test_split_at_char() {
        assert_eq!(split_at_char("héllo", 2), ("hé", "llo"));
        assert_eq!(split_at_char("abc", 10), ("abc", ""));
    }
}
