//! Paragraphs: one line of styled text plus a paragraph-level style.
//!
//! A [`Paragraph`] is either [`Normal`](Paragraph::Normal), holding at least one styled segment,
//! or [`Empty`](Paragraph::Empty), holding no text but a designated style for queries that need
//! one (for example a caret sitting on a blank line).
//!
//! Every operation returns a new paragraph; paragraphs are never mutated in place.
//!
//! Inside a normal paragraph, adjacent segments never share a style and no segment is empty,
//! except for a single empty segment standing for a zero-length paragraph.

use std::fmt;
use std::ops::Range;

use crate::error::ModelError;
use crate::segment::StyledSegment;
use crate::style_spans::{StyleSpans, StyleSpansBuilder};
use crate::text::{byte_index, char_slice, split_at_char};
use crate::two_dimensional::{Bias, TwoDimensional};

/// A paragraph with text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalParagraph<PS, S> {
    paragraph_style: PS,
    segments: Vec<StyledSegment<S>>,
    length: usize,
}

/// A paragraph without text, carrying the style to report for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyParagraph<PS, S> {
    paragraph_style: PS,
    empty_style: S,
}

/// One line of a styled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph<PS, S> {
    /// A paragraph made of styled segments.
    Normal(NormalParagraph<PS, S>),
    /// A zero-length paragraph that cannot infer a style for plain text.
    Empty(EmptyParagraph<PS, S>),
}

impl<PS, S> NormalParagraph<PS, S> {
    /// The paragraph style.
    pub fn paragraph_style(&self) -> &PS {
        &self.paragraph_style
    }

    /// The styled segments, in order.
    pub fn segments(&self) -> &[StyledSegment<S>] {
        &self.segments
    }
}

impl<PS, S> TwoDimensional for NormalParagraph<PS, S> {
    fn element_count(&self) -> usize {
        self.segments.len()
    }

    fn element_length(&self, index: usize) -> usize {
        self.segments.get(index).map_or(0, StyledSegment::len)
    }
}

impl<PS, S> EmptyParagraph<PS, S> {
    /// The paragraph style.
    pub fn paragraph_style(&self) -> &PS {
        &self.paragraph_style
    }

    /// The style reported for every query on this paragraph.
    pub fn empty_style(&self) -> &S {
        &self.empty_style
    }
}

impl<PS, S> Paragraph<PS, S> {
    /// Length in characters, excluding the line terminator.
    pub fn len(&self) -> usize {
        match self {
            Self::Normal(p) => p.length,
            Self::Empty(_) => 0,
        }
    }

    /// Returns `true` for a zero-length paragraph of either variant.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The paragraph style.
    pub fn paragraph_style(&self) -> &PS {
        match self {
            Self::Normal(p) => &p.paragraph_style,
            Self::Empty(p) => &p.paragraph_style,
        }
    }

    /// The styled segments; an [`Empty`](Paragraph::Empty) paragraph has none.
    pub fn segments(&self) -> &[StyledSegment<S>] {
        match self {
            Self::Normal(p) => &p.segments,
            Self::Empty(_) => &[],
        }
    }

    /// The plain text, excluding the line terminator.
    pub fn text(&self) -> String {
        self.segments().iter().map(StyledSegment::text).collect()
    }
}

impl<PS: Clone, S: Clone + PartialEq> Paragraph<PS, S> {
    /// A paragraph holding `text` in a single style.
    pub fn new(paragraph_style: PS, text: impl Into<String>, style: S) -> Self {
        Self::build(paragraph_style, vec![StyledSegment::new(text, style)])
    }

    /// A paragraph built from segments.
    ///
    /// Adjacent segments with equal styles are merged and empty segments dropped. Fails with
    /// [`ModelError::NoSegments`] when `segments` is empty.
    pub fn from_segments(
        paragraph_style: PS,
        segments: Vec<StyledSegment<S>>,
    ) -> Result<Self, ModelError> {
        if segments.is_empty() {
            return Err(ModelError::NoSegments);
        }
        Ok(Self::build(paragraph_style, segments))
    }

    /// A zero-length [`Empty`](Paragraph::Empty) paragraph.
    pub fn empty(paragraph_style: PS, empty_style: S) -> Self {
        Self::Empty(EmptyParagraph {
            paragraph_style,
            empty_style,
        })
    }

    // `segments` must be non-empty.
    fn build(paragraph_style: PS, segments: Vec<StyledSegment<S>>) -> Self {
        let segments = normalize(segments);
        let length = segments.iter().map(StyledSegment::len).sum();
        Self::Normal(NormalParagraph {
            paragraph_style,
            segments,
            length,
        })
    }

    /// The character at `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        let Self::Normal(p) = self else {
            return None;
        };
        let pos = p.offset_to_position(index, Bias::Forward);
        p.segments
            .get(pos.major())
            .and_then(|seg| seg.text().chars().nth(pos.minor()))
    }

    /// The text in `[from, to)`. Bounds saturate at the paragraph length.
    pub fn substring(&self, from: usize, to: usize) -> String {
        char_slice(&self.text(), from, to).to_string()
    }

    /// The text from `from` to the end.
    pub fn substring_from(&self, from: usize) -> String {
        self.substring(from, self.len())
    }

    /// Concatenate two paragraphs.
    ///
    /// The result keeps this paragraph's paragraph style, unless this paragraph is empty and
    /// `other` is not, in which case `other` is returned as-is.
    pub fn concat(&self, other: &Self) -> Self {
        match self {
            Self::Empty(_) => other.clone(),
            Self::Normal(p) => {
                if other.is_empty() {
                    return self.clone();
                }
                if p.length == 0 {
                    return other.clone();
                }
                let mut segments = p.segments.clone();
                segments.extend(other.segments().iter().cloned());
                Self::build(p.paragraph_style.clone(), segments)
            }
        }
    }

    /// Like [`concat`](Self::concat), except that when both paragraphs are empty the result is
    /// `other`.
    pub fn concat_r(&self, other: &Self) -> Self {
        if self.is_empty() && other.is_empty() {
            other.clone()
        } else {
            self.concat(other)
        }
    }

    /// Append plain text in the style of the last segment.
    ///
    /// Fails with [`ModelError::UnsupportedOnEmptyParagraph`] on an empty-variant paragraph.
    pub fn concat_str(&self, text: &str) -> Result<Self, ModelError> {
        let Self::Normal(p) = self else {
            return Err(ModelError::UnsupportedOnEmptyParagraph);
        };
        if text.is_empty() {
            return Ok(self.clone());
        }

        let mut segments = p.segments.clone();
        if let Some(last) = segments.pop() {
            let (mut joined, style) = last.into_parts();
            joined.push_str(text);
            segments.push(StyledSegment::new(joined, style));
        }
        Ok(Self::build(p.paragraph_style.clone(), segments))
    }

    /// Insert plain text at `offset` in the style of the segment it lands in.
    ///
    /// At a segment boundary the text joins the preceding segment. Fails with
    /// [`ModelError::UnsupportedOnEmptyParagraph`] on an empty-variant paragraph.
    pub fn insert_str(&self, offset: usize, text: &str) -> Result<Self, ModelError> {
        let Self::Normal(p) = self else {
            return Err(ModelError::UnsupportedOnEmptyParagraph);
        };
        if offset > p.length {
            return Err(ModelError::OffsetOutOfBounds {
                offset: offset as i64,
                len: p.length,
            });
        }
        if text.is_empty() {
            return Ok(self.clone());
        }

        let pos = p.offset_to_position(offset, Bias::Backward);
        let (major, minor) = (pos.major(), pos.minor());
        let mut segments = p.segments.clone();
        let seg = &segments[major];
        let mut joined = seg.text().to_string();
        joined.insert_str(byte_index(&joined, minor), text);
        segments[major] = StyledSegment::new(joined, seg.style().clone());
        Ok(Self::build(p.paragraph_style.clone(), segments))
    }

    /// The sub-paragraph over `[start, end)`. Bounds saturate at the paragraph length.
    ///
    /// An empty result keeps the style at `start`.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Self {
        let Self::Normal(p) = self else {
            return self.clone();
        };
        let end = end.min(p.length);
        let start = start.min(end);
        if start == 0 && end == p.length {
            return self.clone();
        }
        if start == end {
            let style = self.style_at_position(start).clone();
            return Self::new(p.paragraph_style.clone(), "", style);
        }

        let mut segments = Vec::new();
        let mut seg_start = 0;
        for seg in &p.segments {
            let seg_end = seg_start + seg.len();
            if seg_end > start && seg_start < end {
                segments.push(seg.slice(
                    start.saturating_sub(seg_start),
                    end.min(seg_end) - seg_start,
                ));
            }
            if seg_end >= end {
                break;
            }
            seg_start = seg_end;
        }
        Self::build(p.paragraph_style.clone(), segments)
    }

    /// The first `length` characters.
    pub fn trim(&self, length: usize) -> Self {
        self.sub_sequence(0, length)
    }

    /// Everything from `start` to the end.
    pub fn sub_sequence_from(&self, start: usize) -> Self {
        self.sub_sequence(start, self.len())
    }

    /// Remove `[start, end)`.
    pub fn delete(&self, start: usize, end: usize) -> Self {
        self.trim(start).concat(&self.sub_sequence_from(end))
    }

    /// Apply `style` to the whole paragraph.
    pub fn restyle(&self, style: S) -> Self {
        match self {
            Self::Normal(p) => Self::new(p.paragraph_style.clone(), self.text(), style),
            Self::Empty(_) => self.clone(),
        }
    }

    /// Apply `style` to `[from, to)`.
    pub fn restyle_range(&self, from: usize, to: usize, style: S) -> Self {
        let to = to.min(self.len());
        if from >= to {
            return self.clone();
        }
        let middle = self.sub_sequence(from, to).restyle(style);
        self.trim(from)
            .concat(&middle)
            .concat(&self.sub_sequence_from(to))
    }

    /// Apply `spans` starting at `from`. Spans reaching past the end are cut off.
    pub fn restyle_spans(&self, from: usize, spans: &StyleSpans<S>) -> Self {
        let Self::Normal(p) = self else {
            return self.clone();
        };
        let len = p.length;
        if from >= len || spans.is_empty() {
            return self.clone();
        }
        let to = len.min(from + spans.len());

        let text = self.substring(from, to);
        let mut rest = text.as_str();
        let mut segments = Vec::with_capacity(spans.span_count());
        for span in spans {
            if rest.is_empty() {
                break;
            }
            let (head, tail) = split_at_char(rest, span.len());
            segments.push(StyledSegment::new(head, span.style().clone()));
            rest = tail;
        }
        let middle = Self::build(p.paragraph_style.clone(), segments);

        self.trim(from)
            .concat(&middle)
            .concat(&self.sub_sequence_from(to))
    }

    /// The same paragraph with a different paragraph style.
    pub fn set_paragraph_style(&self, paragraph_style: PS) -> Self {
        match self {
            Self::Normal(p) => Self::Normal(NormalParagraph {
                paragraph_style,
                segments: p.segments.clone(),
                length: p.length,
            }),
            Self::Empty(p) => Self::empty(paragraph_style, p.empty_style.clone()),
        }
    }

    /// The style of the character at `index`.
    ///
    /// An index at or past the end reports the style of the last character.
    pub fn style_of_char(&self, index: usize) -> &S {
        match self {
            Self::Normal(p) => {
                let pos = p.offset_to_position(index, Bias::Forward);
                let major = pos.major().min(p.segments.len() - 1);
                p.segments[major].style()
            }
            Self::Empty(p) => &p.empty_style,
        }
    }

    /// The style of the character immediately preceding `position`, or of the first character
    /// when `position` is 0.
    pub fn style_at_position(&self, position: usize) -> &S {
        self.style_of_char(position.saturating_sub(1))
    }

    /// The range of homogeneous style containing `position`.
    ///
    /// At a boundary between two style runs, the preceding run is returned.
    pub fn style_range_at_position(&self, position: usize) -> Range<usize> {
        match self {
            Self::Normal(p) => {
                let pos = p.offset_to_position(position.min(p.length), Bias::Backward);
                let start = pos.to_offset() - pos.minor();
                start..start + p.element_length(pos.major())
            }
            Self::Empty(_) => 0..0,
        }
    }

    /// Style spans covering the whole paragraph.
    pub fn style_spans(&self) -> StyleSpans<S> {
        match self {
            Self::Normal(p) => {
                let mut builder = StyleSpansBuilder::with_capacity(p.segments.len());
                for seg in &p.segments {
                    builder.add_style(seg.style().clone(), seg.len());
                }
                builder.finish()
            }
            Self::Empty(p) => StyleSpans::singleton(p.empty_style.clone(), 0),
        }
    }

    /// Style spans covering `[from, to)`.
    ///
    /// `to` may be one past the end, in which case the line terminator takes the style of the
    /// last character.
    pub fn style_spans_range(&self, from: usize, to: usize) -> StyleSpans<S> {
        match self {
            Self::Normal(_) => self.style_spans().sub_view(from, to),
            Self::Empty(p) => StyleSpans::singleton(p.empty_style.clone(), to.saturating_sub(from)),
        }
    }
}

impl<PS, S> fmt::Display for Paragraph<PS, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Normal(p) = self {
            for seg in &p.segments {
                f.write_str(seg.text())?;
            }
        }
        Ok(())
    }
}

fn normalize<S: Clone + PartialEq>(segments: Vec<StyledSegment<S>>) -> Vec<StyledSegment<S>> {
    let mut out: Vec<StyledSegment<S>> = Vec::with_capacity(segments.len());
    let mut fallback = None;
    for seg in segments {
        if seg.is_empty() {
            fallback.get_or_insert(seg);
            continue;
        }
        match out.last_mut() {
            Some(last) if last.style() == seg.style() => {
                let merged = format!("{}{}", last.text(), seg.text());
                *last = StyledSegment::new(merged, seg.style().clone());
            }
            _ => out.push(seg),
        }
    }
    if out.is_empty() {
        out.extend(fallback);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Par = Paragraph<u8, &'static str>;

    fn par(runs: &[(&str, &'static str)]) -> Par {
        let segments = runs
            .iter()
            .map(|&(text, style)| StyledSegment::new(text, style))
            .collect();
        Paragraph::from_segments(0, segments).unwrap()
    }

    fn runs(p: &Par) -> Vec<(String, &'static str)> {
        p.segments()
            .iter()
            .map(|s| (s.text().to_string(), *s.style()))
            .collect()
    }

    #[test]
    fn test_from_segments_merges_and_drops_empty() {
        let p = par(&[("ab", "x"), ("", "y"), ("cd", "x"), ("e", "z")]);
        assert_eq!(
            runs(&p),
            vec![("abcd".to_string(), "x"), ("e".to_string(), "z")]
        );
        assert_eq!(p.len(), 5);
        assert_eq!(Paragraph::<u8, &str>::from_segments(0, vec![]), Err(ModelError::NoSegments));
    }

    #[test]
    fn test_length_is_sum_of_segments() {
        let p = par(&[("héllo", "a"), (" wörld", "b")]);
        let sum: usize = p.segments().iter().map(StyledSegment::len).sum();
        assert_eq!(p.len(), sum);
        assert_eq!(p.len(), 11);
    }

    #[test]
    fn test_style_of_char_vs_style_at_position() {
        let p = par(&[("abc", "x"), ("de", "y")]);
        assert_eq!(*p.style_of_char(2), "x");
        assert_eq!(*p.style_of_char(3), "y");
        assert_eq!(*p.style_of_char(99), "y");

        assert_eq!(*p.style_at_position(0), "x");
        assert_eq!(*p.style_at_position(3), "x");
        assert_eq!(*p.style_at_position(4), "y");
    }

    #[test]
    fn test_style_range_at_boundary_prefers_preceding() {
        let p = par(&[("abc", "x"), ("de", "y")]);
        assert_eq!(p.style_range_at_position(0), 0..3);
        assert_eq!(p.style_range_at_position(3), 0..3);
        assert_eq!(p.style_range_at_position(4), 3..5);
        assert_eq!(p.style_range_at_position(5), 3..5);
    }

    #[test]
    fn test_sub_sequence_across_segments() {
        let p = par(&[("abc", "x"), ("de", "y"), ("fg", "z")]);
        let sub = p.sub_sequence(2, 6);
        assert_eq!(
            runs(&sub),
            vec![
                ("c".to_string(), "x"),
                ("de".to_string(), "y"),
                ("f".to_string(), "z")
            ]
        );
    }

    #[test]
    fn test_empty_sub_sequence_keeps_style() {
        let p = par(&[("abc", "x"), ("de", "y")]);
        let sub = p.sub_sequence(4, 4);
        assert_eq!(sub.len(), 0);
        assert_eq!(*sub.style_at_position(0), "y");
        assert!(matches!(sub, Paragraph::Normal(_)));
    }

    #[test]
    fn test_concat_merges_seam() {
        let a = par(&[("ab", "x")]);
        let b = Paragraph::from_segments(7, vec![StyledSegment::new("cd", "x")]).unwrap();
        let joined = a.concat(&b);
        assert_eq!(runs(&joined), vec![("abcd".to_string(), "x")]);
        assert_eq!(*joined.paragraph_style(), 0);
    }

    #[test]
    fn test_concat_empty_takes_other_paragraph_style() {
        let empty = Paragraph::new(1u8, "", "x");
        let other = Paragraph::new(2u8, "abc", "y");
        assert_eq!(*empty.concat(&other).paragraph_style(), 2);
        assert_eq!(*other.concat(&empty).paragraph_style(), 2);

        let other_empty = Paragraph::new(2u8, "", "y");
        assert_eq!(*empty.concat(&other_empty).paragraph_style(), 1);
        assert_eq!(*empty.concat_r(&other_empty).paragraph_style(), 2);
    }

    #[test]
    fn test_insert_at_boundary_joins_preceding_segment() {
        let p = par(&[("abc", "x"), ("de", "y")]);
        let inserted = p.insert_str(3, "Z").unwrap();
        assert_eq!(
            runs(&inserted),
            vec![("abcZ".to_string(), "x"), ("de".to_string(), "y")]
        );
        assert_eq!(
            p.insert_str(9, "Z"),
            Err(ModelError::OffsetOutOfBounds { offset: 9, len: 5 })
        );
    }

    #[test]
    fn test_empty_variant_rejects_plain_text() {
        let empty: Par = Paragraph::empty(0, "e");
        assert_eq!(
            empty.concat_str("abc"),
            Err(ModelError::UnsupportedOnEmptyParagraph)
        );
        assert_eq!(
            empty.insert_str(0, "abc"),
            Err(ModelError::UnsupportedOnEmptyParagraph)
        );

        let other = par(&[("abc", "x")]);
        assert_eq!(empty.concat(&other), other);
    }

    #[test]
    fn test_empty_variant_queries() {
        let empty: Par = Paragraph::empty(0, "e");
        assert_eq!(*empty.style_of_char(0), "e");
        assert_eq!(*empty.style_at_position(5), "e");
        assert_eq!(empty.style_range_at_position(0), 0..0);
        assert_eq!(empty.style_spans_range(0, 1).len(), 1);
        assert_eq!(empty.char_at(0), None);
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_restyle_range() {
        let p = par(&[("abcdef", "x")]);
        let restyled = p.restyle_range(2, 4, "y");
        assert_eq!(
            runs(&restyled),
            vec![
                ("ab".to_string(), "x"),
                ("cd".to_string(), "y"),
                ("ef".to_string(), "x")
            ]
        );
        assert_eq!(restyled.restyle_range(2, 4, "x"), p);
    }

    #[test]
    fn test_restyle_spans_cuts_at_end() {
        let p = par(&[("abcdef", "x")]);
        let spans = StyleSpans::singleton("y", 2).append_style("z", 10);
        let restyled = p.restyle_spans(3, &spans);
        assert_eq!(
            runs(&restyled),
            vec![
                ("abc".to_string(), "x"),
                ("de".to_string(), "y"),
                ("f".to_string(), "z")
            ]
        );
    }

    #[test]
    fn test_delete_and_char_access() {
        let p = par(&[("abc", "x"), ("def", "y")]);
        let deleted = p.delete(2, 4);
        assert_eq!(deleted.text(), "abef");
        assert_eq!(
            runs(&deleted),
            vec![("ab".to_string(), "x"), ("ef".to_string(), "y")]
        );
        assert_eq!(p.char_at(3), Some('d'));
        assert_eq!(p.char_at(6), None);
        assert_eq!(p.substring(1, 4), "bcd");
    }

    #[test]
    fn test_style_spans_range_styles_terminator() {
        let p = par(&[("abc", "x"), ("de", "y")]);
        let spans = p.style_spans_range(4, 6);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans.span_count(), 1);
        assert_eq!(*spans.span(0).unwrap().style(), "y");
    }
}
