//! Immutable styled documents.
//!
//! A [`StyledDocument`] is a non-empty list of paragraphs. Paragraphs are held behind [`Arc`] so
//! that every edit produces a new snapshot sharing all unaffected paragraphs with the old one.
//!
//! # Offsets
//!
//! Flat offsets count characters plus one terminator between consecutive paragraphs:
//!
//! ```text
//! "abc" | "defg"
//!  0 1 2 3  4 5 6 7 8
//!        ^ offset 3: end of paragraph 0 (its terminator)
//!          ^ offset 4: start of paragraph 1
//! ```
//!
//! The document implements [`TwoDimensional`] with `element_length(i) = len(i) + 1` for every
//! paragraph but the last. Resolving with [`Bias::Forward`] therefore keeps the terminator
//! offset inside the paragraph it ends.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{StyledDocument, TwoDimensional, Bias};
//!
//! let doc = StyledDocument::from_string("abc\ndefg", (), "plain");
//! assert_eq!(doc.len(), 8);
//! assert_eq!(doc.paragraph_count(), 2);
//!
//! let pos = doc.offset_to_position(4, Bias::Forward);
//! assert_eq!((pos.major(), pos.minor()), (1, 0));
//! ```

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::change::RichTextChange;
use crate::error::ModelError;
use crate::line_terminator::LineTerminator;
use crate::paragraph::Paragraph;
use crate::segment::StyledSegment;
use crate::style_spans::{StyleSpans, StyleSpansBuilder};
use crate::two_dimensional::{Bias, TwoDimensional};

/// An immutable snapshot of styled paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledDocument<PS, S> {
    paragraphs: Vec<Arc<Paragraph<PS, S>>>,
    length: usize,
}

/// The paragraph-level splice performed by a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphModification<PS, S> {
    /// Index of the first affected paragraph.
    pub index: usize,
    /// Paragraphs of the old document that were replaced.
    pub removed: Vec<Arc<Paragraph<PS, S>>>,
    /// Paragraphs of the new document that replaced them.
    pub added: Vec<Arc<Paragraph<PS, S>>>,
}

impl<PS, S> ParagraphModification<PS, S> {
    /// Change in paragraph count.
    pub fn net_paragraphs(&self) -> isize {
        self.added.len() as isize - self.removed.len() as isize
    }
}

/// Everything produced by [`StyledDocument::replace`].
#[derive(Debug, Clone)]
pub struct Replacement<PS, S> {
    /// The new snapshot.
    pub document: StyledDocument<PS, S>,
    /// The change that turns the old snapshot into the new one.
    pub change: RichTextChange<PS, S>,
    /// The paragraph splice.
    pub modification: ParagraphModification<PS, S>,
}

impl<PS: Clone, S: Clone + PartialEq> StyledDocument<PS, S> {
    /// Build a document from plain text, splitting paragraphs on any line terminator.
    pub fn from_string(text: &str, paragraph_style: PS, style: S) -> Self {
        let paragraphs = LineTerminator::split_lines(text)
            .map(|line| Arc::new(Paragraph::new(paragraph_style.clone(), line, style.clone())))
            .collect();
        Self::from_shared(paragraphs)
    }

    /// A single-paragraph document holding one segment.
    pub fn from_segment(segment: StyledSegment<S>, paragraph_style: PS) -> Self {
        let (text, style) = segment.into_parts();
        Self::from_shared(vec![Arc::new(Paragraph::new(paragraph_style, text, style))])
    }

    /// Build a document from paragraphs. Fails with [`ModelError::NoParagraphs`] on an empty list.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph<PS, S>>) -> Result<Self, ModelError> {
        if paragraphs.is_empty() {
            return Err(ModelError::NoParagraphs);
        }
        Ok(Self::from_shared(
            paragraphs.into_iter().map(Arc::new).collect(),
        ))
    }

    // `paragraphs` must be non-empty.
    fn from_shared(paragraphs: Vec<Arc<Paragraph<PS, S>>>) -> Self {
        debug_assert!(!paragraphs.is_empty(), "document without paragraphs");
        let length = paragraphs.iter().map(|p| p.len()).sum::<usize>() + paragraphs.len() - 1;
        Self { paragraphs, length }
    }

    /// Total length in characters, counting one terminator between paragraphs.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` for a single empty paragraph.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of paragraphs (always at least one).
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// The shared paragraph handles.
    pub fn paragraphs(&self) -> &[Arc<Paragraph<PS, S>>] {
        &self.paragraphs
    }

    /// The paragraph at `index`, if any.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph<PS, S>> {
        self.paragraphs.get(index).map(Arc::as_ref)
    }

    /// Length of the paragraph at `index`, excluding its terminator.
    pub fn paragraph_len(&self, index: usize) -> Option<usize> {
        self.paragraph(index).map(Paragraph::len)
    }

    /// The plain text, paragraphs joined with `'\n'`.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// The plain text of `[start, end)`.
    pub fn text_range(&self, start: usize, end: usize) -> String {
        self.sub_sequence(start, end).text()
    }

    /// The character at `index`; a paragraph terminator reads as `'\n'`.
    pub fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.length {
            return None;
        }
        let pos = self.offset_to_position(index, Bias::Forward);
        let par = &self.paragraphs[pos.major()];
        if pos.minor() == par.len() {
            Some('\n')
        } else {
            par.char_at(pos.minor())
        }
    }

    /// A one-paragraph document sharing paragraph `index`.
    pub fn sub_document(&self, index: usize) -> Option<Self> {
        let par = self.paragraphs.get(index)?;
        Some(Self::from_shared(vec![Arc::clone(par)]))
    }

    /// The sub-document over `[start, end)`. Bounds saturate at the document length.
    ///
    /// Paragraphs strictly inside the range are shared with this document.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.length);
        let start = start.min(end);
        let s = self.offset_to_position(start, Bias::Forward);
        let e = self.offset_to_position(end, Bias::Forward);
        let (first, last) = (s.major(), e.major());

        if first == last {
            let par = self.paragraphs[first].sub_sequence(s.minor(), e.minor());
            return Self::from_shared(vec![Arc::new(par)]);
        }

        let mut paragraphs = Vec::with_capacity(last - first + 1);
        paragraphs.push(Arc::new(self.paragraphs[first].sub_sequence_from(s.minor())));
        paragraphs.extend(self.paragraphs[first + 1..last].iter().cloned());
        paragraphs.push(Arc::new(self.paragraphs[last].trim(e.minor())));
        Self::from_shared(paragraphs)
    }

    /// Join two documents, merging this document's last paragraph with `other`'s first.
    pub fn concat(&self, other: &Self) -> Self {
        self.concat_with(other, Paragraph::concat)
    }

    fn concat_r(&self, other: &Self) -> Self {
        self.concat_with(other, Paragraph::concat_r)
    }

    fn concat_with<F>(&self, other: &Self, join: F) -> Self
    where
        F: FnOnce(&Paragraph<PS, S>, &Paragraph<PS, S>) -> Paragraph<PS, S>,
    {
        let (init, last) = self.paragraphs.split_at(self.paragraphs.len() - 1);
        let (first, tail) = other.paragraphs.split_at(1);

        let mut paragraphs = Vec::with_capacity(self.paragraphs.len() + other.paragraphs.len() - 1);
        paragraphs.extend(init.iter().cloned());
        paragraphs.push(Arc::new(join(&last[0], &first[0])));
        paragraphs.extend(tail.iter().cloned());
        Self::from_shared(paragraphs)
    }

    /// Split at a flat offset. Bounds saturate at the document length.
    pub fn split(&self, offset: usize) -> (Self, Self) {
        let pos = self.offset_to_position(offset.min(self.length), Bias::Forward);
        self.split_unchecked(pos.major(), pos.minor())
    }

    /// Split inside paragraph `paragraph` at `column`.
    pub fn split_at(&self, paragraph: usize, column: usize) -> Result<(Self, Self), ModelError> {
        self.check_paragraph(paragraph)?;
        Ok(self.split_unchecked(paragraph, column))
    }

    fn split_unchecked(&self, row: usize, col: usize) -> (Self, Self) {
        let par = &self.paragraphs[row];

        let mut left = Vec::with_capacity(row + 1);
        left.extend(self.paragraphs[..row].iter().cloned());
        left.push(Arc::new(par.trim(col)));

        let mut right = Vec::with_capacity(self.paragraphs.len() - row);
        right.push(Arc::new(par.sub_sequence_from(col)));
        right.extend(self.paragraphs[row + 1..].iter().cloned());

        (Self::from_shared(left), Self::from_shared(right))
    }

    /// Replace `[from, to)` with `replacement`.
    pub fn replace(
        &self,
        from: usize,
        to: usize,
        replacement: &Self,
    ) -> Result<Replacement<PS, S>, ModelError> {
        self.replace_with(from, to, |_| replacement.clone())
    }

    /// Replace `[from, to)` with the document computed from the removed content.
    pub fn replace_with<F>(
        &self,
        from: usize,
        to: usize,
        f: F,
    ) -> Result<Replacement<PS, S>, ModelError>
    where
        F: FnOnce(&Self) -> Self,
    {
        self.check_range(from, to)?;
        let start = self.offset_to_position(from, Bias::Forward);
        let end = self.offset_to_position(to, Bias::Forward);
        let (first, last) = (start.major(), end.major());

        let (left, right) = self.split_unchecked(last, end.minor());
        let (left, removed) = left.split_unchecked(first, start.minor());
        let replacement = f(&removed);
        let document = left.concat_r(&replacement).concat(&right);

        let modification = ParagraphModification {
            index: first,
            removed: self.paragraphs[first..=last].to_vec(),
            added: document.paragraphs[first..first + replacement.paragraph_count()].to_vec(),
        };
        log::trace!(
            "replaced {from}..{to}: {} paragraph(s) -> {}",
            modification.removed.len(),
            modification.added.len()
        );

        Ok(Replacement {
            document,
            change: RichTextChange::new(from, removed, replacement),
            modification,
        })
    }

    /// Replace paragraph `index` with `f` applied to it.
    pub fn replace_paragraph<F>(&self, index: usize, f: F) -> Result<Replacement<PS, S>, ModelError>
    where
        F: FnMut(&Paragraph<PS, S>) -> Paragraph<PS, S>,
    {
        self.check_paragraph(index)?;
        let from = self.position(index, 0).to_offset();
        let to = from + self.paragraphs[index].len();
        self.replace_with(from, to, |removed| removed.map_paragraphs(f))
    }

    /// Apply `f` to every paragraph.
    pub fn map_paragraphs<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Paragraph<PS, S>) -> Paragraph<PS, S>,
    {
        Self::from_shared(self.paragraphs.iter().map(|p| Arc::new(f(p))).collect())
    }

    /// Apply `style` to `[from, to)`.
    pub fn restyle(
        &self,
        from: usize,
        to: usize,
        style: S,
    ) -> Result<Replacement<PS, S>, ModelError> {
        self.replace_with(from, to, |removed| {
            removed.map_paragraphs(|p| p.restyle(style.clone()))
        })
    }

    /// Apply `style` to all of paragraph `index`.
    pub fn restyle_paragraph(
        &self,
        index: usize,
        style: S,
    ) -> Result<Replacement<PS, S>, ModelError> {
        self.replace_paragraph(index, |p| p.restyle(style.clone()))
    }

    /// Apply `spans` starting at `from`. Terminators consume one character of the spans.
    pub fn restyle_spans(
        &self,
        from: usize,
        spans: &StyleSpans<S>,
    ) -> Result<Replacement<PS, S>, ModelError> {
        self.replace_with(from, from + spans.len(), |removed| {
            let mut offset = 0;
            removed.map_paragraphs(|p| {
                let len = p.len();
                let restyled = p.restyle_spans(0, &spans.sub_view(offset, offset + len));
                offset += len + 1;
                restyled
            })
        })
    }

    /// Set the paragraph style of paragraph `index`.
    pub fn set_paragraph_style(
        &self,
        index: usize,
        paragraph_style: PS,
    ) -> Result<Replacement<PS, S>, ModelError> {
        self.replace_paragraph(index, |p| p.set_paragraph_style(paragraph_style.clone()))
    }

    /// The style of the character at `index`.
    pub fn style_of_char(&self, index: usize) -> &S {
        let pos = self.offset_to_position(index, Bias::Forward);
        self.paragraphs[pos.major()].style_of_char(pos.minor())
    }

    /// The style of the character at `column` in paragraph `paragraph`.
    pub fn style_of_char_in(&self, paragraph: usize, column: usize) -> Option<&S> {
        self.paragraph(paragraph).map(|p| p.style_of_char(column))
    }

    /// The style immediately preceding `position`.
    ///
    /// At the start of a paragraph this is the style of that paragraph's first character.
    pub fn style_at_position(&self, position: usize) -> &S {
        let pos = self.offset_to_position(position, Bias::Forward);
        self.paragraphs[pos.major()].style_at_position(pos.minor())
    }

    /// The style preceding `column` in paragraph `paragraph`.
    pub fn style_at_position_in(&self, paragraph: usize, column: usize) -> Option<&S> {
        self.paragraph(paragraph).map(|p| p.style_at_position(column))
    }

    /// The paragraph style of paragraph `index`.
    pub fn paragraph_style(&self, index: usize) -> Option<&PS> {
        self.paragraph(index).map(Paragraph::paragraph_style)
    }

    /// The paragraph style of the paragraph containing `position`.
    pub fn paragraph_style_at_position(&self, position: usize) -> &PS {
        let pos = self.offset_to_position(position, Bias::Forward);
        self.paragraphs[pos.major()].paragraph_style()
    }

    /// The column range of homogeneous style containing `position`, within its paragraph.
    pub fn style_range_at_position(&self, position: usize) -> Range<usize> {
        let pos = self.offset_to_position(position, Bias::Forward);
        self.paragraphs[pos.major()].style_range_at_position(pos.minor())
    }

    /// [`style_range_at_position`](Self::style_range_at_position) addressed by paragraph and
    /// column.
    pub fn style_range_at_position_in(
        &self,
        paragraph: usize,
        column: usize,
    ) -> Option<Range<usize>> {
        self.paragraph(paragraph)
            .map(|p| p.style_range_at_position(column))
    }

    /// Style spans covering `[from, to)`. Each terminator inside the range takes the style of
    /// the character before it.
    ///
    /// A range with `to <= from` yields one zero-length span in the style at `from`.
    pub fn style_spans(&self, from: usize, to: usize) -> StyleSpans<S> {
        let start = self.offset_to_position(from, Bias::Forward);
        let end = if to <= from {
            start
        } else {
            start.offset_by(to.saturating_sub(from) as isize, Bias::Backward)
        };
        let (first, last) = (start.major(), end.major());

        if first == last {
            return self.paragraphs[first].style_spans_range(start.minor(), end.minor());
        }

        let mut builder = StyleSpansBuilder::new();
        let head = &self.paragraphs[first];
        builder.add_all(head.style_spans_range(start.minor(), head.len() + 1));
        for par in &self.paragraphs[first + 1..last] {
            builder.add_all(par.style_spans_range(0, par.len() + 1));
        }
        builder.add_all(self.paragraphs[last].style_spans_range(0, end.minor()));
        builder.finish()
    }

    /// Style spans of paragraph `index`.
    pub fn paragraph_style_spans(&self, index: usize) -> Option<StyleSpans<S>> {
        self.paragraph(index).map(Paragraph::style_spans)
    }

    /// Style spans of `[from, to)` within paragraph `index`.
    pub fn paragraph_style_spans_range(
        &self,
        index: usize,
        from: usize,
        to: usize,
    ) -> Option<StyleSpans<S>> {
        self.paragraph(index).map(|p| p.style_spans_range(from, to))
    }

    /// The flat offset of `column` in paragraph `paragraph`.
    ///
    /// A column past the paragraph end continues into the following paragraphs and a negative
    /// column into the preceding ones. Fails when the result falls outside `[0, len]`.
    pub fn absolute_position(&self, paragraph: usize, column: isize) -> Result<usize, ModelError> {
        self.check_paragraph(paragraph)?;
        let base = self.position(paragraph, 0).to_offset() as i64;
        let offset = base + column as i64;
        usize::try_from(offset)
            .ok()
            .filter(|&o| o <= self.length)
            .ok_or(ModelError::OffsetOutOfBounds {
                offset,
                len: self.length,
            })
    }

    fn check_paragraph(&self, index: usize) -> Result<(), ModelError> {
        if index < self.paragraphs.len() {
            Ok(())
        } else {
            Err(ModelError::ParagraphIndexOutOfBounds {
                index,
                count: self.paragraphs.len(),
            })
        }
    }

    fn check_range(&self, from: usize, to: usize) -> Result<(), ModelError> {
        if from > to {
            return Err(ModelError::InvalidRange {
                start: from,
                end: to,
            });
        }
        if to > self.length {
            return Err(ModelError::OffsetOutOfBounds {
                offset: to as i64,
                len: self.length,
            });
        }
        Ok(())
    }
}

impl<PS, S> TwoDimensional for StyledDocument<PS, S> {
    fn element_count(&self) -> usize {
        self.paragraphs.len()
    }

    fn element_length(&self, index: usize) -> usize {
        let Some(par) = self.paragraphs.get(index) else {
            return 0;
        };
        let len = par.len();
        if index + 1 < self.paragraphs.len() {
            len + 1
        } else {
            len
        }
    }
}

impl<PS, S> fmt::Display for StyledDocument<PS, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, par) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{par}")?;
        }
        Ok(())
    }
}
