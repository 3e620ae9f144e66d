//! Run-length encoded style runs.
//!
//! [`StyleSpans`] describes the styling of a character range as a list of `(style, length)`
//! runs. Two invariants hold for every value produced by this module:
//!
//! - adjacent spans never share a style (equal neighbors are merged on every operation);
//! - there is always at least one span, and a zero-length span only ever appears as the sole
//!   span of an empty range.

use crate::error::ModelError;
use crate::two_dimensional::{Bias, TwoDimensional};

/// A run of `length` characters sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSpan<S> {
    style: S,
    length: usize,
}

impl<S> StyleSpan<S> {
    /// Create a span of `length` characters.
    pub fn new(style: S, length: usize) -> Self {
        Self { style, length }
    }

    /// Create a span from a signed length, rejecting negative values.
    pub fn try_from_signed(style: S, length: i64) -> Result<Self, ModelError> {
        usize::try_from(length)
            .map(|length| Self::new(style, length))
            .map_err(|_| ModelError::NegativeSpanLength(length))
    }

    /// The style shared by every character of the span.
    pub fn style(&self) -> &S {
        &self.style
    }

    /// Number of characters covered by the span.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Consume the span, returning its style and length.
    pub fn into_parts(self) -> (S, usize) {
        (self.style, self.length)
    }
}

/// An immutable, non-empty list of style spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSpans<S> {
    spans: Vec<StyleSpan<S>>,
    length: usize,
}

impl<S: Clone + PartialEq> StyleSpans<S> {
    /// A single span covering `length` characters.
    pub fn singleton(style: S, length: usize) -> Self {
        Self::from_span(StyleSpan::new(style, length))
    }

    /// A single-span value.
    pub fn from_span(span: StyleSpan<S>) -> Self {
        Self {
            length: span.len(),
            spans: vec![span],
        }
    }

    /// Total number of characters covered.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the spans cover no characters.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of spans (always at least one).
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// The span at `index`, if any.
    pub fn span(&self, index: usize) -> Option<&StyleSpan<S>> {
        self.spans.get(index)
    }

    /// Iterate over the spans in order.
    pub fn iter(&self) -> std::slice::Iter<'_, StyleSpan<S>> {
        self.spans.iter()
    }

    /// Iterate over the span styles in order.
    pub fn styles(&self) -> impl Iterator<Item = &S> + '_ {
        self.spans.iter().map(StyleSpan::style)
    }

    /// Append a span, merging it into the last span when the styles are equal.
    ///
    /// Appending a zero-length span is a no-op.
    pub fn append(&self, span: StyleSpan<S>) -> Self {
        if span.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return Self::from_span(span);
        }

        let mut spans = self.spans.clone();
        push_merging(&mut spans, span);
        Self::from_merged(spans)
    }

    /// Shorthand for [`append`](Self::append) with a freshly built span.
    pub fn append_style(&self, style: S, length: usize) -> Self {
        self.append(StyleSpan::new(style, length))
    }

    /// Prepend a span, merging it into the first span when the styles are equal.
    ///
    /// Prepending a zero-length span is a no-op.
    pub fn prepend(&self, span: StyleSpan<S>) -> Self {
        if span.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return Self::from_span(span);
        }

        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        if self.spans[0].style == span.style {
            spans.push(StyleSpan::new(span.style, span.length + self.spans[0].length));
            spans.extend(self.spans[1..].iter().cloned());
        } else {
            spans.push(span);
            spans.extend(self.spans.iter().cloned());
        }
        Self::from_merged(spans)
    }

    /// Shorthand for [`prepend`](Self::prepend) with a freshly built span.
    pub fn prepend_style(&self, style: S, length: usize) -> Self {
        self.prepend(StyleSpan::new(style, length))
    }

    /// Concatenate two span lists, merging the seam when the styles on both sides are equal.
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let mut builder = StyleSpansBuilder::with_capacity(self.span_count() + other.span_count());
        builder.add_all(self.iter().cloned());
        builder.add_all(other.iter().cloned());
        builder.finish()
    }

    /// The spans covering `[from, to)`.
    ///
    /// `from` resolves with a forward bias and `to` with a backward bias, so a boundary at
    /// `from` belongs to the following span and a boundary at `to` to the preceding one. An
    /// empty range yields a single zero-length span carrying the style at `from`. A `to` past
    /// the total length extends the final span.
    pub fn sub_view(&self, from: usize, to: usize) -> Self {
        let start = self.offset_to_position(from, Bias::Forward);
        let end = if to > from {
            start.offset_by((to - from) as isize, Bias::Backward)
        } else {
            start
        };

        let (first, last) = (start.major(), end.major());
        if first == last {
            let span = &self.spans[first];
            let len = end.minor().saturating_sub(start.minor());
            return Self::singleton(span.style.clone(), len);
        }

        let mut builder = StyleSpansBuilder::with_capacity(last - first + 1);
        let head = &self.spans[first];
        builder.add(StyleSpan::new(
            head.style.clone(),
            head.length.saturating_sub(start.minor()),
        ));
        builder.add_all(self.spans[first + 1..last].iter().cloned());
        builder.add(StyleSpan::new(self.spans[last].style.clone(), end.minor()));
        builder.finish()
    }

    /// Map every style through `f`, re-merging neighbors that map to equal styles.
    ///
    /// The result covers the same length but may have fewer spans.
    pub fn map_styles<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&S) -> S,
    {
        let mut builder = StyleSpansBuilder::with_capacity(self.span_count());
        for span in &self.spans {
            builder.add(StyleSpan::new(f(&span.style), span.length));
        }
        builder.finish()
    }

    /// Merge two span lists in lockstep, combining the styles of every intersection.
    ///
    /// Both lists are expected to cover the same length; if one is longer, its excess spans are
    /// carried over unchanged.
    pub fn overlay<F>(&self, other: &Self, mut combine: F) -> Self
    where
        F: FnMut(&S, &S) -> S,
    {
        let mut acc = StyleSpansBuilder::with_capacity(self.span_count() + other.span_count());
        let mut left = self.spans.iter().cloned();
        let mut right = other.spans.iter().cloned();

        // Both lists hold at least one span.
        let (Some(mut h1), Some(mut h2)) = (left.next(), right.next()) else {
            return self.clone();
        };

        loop {
            let (len1, len2) = (h1.length, h2.length);
            if len1 == len2 {
                acc.add(StyleSpan::new(combine(&h1.style, &h2.style), len1));
                match (left.next(), right.next()) {
                    (Some(n1), Some(n2)) => {
                        h1 = n1;
                        h2 = n2;
                    }
                    (Some(n1), None) => {
                        acc.add(n1);
                        acc.add_all(left);
                        return acc.finish();
                    }
                    (None, Some(n2)) => {
                        acc.add(n2);
                        acc.add_all(right);
                        return acc.finish();
                    }
                    (None, None) => return acc.finish(),
                }
            } else if len1 < len2 {
                acc.add(StyleSpan::new(combine(&h1.style, &h2.style), len1));
                h2 = StyleSpan::new(h2.style, len2 - len1);
                match left.next() {
                    Some(n1) => h1 = n1,
                    None => {
                        acc.add(h2);
                        acc.add_all(right);
                        return acc.finish();
                    }
                }
            } else {
                acc.add(StyleSpan::new(combine(&h1.style, &h2.style), len2));
                h1 = StyleSpan::new(h1.style, len1 - len2);
                match right.next() {
                    Some(n2) => h2 = n2,
                    None => {
                        acc.add(h1);
                        acc.add_all(left);
                        return acc.finish();
                    }
                }
            }
        }
    }

    fn from_merged(spans: Vec<StyleSpan<S>>) -> Self {
        let length = spans.iter().map(StyleSpan::len).sum();
        Self { spans, length }
    }
}

impl<S: Clone + PartialEq> TwoDimensional for StyleSpans<S> {
    fn element_count(&self) -> usize {
        self.spans.len()
    }

    fn element_length(&self, index: usize) -> usize {
        self.spans.get(index).map_or(0, StyleSpan::len)
    }
}

impl<'a, S> IntoIterator for &'a StyleSpans<S> {
    type Item = &'a StyleSpan<S>;
    type IntoIter = std::slice::Iter<'a, StyleSpan<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

impl<S> IntoIterator for StyleSpans<S> {
    type Item = StyleSpan<S>;
    type IntoIter = std::vec::IntoIter<StyleSpan<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

fn push_merging<S: PartialEq>(spans: &mut Vec<StyleSpan<S>>, span: StyleSpan<S>) {
    let single = spans.len() == 1;
    match spans.last_mut() {
        None => spans.push(span),
        Some(_) if span.is_empty() => {}
        Some(last) if last.is_empty() && single => *last = span,
        Some(last) if last.style == span.style => last.length += span.length,
        Some(_) => spans.push(span),
    }
}

/// Accumulates spans, merging equal-style neighbors and dropping zero-length spans.
///
/// # Example
///
/// ```rust
/// use richtext_core::{StyleSpan, StyleSpansBuilder};
///
/// let mut builder = StyleSpansBuilder::new();
/// builder.add(StyleSpan::new("bold", 2));
/// builder.add(StyleSpan::new("bold", 3));
/// builder.add(StyleSpan::new("plain", 0));
/// let spans = builder.create().unwrap();
///
/// assert_eq!(spans.span_count(), 1);
/// assert_eq!(spans.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct StyleSpansBuilder<S> {
    spans: Vec<StyleSpan<S>>,
}

impl<S: Clone + PartialEq> StyleSpansBuilder<S> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Create an empty builder with room for `capacity` spans.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            spans: Vec::with_capacity(capacity),
        }
    }

    /// Add one span.
    ///
    /// The first span is always kept (even when empty) so that an empty range still carries a
    /// style; later zero-length spans are dropped.
    pub fn add(&mut self, span: StyleSpan<S>) -> &mut Self {
        push_merging(&mut self.spans, span);
        self
    }

    /// Add a span built from `style` and `length`.
    pub fn add_style(&mut self, style: S, length: usize) -> &mut Self {
        self.add(StyleSpan::new(style, length))
    }

    /// Add every span of `spans` in order.
    pub fn add_all<I>(&mut self, spans: I) -> &mut Self
    where
        I: IntoIterator<Item = StyleSpan<S>>,
    {
        for span in spans {
            self.add(span);
        }
        self
    }

    /// Finish building.
    ///
    /// Fails with [`ModelError::NoSpans`] when nothing was added.
    pub fn create(self) -> Result<StyleSpans<S>, ModelError> {
        if self.spans.is_empty() {
            return Err(ModelError::NoSpans);
        }
        Ok(StyleSpans::from_merged(self.spans))
    }

    // Callers inside the crate always add at least one span first.
    pub(crate) fn finish(self) -> StyleSpans<S> {
        debug_assert!(!self.spans.is_empty(), "builder finished without spans");
        StyleSpans::from_merged(self.spans)
    }
}

impl<S: Clone + PartialEq> Default for StyleSpansBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
