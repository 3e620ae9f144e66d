//! Two-level addressing over a flat offset space.
//!
//! A document is a sequence of paragraphs, a paragraph is a sequence of segments, and a
//! [`StyleSpans`](crate::StyleSpans) value is a sequence of spans. All of them share the same
//! shape: an ordered list of variable-length elements that together cover a flat range of
//! character offsets. This module converts between a flat offset and a `(major, minor)`
//! coordinate, where `major` is the element index and `minor` the offset inside that element.
//!
//! # Bias
//!
//! The same flat offset can denote both "end of element N" and "start of element N + 1".
//! Every boundary-sensitive conversion therefore takes a [`Bias`]:
//!
//! ```text
//!   element 0    element 1
//! |a|b|c|d|e|  |f|g|h|
//!            ^ offset 5
//!   Backward -> (0, 5)
//!   Forward  -> (1, 0)
//! ```
//!
//! # Saturation
//!
//! Walking past either end of the sequence never fails: offsets before the start saturate at
//! `(0, 0)` and offsets past the end land in the last element with a `minor` beyond its length.
//! Callers validating user input must bounds-check upstream (or use [`Position::clamp`]).

use std::fmt;

/// Which side of an element boundary an offset should resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    /// Prefer the start of the following element.
    Forward,
    /// Prefer the end of the preceding element.
    Backward,
}

/// An ordered sequence of variable-length elements addressable by `(major, minor)`.
///
/// Implementors only provide the element count and each element's length; navigation is
/// provided on top of that.
pub trait TwoDimensional {
    /// Number of elements in the sequence.
    fn element_count(&self) -> usize;

    /// Length of the element at `index`.
    fn element_length(&self, index: usize) -> usize;

    /// Construct a position directly. No validation is performed here.
    fn position(&self, major: usize, minor: usize) -> Position<'_, Self> {
        Position::new(self, major, minor)
    }

    /// Resolve a flat offset, starting from `(0, 0)`.
    fn offset_to_position(&self, offset: usize, bias: Bias) -> Position<'_, Self> {
        self.position(0, 0).forward_by(offset, bias)
    }
}

/// A `(major, minor)` coordinate tied to the object it addresses.
///
/// Positions are short-lived values: they borrow their target and are invalidated by any edit
/// that produces a new snapshot.
pub struct Position<'a, T: ?Sized> {
    target: &'a T,
    major: usize,
    minor: usize,
}

impl<T: ?Sized> Clone for Position<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Position<'_, T> {}

impl<T: ?Sized> fmt::Debug for Position<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.major, self.minor)
    }
}

impl<T: ?Sized> PartialEq for Position<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<T: ?Sized> Eq for Position<'_, T> {}

impl<'a, T: ?Sized> Position<'a, T> {
    fn new(target: &'a T, major: usize, minor: usize) -> Self {
        Self {
            target,
            major,
            minor,
        }
    }

    /// The object this position addresses.
    pub fn target(&self) -> &'a T {
        self.target
    }

    /// Element index.
    pub fn major(&self) -> usize {
        self.major
    }

    /// Offset inside the element.
    pub fn minor(&self) -> usize {
        self.minor
    }

    /// Returns `true` if both positions address the same place in the same object.
    ///
    /// Two distinct targets are never the same, even at equal coordinates.
    pub fn same_as<U: ?Sized>(&self, other: &Position<'_, U>) -> bool {
        std::ptr::addr_eq(self.target, other.target)
            && self.major == other.major
            && self.minor == other.minor
    }

    fn moved_to(&self, major: usize, minor: usize) -> Self {
        Self::new(self.target, major, minor)
    }
}

impl<T: TwoDimensional + ?Sized> Position<'_, T> {
    /// Pull `minor` back inside the last element.
    ///
    /// Only the last element is affected: when `minor` is at or past its length, it becomes
    /// `length - 1` (never below 0).
    pub fn clamp(&self) -> Self {
        let count = self.target.element_count();
        if count > 0 && self.major == count - 1 {
            let len = self.target.element_length(self.major);
            if self.minor < len {
                *self
            } else {
                self.moved_to(self.major, len.saturating_sub(1))
            }
        } else {
            *self
        }
    }

    /// Move by a signed number of characters.
    ///
    /// With a zero offset, `bias` decides which side of a boundary the position sits on:
    /// `Backward` at the start of an element moves to the end of the previous one, `Forward` at
    /// the end of an element moves to the start of the next one. Neither applies at the edges
    /// of the sequence.
    pub fn offset_by(&self, offset: isize, bias: Bias) -> Self {
        if offset > 0 {
            self.forward_by(offset.unsigned_abs(), bias)
        } else if offset < 0 {
            self.backward_by(offset.unsigned_abs(), bias)
        } else {
            self.resolve_boundary(bias)
        }
    }

    /// Flat offset: sum of the preceding element lengths plus `minor`.
    pub fn to_offset(&self) -> usize {
        (0..self.major)
            .map(|i| self.target.element_length(i))
            .sum::<usize>()
            + self.minor
    }

    fn resolve_boundary(&self, bias: Bias) -> Self {
        let count = self.target.element_count();
        match bias {
            Bias::Backward if self.minor == 0 && self.major > 0 && self.major < count => {
                let prev = self.major - 1;
                self.moved_to(prev, self.target.element_length(prev))
            }
            Bias::Forward
                if self.major + 1 < count
                    && self.minor == self.target.element_length(self.major) =>
            {
                self.moved_to(self.major + 1, 0)
            }
            _ => *self,
        }
    }

    fn forward_by(&self, offset: usize, bias: Bias) -> Self {
        if offset == 0 {
            return self.resolve_boundary(bias);
        }

        let count = self.target.element_count();
        let last = count.saturating_sub(1);
        let mut offset = offset + self.minor;
        let mut major = self.major;

        while major < last {
            let len = self.target.element_length(major);
            if offset < len || (offset == len && bias == Bias::Backward) {
                return self.moved_to(major, offset);
            }
            offset -= len;
            major += 1;
        }

        // In the last element, or beyond it.
        self.moved_to(last, offset)
    }

    fn backward_by(&self, offset: usize, bias: Bias) -> Self {
        let mut offset = offset;
        let mut major = self.major;
        let mut minor = self.minor;

        while major > 0 {
            if offset < minor || (offset == minor && bias == Bias::Forward) {
                return self.moved_to(major, minor - offset);
            }
            offset -= minor;
            major -= 1;
            minor = self.target.element_length(major);
        }

        if offset < minor {
            self.moved_to(0, minor - offset)
        } else {
            // Went past the start.
            self.moved_to(0, 0)
        }
    }
}

/// A [`TwoDimensional`] view over callbacks for the element count and element lengths.
pub struct TwoLevelNavigator<C, L> {
    element_count: C,
    element_length: L,
}

impl<C, L> TwoLevelNavigator<C, L>
where
    C: Fn() -> usize,
    L: Fn(usize) -> usize,
{
    /// Create a navigator from an element-count and an element-length accessor.
    pub fn new(element_count: C, element_length: L) -> Self {
        Self {
            element_count,
            element_length,
        }
    }
}

impl<C, L> TwoDimensional for TwoLevelNavigator<C, L>
where
    C: Fn() -> usize,
    L: Fn(usize) -> usize,
{
    fn element_count(&self) -> usize {
        (self.element_count)()
    }

    fn element_length(&self, index: usize) -> usize {
        (self.element_length)(index)
    }
}

impl<C, L> fmt::Debug for TwoLevelNavigator<C, L>
where
    C: Fn() -> usize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoLevelNavigator")
            .field("element_count", &(self.element_count)())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5 elements, each of length 10.
    fn navigator() -> TwoLevelNavigator<impl Fn() -> usize, impl Fn(usize) -> usize> {
        TwoLevelNavigator::new(|| 5, |_| 10)
    }

    #[test]
    fn test_positive_offset_with_backward_bias() {
        let nav = navigator();
        let pos = nav.offset_to_position(10, Bias::Backward);
        assert_eq!((pos.major(), pos.minor()), (0, 10));
    }

    #[test]
    fn test_positive_offset_with_forward_bias() {
        let nav = navigator();
        let pos = nav.offset_to_position(10, Bias::Forward);
        assert_eq!((pos.major(), pos.minor()), (1, 0));
    }

    #[test]
    fn test_negative_offset_with_backward_bias() {
        let nav = navigator();
        let pos = nav.position(4, 10).offset_by(-10, Bias::Backward);
        assert_eq!((pos.major(), pos.minor()), (3, 10));
    }

    #[test]
    fn test_negative_offset_with_forward_bias() {
        let nav = navigator();
        let pos = nav.position(4, 10).offset_by(-10, Bias::Forward);
        assert_eq!((pos.major(), pos.minor()), (4, 0));
    }

    #[test]
    fn test_zero_offset_with_backward_bias() {
        let nav = navigator();
        let pos = nav.position(3, 0).offset_by(0, Bias::Backward);
        assert_eq!((pos.major(), pos.minor()), (2, 10));

        // A second backward resolution is a no-op.
        assert_eq!(pos, pos.offset_by(0, Bias::Backward));
    }

    #[test]
    fn test_zero_offset_with_forward_bias() {
        let nav = navigator();
        let pos = nav.position(2, 10).offset_by(0, Bias::Forward);
        assert_eq!((pos.major(), pos.minor()), (3, 0));

        assert_eq!(pos, pos.offset_by(0, Bias::Forward));
    }

    #[test]
    fn test_zero_offset_bias_ignored_at_edges() {
        let nav = navigator();
        let first = nav.position(0, 0).offset_by(0, Bias::Backward);
        assert_eq!((first.major(), first.minor()), (0, 0));

        let last = nav.position(4, 10).offset_by(0, Bias::Forward);
        assert_eq!((last.major(), last.minor()), (4, 10));
    }

    #[test]
    fn test_backward_resolution_from_second_element() {
        let nav = navigator();
        let pos = nav.position(1, 0).offset_by(0, Bias::Backward);
        assert_eq!((pos.major(), pos.minor()), (0, 10));
    }

    #[test]
    fn test_right_boundary_saturates_then_clamps() {
        let nav = navigator();
        let pos = nav.offset_to_position(100, Bias::Forward);
        assert_eq!((pos.major(), pos.minor()), (4, 60));

        let clamped = pos.clamp();
        assert_eq!((clamped.major(), clamped.minor()), (4, 9));
    }

    #[test]
    fn test_left_boundary_saturates() {
        let nav = navigator();
        let pos = nav
            .offset_to_position(25, Bias::Forward)
            .offset_by(-50, Bias::Forward);
        assert_eq!((pos.major(), pos.minor()), (0, 0));
    }

    #[test]
    fn test_to_offset_round_trip() {
        let nav = navigator();
        for offset in 0..=50 {
            for bias in [Bias::Forward, Bias::Backward] {
                assert_eq!(nav.offset_to_position(offset, bias).to_offset(), offset);
            }
        }
    }

    #[test]
    fn test_clamp_leaves_inner_elements_alone() {
        let nav = navigator();
        let pos = nav.position(2, 10).clamp();
        assert_eq!((pos.major(), pos.minor()), (2, 10));
    }

    #[test]
    fn test_clamp_on_empty_last_element_never_underflows() {
        let nav = TwoLevelNavigator::new(|| 2, |i| if i == 0 { 3 } else { 0 });
        let pos = nav.position(1, 0).clamp();
        assert_eq!((pos.major(), pos.minor()), (1, 0));
    }

    #[test]
    fn test_same_as_requires_same_target() {
        let (count_a, count_b) = (5usize, 5usize);
        let a = TwoLevelNavigator::new(move || count_a, |_| 10);
        let b = TwoLevelNavigator::new(move || count_b, |_| 10);
        let pa = a.position(1, 2);
        let pb = b.position(1, 2);
        assert!(pa.same_as(&a.position(1, 2)));
        assert!(!pa.same_as(&pb));
    }
}
