//! Byte ranges into document source.

use std::{fmt, ops::Range};

/// A half-open byte range `start..end` in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "Inverted span {range:?}");
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Span of `part`, which must be a sub-slice of `source`.
    pub(crate) fn of(source: &str, part: &str) -> Self {
        let start = part.as_ptr() as usize - source.as_ptr() as usize;
        Self::new(start..start + part.len())
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_sub_slice() {
        let source = "Smith\nJohn + Mary";
        let part = &source[6..10];

        assert_eq!(Span::of(source, part), Span::new(6..10));
    }

    #[test]
    fn test_union() {
        let span = Span::new(2..5).union(Span::new(8..9));
        assert_eq!(span, Span::new(2..9));
        assert_eq!(span.len(), 7);
    }
}
