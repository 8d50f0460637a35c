//! Byte ranges into the source text.
//!
//! Tokens and expressions record where they came from so that errors can
//! point at the offending text and lifted definitions can be traced back to
//! the literal that produced them.

use std::fmt;
use std::ops::Range;

/// Longest source text whose offsets fit in a [`Span`].
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// A half-open byte range `[start, end)` in the source.
///
/// Offsets are `u32`; sources longer than [`MAX_SOURCE_LEN`] must be
/// rejected before lexing or their spans saturate at the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Build a span from byte offsets, clamping each to `u32::MAX`.
    #[inline]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            end: u32::try_from(end).unwrap_or(u32::MAX),
        }
    }

    /// An empty span at `pos`, used for the end-of-input token.
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        Self { start: pos, end: pos }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub const fn to(self, other: Span) -> Span {
        Span {
            start: if self.start < other.start { self.start } else { other.start },
            end: if self.end > other.end { self.end } else { other.end },
        }
    }

    /// The slice of `source` this span covers.
    ///
    /// # Panics
    /// Panics if the span does not lie on char boundaries of `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start as usize..self.end as usize]
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Maps byte offsets to 1-based line/column pairs for diagnostics.
#[derive(Debug)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self { line_starts }
    }

    /// 1-based `(line, column)` of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let col = offset - self.line_starts[line];
        (line as u32 + 1, col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_to() {
        let a = Span::new(5, 10);
        let b = Span::new(8, 15);
        assert_eq!(a.to(b), Span::new(5, 15));
        assert_eq!(b.to(a), Span::new(5, 15));
    }

    #[test]
    fn test_from_offsets_saturates() {
        assert_eq!(Span::from_offsets(3, 9), Span::new(3, 9));
        assert_eq!(
            Span::from_offsets(MAX_SOURCE_LEN - 1, MAX_SOURCE_LEN + 10),
            Span::new(u32::MAX - 1, u32::MAX)
        );
        assert_eq!(Span::from_offsets(usize::MAX, usize::MAX), Span::empty(u32::MAX));
    }

    #[test]
    fn test_span_text() {
        let source = "{foo: bar}";
        assert_eq!(Span::new(1, 4).text(source), "foo");
        assert_eq!(Span::empty(10).text(source), "");
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("{a: 1,\n b: 2}\n.a");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(6), (1, 7));
        assert_eq!(index.line_col(8), (2, 2));
        assert_eq!(index.line_col(14), (3, 1));
    }
}
