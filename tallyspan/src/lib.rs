use std::error::Error;
use std::fmt::Display;
use std::ops::Range;

/// Byte range `lo..hi` into a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    lo: u32,
    hi: u32,
}

impl Span {
    #[must_use]
    #[inline]
    pub const fn new(lo: u32, hi: u32) -> Self {
        if hi < lo {
            Self { lo: hi, hi: lo }
        } else {
            Self { lo, hi }
        }
    }

    /// Zero-length span sitting at `at`.
    #[must_use]
    #[inline]
    pub const fn point(at: u32) -> Self {
        Self { lo: at, hi: at }
    }

    #[must_use]
    #[inline]
    pub const fn len(self) -> u32 {
        self.hi - self.lo
    }

    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    #[inline]
    pub fn join(self, other: Self) -> Self {
        let lo = std::cmp::min(self.lo, other.lo);
        let hi = std::cmp::max(self.hi, other.hi);

        Self::new(lo, hi)
    }

    /// The zero-length span right after this one.
    #[must_use]
    #[inline]
    pub const fn end(self) -> Self {
        Self::point(self.hi)
    }

    #[must_use]
    #[inline]
    pub const fn lo(self) -> u32 {
        self.lo
    }

    #[must_use]
    #[inline]
    pub const fn hi(self) -> u32 {
        self.hi
    }
}

impl From<Span> for Range<usize> {
    fn from(value: Span) -> Self {
        value.lo as usize..value.hi as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spand<T> {
    pub kind: T,
    pub span: Span,
}

impl<T: Display> Display for Spand<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.kind(), f)
    }
}

impl<T: Error> Error for Spand<T> {}

impl<T> Spand<T> {
    #[inline]
    pub const fn new(kind: T, span: Span) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub const fn kind(&self) -> &T {
        &self.kind
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spand<U> {
        Spand::new(f(self.kind), self.span)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_orders_bounds() {
        let span = Span::new(7, 3);
        assert_eq!(span.lo(), 3);
        assert_eq!(span.hi(), 7);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn join_covers_both() {
        let span = Span::new(4, 5).join(Span::new(0, 1));
        assert_eq!(span, Span::new(0, 5));
        assert_eq!(Range::<usize>::from(span), 0..5);
    }

    #[test]
    fn end_is_empty() {
        let end = Span::new(2, 6).end();
        assert!(end.is_empty());
        assert_eq!(end, Span::point(6));
    }

    #[test]
    fn map_keeps_span() {
        let spand = Spand::new(2, Span::new(1, 2)).map(|x| x * 10);
        assert_eq!(spand.kind, 20);
        assert_eq!(spand.span, Span::new(1, 2));
    }
}
