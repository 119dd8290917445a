use serde::{Deserialize, Serialize};

/// A half-open offset span `[start, end)` into the **joined** rich text.
///
/// Offsets are counted in the [`SpanUnit`](crate::rich::SpanUnit) of the
/// [`RichText`](crate::rich::RichText) that owns the span, not necessarily
/// in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must be <= end");
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
