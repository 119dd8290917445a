use crate::rich::{Span, SpanUnit};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One annotation applied over a half-open span of the joined text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRange<A> {
    pub span: Span,
    pub annotation: A,
}

/// The joined text plus every annotation attached to it.
///
/// `ranges` is ordered by segment index, then by registration order within a
/// segment. Renderers that layer annotations should apply them in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText<A> {
    pub text: String,

    /// Unit of every span offset in `ranges`.
    #[serde(default)]
    pub unit: SpanUnit,

    #[serde(default = "Vec::new")]
    pub ranges: Vec<AnnotatedRange<A>>,
}

impl<A> RichText<A> {
    /// Converts `span` into a byte range usable for slicing [`RichText::text`].
    pub fn byte_span(&self, span: Span) -> Option<Range<usize>> {
        let start = self.unit.byte_offset(&self.text, span.start)?;
        let end = self.unit.byte_offset(&self.text, span.end)?;
        (start <= end).then_some(start..end)
    }

    /// The text covered by `span`, if it lies on character boundaries.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.byte_span(span).map(|r| &self.text[r])
    }

    /// Length of the text in [`RichText::unit`].
    pub fn len(&self) -> usize {
        self.unit.measure(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maps every annotation value, keeping text and spans.
    pub fn map<B>(self, mut f: impl FnMut(A) -> B) -> RichText<B> {
        RichText {
            text: self.text,
            unit: self.unit,
            ranges: self
                .ranges
                .into_iter()
                .map(|r| AnnotatedRange {
                    span: r.span,
                    annotation: f(r.annotation),
                })
                .collect(),
        }
    }
}
