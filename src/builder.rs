//! Segment-to-offset mapping and range annotation builder.
//!
//! A [`SpanBuilder`] joins an ordered list of text segments (optionally with a
//! separator between adjacent segments) and attaches annotations to whole
//! segments. Offsets are resolved in one prefix-sum pass at build time.
//!
//! Boundary policy: the range of every segment except the last one runs up to
//! the start of the next segment, so it also covers the separator that
//! follows it. With `["a", "b", "c"]` and separators enabled, segment 0 covers
//! `"a "` (`[0, 2)`) while segment 2 covers only `"c"` (`[4, 5)`).

use crate::error::Error;
use crate::rich::{AnnotatedRange, RichText, Span, SpanUnit};
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Separator inserted between segments unless overridden with
/// [`SpanBuilder::with_separator`].
pub const DEFAULT_SEPARATOR: char = ' ';

type Factory<A, E> = Rc<dyn Fn() -> Result<A, E>>;

/// Builds a [`RichText`] out of text segments and per-segment annotations.
///
/// Factories are stored at registration time and invoked at [`build`] time,
/// once per registered index. [`build`] may be called repeatedly; every call
/// re-invokes the factories, so each call returns fresh annotation values.
///
/// [`build`]: SpanBuilder::build
pub struct SpanBuilder<A, E = Infallible> {
    segments: Vec<String>,
    pending: Vec<Vec<Factory<A, E>>>,
    insert_separator: bool,
    separator: char,
    unit: SpanUnit,
}

impl<A, E> SpanBuilder<A, E> {
    pub fn new<I, S>(segments: I, insert_separator: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let pending = segments.iter().map(|_| Vec::new()).collect();
        Self {
            segments,
            pending,
            insert_separator,
            separator: DEFAULT_SEPARATOR,
            unit: SpanUnit::default(),
        }
    }

    /// Uses `separator` instead of [`DEFAULT_SEPARATOR`] between segments.
    /// Has no effect unless separators are enabled.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Measures span offsets in `unit` (default: [`SpanUnit::Char`]).
    pub fn with_unit(mut self, unit: SpanUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of annotations registered against `index`, or `None` if the
    /// index is out of range.
    pub fn pending_count(&self, index: usize) -> Option<usize> {
        self.pending.get(index).map(Vec::len)
    }

    /// Registers `factory` against every index in `indices`.
    ///
    /// The factory runs once per index when the builder is built, so no two
    /// indices ever share an annotation instance. If any index is out of
    /// range, nothing is registered.
    pub fn add_annotation<I, F>(&mut self, indices: I, factory: F) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
        F: Fn() -> A + 'static,
    {
        self.try_add_annotation(indices, move || Ok(factory()))
    }

    /// Like [`add_annotation`](Self::add_annotation), for factories that can
    /// fail. A failure is returned from [`build`](Self::build) as
    /// [`Error::Annotation`].
    pub fn try_add_annotation<I, F>(&mut self, indices: I, factory: F) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
        F: Fn() -> Result<A, E> + 'static,
    {
        let indices: Vec<usize> = indices.into_iter().collect();

        // validate everything first so a bad call leaves no partial registration.
        let len = self.segments.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfRange { index, len });
        }

        let factory: Factory<A, E> = Rc::new(factory);
        for index in indices {
            self.pending[index].push(Rc::clone(&factory));
        }
        Ok(())
    }

    /// The span each segment's annotations will cover, by segment index.
    ///
    /// Every non-last span ends where the next segment starts (trailing
    /// separator included). The last span ends at the end of the text.
    pub fn segment_spans(&self) -> Vec<Span> {
        let separator_width = if self.insert_separator {
            self.unit.measure_char(self.separator)
        } else {
            0
        };

        let mut spans = Vec::with_capacity(self.segments.len());
        let mut start = 0usize;
        let last = self.segments.len().saturating_sub(1);
        for (i, segment) in self.segments.iter().enumerate() {
            let content_end = start + self.unit.measure(segment);
            let next_start = content_end + separator_width;
            let end = if i == last { content_end } else { next_start };
            spans.push(Span::new(start, end));
            start = next_start;
        }
        spans
    }

    fn joined_text(&self) -> String {
        if self.insert_separator {
            let mut buf = [0u8; 4];
            let separator: &str = self.separator.encode_utf8(&mut buf);
            self.segments.join(separator)
        } else {
            self.segments.concat()
        }
    }

    /// Joins the segments and resolves every registered annotation.
    pub fn build(&self) -> Result<RichText<A>, Error<E>> {
        if self.segments.is_empty() {
            return Err(Error::EmptySegmentSequence);
        }

        let text = self.joined_text();
        let spans = self.segment_spans();

        let mut ranges = Vec::with_capacity(self.pending.iter().map(Vec::len).sum());
        for (index, (span, factories)) in spans.iter().zip(&self.pending).enumerate() {
            for factory in factories {
                let annotation = factory().map_err(Error::Annotation)?;
                trace!(index, start = span.start, end = span.end, "annotated segment");
                ranges.push(AnnotatedRange {
                    span: *span,
                    annotation,
                });
            }
        }

        debug!(
            segments = self.segments.len(),
            ranges = ranges.len(),
            insert_separator = self.insert_separator,
            "built rich text"
        );

        Ok(RichText {
            text,
            unit: self.unit,
            ranges,
        })
    }
}

impl<A, E> fmt::Debug for SpanBuilder<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending: Vec<usize> = self.pending.iter().map(Vec::len).collect();
        f.debug_struct("SpanBuilder")
            .field("segments", &self.segments)
            .field("pending", &pending)
            .field("insert_separator", &self.insert_separator)
            .field("separator", &self.separator)
            .field("unit", &self.unit)
            .finish()
    }
}
