use std::convert::Infallible;
use thiserror::Error;

/// Errors reported by [`SpanBuilder`](crate::SpanBuilder).
///
/// `IndexOutOfRange` and `EmptySegmentSequence` are misuse of the builder and
/// are reported as soon as they are detected. `E` is the error type of the
/// caller's annotation factories; it defaults to [`Infallible`] for builders
/// whose factories cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error<E = Infallible> {
    #[error("segment index {index} is out of range for {len} segment(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot build rich text from an empty segment sequence")]
    EmptySegmentSequence,

    /// An annotation factory failed (e.g. a resource lookup). The factory's
    /// error is carried as-is.
    #[error(transparent)]
    Annotation(E),
}
