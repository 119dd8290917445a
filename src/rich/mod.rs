//! Rich text values and their JSON envelope.
//!
//! This module defines the **contract** between:
//! 1) building a joined text from segments -> [`RichText`], and
//! 2) rendering [`RichText`] on some surface (HTML, a UI toolkit, ...).
//!
//! Spans are half-open and measured against the joined text in the
//! [`SpanUnit`] recorded on the [`RichText`].

mod annotation;
mod envelope;
mod span;
mod text;
mod unit;

pub use annotation::*;
pub use envelope::*;
pub use span::*;
pub use text::*;
pub use unit::*;

/// JSON schema version for the rich text envelope.
///
/// Bump this when making non-backwards-compatible changes to the JSON structure.
pub const SCHEMA_VERSION: u32 = 1;

/// The producer name stored in the JSON envelope.
pub const PRODUCER_NAME: &str = "segspan";

/// The producer version stored in the JSON envelope.
pub const PRODUCER_VERSION: &str = env!("CARGO_PKG_VERSION");
