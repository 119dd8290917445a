use serde::{Deserialize, Serialize};

/// The unit every [`Span`](crate::rich::Span) offset is counted in.
///
/// `Char` matches "character offsets" as most callers think of them.
/// `Utf16` matches UI toolkits that index strings by UTF-16 code units, and
/// `Byte` matches Rust string slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanUnit {
    /// Unicode scalar values.
    #[default]
    Char,
    /// UTF-8 bytes.
    Byte,
    /// UTF-16 code units.
    Utf16,
}

impl SpanUnit {
    /// Width of a single character in this unit.
    #[inline]
    pub fn measure_char(self, ch: char) -> usize {
        match self {
            SpanUnit::Char => 1,
            SpanUnit::Byte => ch.len_utf8(),
            SpanUnit::Utf16 => ch.len_utf16(),
        }
    }

    /// Length of `text` in this unit.
    pub fn measure(self, text: &str) -> usize {
        match self {
            SpanUnit::Char => text.chars().count(),
            SpanUnit::Byte => text.len(),
            SpanUnit::Utf16 => text.encode_utf16().count(),
        }
    }

    /// Converts an offset in this unit into a byte offset into `text`.
    ///
    /// Returns `None` when the offset is past the end of `text` or does not
    /// fall on a character boundary (e.g. between the two halves of a UTF-16
    /// surrogate pair).
    pub fn byte_offset(self, text: &str, offset: usize) -> Option<usize> {
        let mut units = 0usize;
        for (byte, ch) in text.char_indices() {
            if units == offset {
                return Some(byte);
            }
            if units > offset {
                return None;
            }
            units += self.measure_char(ch);
        }
        (units == offset).then_some(text.len())
    }
}
