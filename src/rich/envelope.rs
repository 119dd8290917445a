use crate::rich::{Annotation, RichText};
use serde::{Deserialize, Serialize};

/// Top-level JSON file written by `segspan --json`.
///
/// This wraps a built [`RichText`] with metadata that makes debugging easier
/// (schema versioning, producer and source info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextFile {
    /// Schema version for this JSON payload.
    pub schema_version: u32,

    pub producer: ProducerInfo,

    pub source: SourceInfo,

    pub rich_text: RichText<Annotation>,
}

/// Identifies the program that produced the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ProducerInfo {
    fn default() -> Self {
        Self {
            name: crate::rich::PRODUCER_NAME.to_string(),
            version: crate::rich::PRODUCER_VERSION.to_string(),
        }
    }
}

/// Information about the span document the rich text was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// If available, a path to the document used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Number of segments joined into the text.
    pub segment_count: usize,
}

impl RichTextFile {
    pub fn new(rich_text: RichText<Annotation>, source: SourceInfo) -> Self {
        Self {
            schema_version: crate::rich::SCHEMA_VERSION,
            producer: ProducerInfo::default(),
            source,
            rich_text,
        }
    }
}
