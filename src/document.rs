//! Declarative span documents (YAML or JSON).
//!
//! A document lists the segments, the separator policy and the annotations to
//! attach, and is turned into a [`RichText`] through a [`SpanBuilder`]:
//!
//! ```yaml
//! segments: [Hello, brave, new, world]
//! insert_separator: true
//! palette:
//!   colors: { primary: "#3f51b5" }
//! annotations:
//!   - indices: [1, 3]
//!     foreground_color: primary
//!   - indices: [0]
//!     annotation: { type: underline }
//! ```

use crate::builder::SpanBuilder;
use crate::error::Error;
use crate::resolve::{Palette, ResolveError, StringArrays};
use crate::rich::{Annotation, RichText, SpanUnit, VerticalAlign};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use std::{error, fs};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanDocument {
    /// Inline segments. Ignored when `array` is set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,

    /// Name of an entry in `arrays` to take the segments from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<String>,

    #[serde(default, skip_serializing_if = "StringArrays::is_empty")]
    pub arrays: StringArrays,

    #[serde(default)]
    pub insert_separator: bool,

    /// Overrides the default separator character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,

    #[serde(default)]
    pub unit: SpanUnit,

    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub annotations: Vec<AnnotationSpec>,
}

/// One registration: an annotation applied to a set of segment indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub indices: Vec<usize>,

    #[serde(flatten)]
    pub source: AnnotationSource,
}

/// Where the annotation value comes from.
///
/// Color and image variants name palette entries and are resolved when the
/// document is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSource {
    Annotation(Annotation),
    ForegroundColor(String),
    BackgroundColor(String),
    Image {
        id: String,
        #[serde(default)]
        align: VerticalAlign,
    },
}

impl SpanDocument {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// The segments to join, after resolving `array` if set.
    pub fn resolve_segments(&self) -> Result<Vec<String>, ResolveError> {
        match &self.array {
            Some(name) => Ok(self.arrays.get(name)?.to_vec()),
            None => Ok(self.segments.clone()),
        }
    }

    /// Configures a builder from this document without building it.
    pub fn builder(&self) -> Result<SpanBuilder<Annotation, ResolveError>, Error<ResolveError>> {
        let segments = self.resolve_segments().map_err(Error::Annotation)?;
        let palette = Rc::new(self.palette.clone());

        let mut builder = SpanBuilder::new(segments, self.insert_separator).with_unit(self.unit);
        if let Some(separator) = self.separator {
            builder = builder.with_separator(separator);
        }

        for spec in &self.annotations {
            let indices = spec.indices.iter().copied();
            match &spec.source {
                AnnotationSource::Annotation(annotation) => {
                    let annotation = annotation.clone();
                    builder.add_annotation(indices, move || annotation.clone())?;
                }
                AnnotationSource::ForegroundColor(id) => {
                    builder.foreground_color(indices, &palette, id)?;
                }
                AnnotationSource::BackgroundColor(id) => {
                    builder.background_color(indices, &palette, id)?;
                }
                AnnotationSource::Image { id, align } => {
                    builder.image(indices, &palette, id, *align)?;
                }
            }
        }

        Ok(builder)
    }

    pub fn build(&self) -> Result<RichText<Annotation>, Error<ResolveError>> {
        self.builder()?.build()
    }
}

/// Loads a document from disk; `.json` files are read as JSON, anything else
/// as YAML.
pub fn load(path: &Path) -> Result<SpanDocument, Box<dyn error::Error>> {
    let text = fs::read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let doc = if is_json {
        SpanDocument::from_json_str(&text)?
    } else {
        SpanDocument::from_yaml_str(&text)?
    };
    Ok(doc)
}
