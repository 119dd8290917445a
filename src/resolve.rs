//! Lookups that turn resource ids into annotation values.
//!
//! The builder never loads resources itself. Convenience methods that need a
//! lookup take a [`Resolver`] explicitly and call it lazily, when the builder
//! is built.

use crate::rich::{Color, ImageRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Resolves color and image ids into concrete values.
pub trait Resolver {
    type Error;

    fn color(&self, id: &str) -> Result<Color, Self::Error>;

    fn image(&self, id: &str) -> Result<ImageRef, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown color id `{0}`")]
    UnknownColor(String),

    #[error("unknown image id `{0}`")]
    UnknownImage(String),

    #[error("unknown string array `{0}`")]
    UnknownArray(String),
}

/// In-memory named colors and images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<String, Color>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, ImageRef>,
}

impl Palette {
    pub fn with_color(mut self, id: impl Into<String>, color: Color) -> Self {
        self.colors.insert(id.into(), color);
        self
    }

    pub fn with_image(mut self, id: impl Into<String>, image: ImageRef) -> Self {
        self.images.insert(id.into(), image);
        self
    }
}

impl Resolver for Palette {
    type Error = ResolveError;

    fn color(&self, id: &str) -> Result<Color, ResolveError> {
        self.colors
            .get(id)
            .copied()
            .ok_or_else(|| ResolveError::UnknownColor(id.to_string()))
    }

    fn image(&self, id: &str) -> Result<ImageRef, ResolveError> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownImage(id.to_string()))
    }
}

/// Named string arrays, e.g. localized segment lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringArrays(pub BTreeMap<String, Vec<String>>);

impl StringArrays {
    pub fn get(&self, name: &str) -> Result<&[String], ResolveError> {
        self.0
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ResolveError::UnknownArray(name.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
