use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Presentation and behavior annotations understood by the bundled renderer.
///
/// The builder itself never looks inside these values; any other type can be
/// used as the annotation type of a [`SpanBuilder`](crate::SpanBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    ForegroundColor {
        color: Color,
    },

    BackgroundColor {
        color: Color,
    },

    /// Marks the range as interactive. `action` is an identifier the host
    /// dispatches on when the range is activated.
    Click {
        action: String,
    },

    Strikethrough,

    Underline,

    /// Replaces the covered text with an image.
    Image {
        image: ImageRef,
        #[serde(default)]
        align: VerticalAlign,
    },

    Style {
        style: FontStyle,
    },

    Subscript,

    Superscript,

    Typeface {
        family: String,
    },

    Url {
        url: String,
    },

    /// Horizontal stretch factor; `1.0` is unscaled.
    ScaleX {
        proportion: f32,
    },

    /// Font size in pixels.
    AbsoluteSize {
        size: u32,
    },

    /// Font size relative to the surrounding text; `1.0` is unchanged.
    RelativeSize {
        proportion: f32,
    },
}

/// An sRGB color with alpha.
///
/// Serialized as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A resolved image reference (path or URL) ready for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef {
    pub source: String,
}

impl ImageRef {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Baseline,
    Bottom,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_and_formats_hex() {
        let c: Color = "#3F51b5".parse().unwrap();
        assert_eq!(c, Color::rgb(0x3f, 0x51, 0xb5));
        assert_eq!(c.to_string(), "#3f51b5");

        let translucent: Color = "#ff000080".parse().unwrap();
        assert_eq!(translucent.a, 0x80);
        assert_eq!(translucent.to_string(), "#ff000080");

        assert!("3f51b5".parse::<Color>().is_err());
        assert!("#3f51b".parse::<Color>().is_err());
        assert!("#zz0000".parse::<Color>().is_err());
    }

    #[test]
    fn annotation_json_uses_type_tag() {
        let a = Annotation::ForegroundColor {
            color: Color::rgb(1, 2, 3),
        };
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r##"{"type":"foreground_color","color":"#010203"}"##);

        let back: Annotation = serde_json::from_str(r#"{"type":"underline"}"#).unwrap();
        assert_eq!(back, Annotation::Underline);

        let image: Annotation =
            serde_json::from_str(r#"{"type":"image","image":"logo.png"}"#).unwrap();
        assert_eq!(
            image,
            Annotation::Image {
                image: ImageRef::new("logo.png"),
                align: VerticalAlign::Baseline,
            }
        );
    }
}
