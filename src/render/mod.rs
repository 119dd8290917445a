//! RichText -> HTML renderer.
//!
//! The text is cut at every range boundary; each resulting run is escaped and
//! wrapped in the markup of every annotation covering it. Annotations attached
//! earlier end up outermost.

use crate::rich::*;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::HashSet;
use std::ops::Range;
use tracing::warn;

/// Rendering options that control formatting decisions.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// If true, wrap the output in a single `<p>` element.
    pub wrap_in_paragraph: bool,

    /// If true, render `\n` in the text as `<br>`.
    pub line_breaks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrap_in_paragraph: true,
            line_breaks: true,
        }
    }
}

pub fn render_html(rich: &RichText<Annotation>) -> String {
    render_html_with_options(rich, &RenderOptions::default())
}

pub fn render_html_with_options(rich: &RichText<Annotation>, opts: &RenderOptions) -> String {
    let ranges = byte_ranges(rich);

    let mut cuts: Vec<usize> = Vec::with_capacity(ranges.len() * 2 + 2);
    cuts.push(0);
    cuts.push(rich.text.len());
    for (r, _) in &ranges {
        cuts.push(r.start);
        cuts.push(r.end);
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut out = String::new();
    if opts.wrap_in_paragraph {
        out.push_str("<p>");
    }
    // each image range is drawn once, in the first run it covers.
    let mut drawn_images = HashSet::new();
    for w in cuts.windows(2) {
        let (start, end) = (w[0], w[1]);
        let active: Vec<usize> = (0..ranges.len())
            .filter(|&i| ranges[i].0.start <= start && end <= ranges[i].0.end)
            .collect();

        // an image replaces the covered text; the first one attached wins.
        let image = active.iter().find_map(|&i| match ranges[i].1 {
            Annotation::Image { image, align } => Some((i, image, *align)),
            _ => None,
        });
        let content = match image {
            Some((i, _, _)) if !drawn_images.insert(i) => continue,
            Some((i, image, align)) => {
                render_image(image, align, &rich.text[ranges[i].0.clone()])
            }
            None => render_text(&rich.text[start..end], opts),
        };

        let active: Vec<&Annotation> = active.iter().map(|&i| ranges[i].1).collect();
        out.push_str(&wrap_all(&active, content));
    }
    if opts.wrap_in_paragraph {
        out.push_str("</p>");
    }
    out
}

/// Converts every span to a byte range, dropping the ones that do not fall on
/// character boundaries of the text.
fn byte_ranges(rich: &RichText<Annotation>) -> Vec<(Range<usize>, &Annotation)> {
    rich.ranges
        .iter()
        .filter_map(|r| match rich.byte_span(r.span) {
            Some(bytes) if !bytes.is_empty() => Some((bytes, &r.annotation)),
            Some(_) => None,
            None => {
                warn!(
                    start = r.span.start,
                    end = r.span.end,
                    unit = ?rich.unit,
                    "span does not fall on character boundaries of the text; skipped"
                );
                None
            }
        })
        .collect()
}

fn render_image(image: &ImageRef, align: VerticalAlign, alt: &str) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" style=\"vertical-align:{}\">",
        encode_double_quoted_attribute(&image.source),
        encode_double_quoted_attribute(alt),
        css_vertical_align(align)
    )
}

fn wrap_all(active: &[&Annotation], mut content: String) -> String {
    for annotation in active.iter().rev() {
        content = wrap(annotation, content);
    }
    content
}

fn render_text(text: &str, opts: &RenderOptions) -> String {
    let escaped = encode_text(text);
    if opts.line_breaks {
        escaped.replace('\n', "<br>")
    } else {
        escaped.into_owned()
    }
}

fn wrap(annotation: &Annotation, inner: String) -> String {
    match annotation {
        Annotation::ForegroundColor { color } => styled(&format!("color:{}", color), inner),
        Annotation::BackgroundColor { color } => {
            styled(&format!("background-color:{}", color), inner)
        }
        Annotation::Click { action } => format!(
            "<span data-action=\"{}\">{}</span>",
            encode_double_quoted_attribute(action),
            inner
        ),
        Annotation::Strikethrough => format!("<s>{}</s>", inner),
        Annotation::Underline => format!("<u>{}</u>", inner),
        Annotation::Image { .. } => inner,
        Annotation::Style { style } => match style {
            FontStyle::Normal => styled("font-weight:normal;font-style:normal", inner),
            FontStyle::Bold => format!("<b>{}</b>", inner),
            FontStyle::Italic => format!("<i>{}</i>", inner),
            FontStyle::BoldItalic => format!("<b><i>{}</i></b>", inner),
        },
        Annotation::Subscript => format!("<sub>{}</sub>", inner),
        Annotation::Superscript => format!("<sup>{}</sup>", inner),
        Annotation::Typeface { family } => styled(&format!("font-family:{}", family), inner),
        Annotation::Url { url } => format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(url),
            inner
        ),
        Annotation::ScaleX { proportion } => styled(
            &format!("display:inline-block;transform:scaleX({})", proportion),
            inner,
        ),
        Annotation::AbsoluteSize { size } => styled(&format!("font-size:{}px", size), inner),
        Annotation::RelativeSize { proportion } => {
            styled(&format!("font-size:{}em", proportion), inner)
        }
    }
}

fn styled(css: &str, inner: String) -> String {
    format!(
        "<span style=\"{}\">{}</span>",
        encode_double_quoted_attribute(css),
        inner
    )
}

fn css_vertical_align(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Baseline => "baseline",
        VerticalAlign::Bottom => "bottom",
        VerticalAlign::Center => "middle",
    }
}
