pub mod builder;
pub mod document;
pub mod error;
pub mod render;
pub mod resolve;
pub mod rich;
mod styles;

pub use builder::{DEFAULT_SEPARATOR, SpanBuilder};
pub use error::Error;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;
use walkdir::WalkDir;

/// Builds a [`rich::RichText`] in one call: construct a builder over
/// `segments`, let `configure` register annotations, then build.
pub fn span_text<A, E, I, S, F>(
    segments: I,
    insert_separator: bool,
    configure: F,
) -> Result<rich::RichText<A>, Error<E>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: FnOnce(&mut SpanBuilder<A, E>) -> Result<(), Error<E>>,
{
    let mut builder = SpanBuilder::new(segments, insert_separator);
    configure(&mut builder)?;
    builder.build()
}

/// Output produced for a span document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Html,
    /// The pretty-printed [`rich::RichTextFile`] envelope.
    Json,
}

/// Options controlling what is written and where.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub format: OutputFormat,

    /// Write here instead of printing to stdout.
    pub out: Option<PathBuf>,
}

/// Single file mode: render one document and print (or write) the result.
pub fn run(doc_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    run_with_options(
        doc_path,
        &render::RenderOptions::default(),
        &WriteOptions::default(),
    )
}

/// Single file mode: like [`run`], but allows callers to customize rendering
/// and output.
pub fn run_with_options(
    doc_path: &Path,
    render_opts: &render::RenderOptions,
    write_opts: &WriteOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = render_document_file(doc_path, write_opts.format, render_opts)?;

    match &write_opts.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(out, &content)?;
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Loads, builds and renders the document at `doc_path`.
pub fn render_document_file(
    doc_path: &Path,
    format: OutputFormat,
    render_opts: &render::RenderOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let doc = document::load(doc_path)?;
    let rich_text = doc.build()?;

    match format {
        OutputFormat::Html => Ok(render::render_html_with_options(&rich_text, render_opts)),
        OutputFormat::Json => {
            let file = rich::RichTextFile::new(
                rich_text,
                rich::SourceInfo {
                    path: Some(doc_path.to_string_lossy().to_string()),
                    segment_count: doc.resolve_segments()?.len(),
                },
            );
            // prettify JSON so it's easy to inspect / diff.
            Ok(serde_json::to_string_pretty(&file)?)
        }
    }
}

/// Bulk mode: walk `root` and write an `.html` file next to every span
/// document found. Documents that fail to load or build, or whose `.html`
/// was already written by another document with the same stem, are skipped
/// with a warning. Returns the number of files written.
pub fn render_all_in_dir(
    root: &Path,
    render_opts: &render::RenderOptions,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    if !root.exists() {
        return Err(format!("Document directory not found: {}", root.display()).into());
    }

    let mut entries: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_document_path(e.path()))
        .collect();

    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let total = entries.len();
    let mut count = 0;
    let mut skipped = 0;
    let mut written: HashSet<PathBuf> = HashSet::new();

    for entry in entries {
        let path = entry.path();
        let out_path = path.with_extension("html");
        if written.contains(&out_path) {
            warn!(
                path = %path.display(),
                out = %out_path.display(),
                "output already written by another document; skipping"
            );
            skipped += 1;
            continue;
        }

        let html = match render_document_file(path, OutputFormat::Html, render_opts) {
            Ok(html) => html,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping document");
                skipped += 1;
                continue;
            }
        };

        fs::write(&out_path, html)?;
        written.insert(out_path.clone());
        count += 1;

        let total_ms = start_time.elapsed().as_millis();
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let ms = total_ms % 1_000;
        eprintln!(
            "[{:>4}/{:>4}] [{:02}:{:02}.{:03}] Rendered: {:?}",
            count + skipped,
            total,
            mins,
            secs,
            ms,
            out_path
        );
    }

    eprintln!(
        "Done. Rendered {} files in {:.3}s ({} skipped).",
        count,
        start_time.elapsed().as_secs_f64(),
        skipped
    );
    Ok(count)
}

fn is_document_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml" | "json"))
}
