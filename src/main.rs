use clap::Parser;
use segspan::render::RenderOptions;
use segspan::{OutputFormat, WriteOptions};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Joins text segments and renders their annotations.
#[derive(Debug, Parser)]
#[command(name = "segspan", version, about)]
struct Cli {
    /// Span document to render (YAML, or JSON by extension).
    #[arg(required_unless_present = "render_all")]
    document: Option<PathBuf>,

    /// Print the JSON envelope instead of HTML.
    #[arg(long)]
    json: bool,

    /// Write the output to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Render every document under DIR to a sibling `.html` file.
    #[arg(long, value_name = "DIR", conflicts_with_all = ["document", "json", "out"])]
    render_all: Option<PathBuf>,

    /// Do not wrap the HTML output in a `<p>` element.
    #[arg(long)]
    no_paragraph: bool,

    /// Log debug output to stderr (overridden by SEGSPAN_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("SEGSPAN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let render_opts = RenderOptions {
        wrap_in_paragraph: !cli.no_paragraph,
        ..RenderOptions::default()
    };

    if let Some(dir) = &cli.render_all {
        segspan::render_all_in_dir(dir, &render_opts)?;
        return Ok(());
    }

    let Some(document) = &cli.document else {
        return Err("a document path is required".into());
    };

    let write_opts = WriteOptions {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Html
        },
        out: cli.out.clone(),
    };
    segspan::run_with_options(document, &render_opts, &write_opts)
}
