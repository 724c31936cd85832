//! Punctuation analysis CLI.
//!
//! Thin front-end over the `punc` library: `analyze` prints counts and the
//! redacted skeleton, `render` writes the skeleton to `<FILE>-visual.pdf`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use punc::{
    AnalyzeOptions, Catalogue, Options, Pipeline, RedactionRenderer, RunResult,
    SentenceMetricMode,
};

/// Punctuation analysis tool
///
/// Counts punctuation, estimates words per sentence and exposes the
/// punctuation skeleton of a text file.
#[derive(Parser)]
#[command(name = "punc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogueChoice {
    Basic,
    Extended,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Input text file path
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Text encoding of the input (default utf8)
    #[arg(short, long)]
    encoding: Option<String>,

    /// JSON options file: a string (encoding) or an object with
    /// encoding, mapping, catalogue, chunkSize, sentenceMetric
    #[arg(long, value_name = "JSON_FILE", conflicts_with = "encoding")]
    options: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count punctuation and print the redacted skeleton
    Analyze {
        #[command(flatten)]
        source: SourceArgs,

        /// Symbol catalogue to count
        #[arg(long, value_enum)]
        catalogue: Option<CatalogueChoice>,

        /// Average words per sentence over the whole file instead of the last chunk
        #[arg(long)]
        whole_stream: bool,

        /// Bytes per chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// List zero counts too
        #[arg(long)]
        all: bool,
    },

    /// Render the redacted skeleton to <FILE>-visual.pdf
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// TrueType font to use instead of the embedded DejaVu Sans Mono
        #[arg(long, value_name = "TTF")]
        font: Option<PathBuf>,
    },
}

/// Builds library options from the command line.
fn build_options(
    source: &SourceArgs,
    catalogue: Option<CatalogueChoice>,
    whole_stream: bool,
    chunk_size: Option<usize>,
) -> Result<Options> {
    let base = match &source.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options from {}", path.display()))?;
            Options::from_json_str(&text)
                .with_context(|| format!("Invalid options in {}", path.display()))?
        }
        None => match &source.encoding {
            Some(encoding) => Options::Encoding(encoding.clone()),
            None => Options::Default,
        },
    };

    if catalogue.is_none() && !whole_stream && chunk_size.is_none() {
        return Ok(base);
    }

    let mut options = match base {
        Options::Default => AnalyzeOptions::new(),
        Options::Encoding(encoding) => AnalyzeOptions::new().with_encoding(encoding),
        Options::Structured(options) => options,
    };
    if let Some(choice) = catalogue {
        options.catalogue = Some(match choice {
            CatalogueChoice::Basic => Catalogue::basic(),
            CatalogueChoice::Extended => Catalogue::extended(),
        });
    }
    if whole_stream {
        options.sentence_metric = Some(SentenceMetricMode::WholeStream);
    }
    if let Some(size) = chunk_size {
        options.chunk_size = Some(size);
    }
    Ok(Options::Structured(options))
}

/// Command handler.
struct PuncHandler {
    verbose: bool,
}

impl PuncHandler {
    fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn analyze(&self, input: &Path, options: Options, all: bool) -> Result<()> {
        if self.verbose {
            println!("Input:  {}", input.display());
            println!("Stages: {}", Pipeline::analysis().stage_names().join(" → "));
        }

        let result = punc::analyze(input, options)
            .with_context(|| format!("Analysis of {} failed", input.display()))?;

        print_report(&result, all);
        Ok(())
    }

    fn render(&self, input: &Path, options: Options, font: Option<&Path>) -> Result<()> {
        let mut renderer = RedactionRenderer::new();
        if let Some(font) = font {
            renderer = renderer.with_font_file(font);
        }

        let result = punc::render_redacted_with(input, options, &renderer)
            .with_context(|| "Rendering failed")?;

        if self.verbose {
            println!("Pages: {}", result.pages);
        }
        if !result.missing_glyphs.is_empty() {
            let missing: String = result.missing_glyphs.iter().collect();
            println!("⚠ No glyph in font for: {}", missing);
        }
        println!("✓ Rendered skeleton → {}", result.path_to_file.display());
        Ok(())
    }
}

fn print_report(result: &RunResult, all: bool) {
    println!("Words per sentence: {}", format_ratio(result.words_per_sentence));
    println!("\nCounts:");
    for (symbol, tally) in result.count.iter() {
        if all || tally.count() != Some(0) {
            println!("  {:>4}  {}", symbol.to_string(), tally);
        }
    }
    println!("\nBody:\n{}", result.body);
    println!("\nSpaced:\n{}", result.spaced);
}

fn format_ratio(ratio: f64) -> String {
    if ratio.is_infinite() {
        "∞ (no sentence terminators)".to_string()
    } else {
        format!("{:.2}", ratio)
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PUNC_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let handler = PuncHandler::new(cli.verbose);

    match &cli.command {
        Commands::Analyze {
            source,
            catalogue,
            whole_stream,
            chunk_size,
            all,
        } => {
            let options = build_options(source, *catalogue, *whole_stream, *chunk_size)?;
            handler.analyze(&source.input, options, *all)?;
        }
        Commands::Render { source, font } => {
            let options = build_options(source, None, false, None)?;
            handler.render(&source.input, options, font.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(encoding: Option<&str>) -> SourceArgs {
        SourceArgs {
            input: PathBuf::from("book.txt"),
            encoding: encoding.map(String::from),
            options: None,
        }
    }

    #[test]
    fn test_option_building() {
        let options = build_options(&source(None), None, false, None).unwrap();
        assert_eq!(options, Options::Default);

        let options = build_options(&source(Some("latin1")), None, false, None).unwrap();
        assert_eq!(options, Options::Encoding("latin1".into()));

        let options =
            build_options(&source(Some("latin1")), Some(CatalogueChoice::Basic), true, None)
                .unwrap();
        match options {
            Options::Structured(o) => {
                assert_eq!(o.encoding.as_deref(), Some("latin1"));
                assert_eq!(o.catalogue, Some(Catalogue::basic()));
                assert_eq!(o.sentence_metric, Some(SentenceMetricMode::WholeStream));
            }
            other => panic!("expected structured options, got {:?}", other),
        }
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(f64::INFINITY), "∞ (no sentence terminators)");
        assert_eq!(format_ratio(1.5), "1.50");
    }
}
