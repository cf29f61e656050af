//! CLI tool for parsing markdown slide outlines.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{OutlineFormatter, ParsedDeck};
use deck_markdown::{DeckParser, ParseOptions};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Parse markdown slide outlines into structured slide records.
#[derive(Parser, Debug)]
#[command(name = "deck-parse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input markdown outline(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Fail when a document has no slide headers
    #[arg(long)]
    require_slides: bool,

    /// Indentation columns per list nesting level
    #[arg(long, default_value = "2")]
    indent_unit: usize,

    /// Include speaker notes in outline output
    #[arg(short, long)]
    notes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Deck and diagnostics as pretty-printed JSON
    Json,
    /// Human-readable outline
    Outline,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Outline => "txt",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = ParseOptions::new()
        .with_indent_unit(args.indent_unit)
        .with_require_slides(args.require_slides);
    let parser = DeckParser::with_options(options);
    let formatter = OutlineFormatter::new().with_notes(args.notes);

    let mut failures = 0;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &parser, &formatter) {
            Ok(output) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), args.format)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, args.input.len());
    }

    Ok(())
}

/// Parse a single outline file and render it in the requested format.
fn process_file(
    input_path: &Path,
    args: &Args,
    parser: &DeckParser,
    formatter: &OutlineFormatter,
) -> Result<String> {
    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let parsed = parser
        .parse_bytes(&bytes)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;

    report_diagnostics(input_path, &parsed);

    if args.verbose {
        eprintln!(
            "  Found {} slides, {} image requests",
            parsed.slides().len(),
            parsed.deck.image_requests().len()
        );
    }

    render(&parsed, args.format, formatter)
}

fn report_diagnostics(input_path: &Path, parsed: &ParsedDeck) {
    for diagnostic in &parsed.diagnostics {
        log::warn!("{}: {}", input_path.display(), diagnostic);
    }

    if parsed.has_slide_defects() {
        log::warn!(
            "{}: some slides are missing their title or all fields",
            input_path.display()
        );
    }
}

fn render(parsed: &ParsedDeck, format: OutputFormat, formatter: &OutlineFormatter) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(parsed).context("Failed to serialize deck")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Outline => Ok(formatter.format_with_newline(&parsed.deck)),
    }
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
