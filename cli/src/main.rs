//! rawpdf CLI - raw PDF text extraction tool

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use rawpdf::render::to_json;
use rawpdf::{
    detect_format_from_path, ArraySpacing, ConvertOptions, ConvertResult, ConverterRegistry,
    DedupPolicy, ExtractOptions, ExtractionStats, Extractor, JsonFormat,
};

#[derive(Parser)]
#[command(name = "rawpdf")]
#[command(version)]
#[command(about = "Extract raw text from simple PDFs, text files and image uploads", long_about = None)]
struct Cli {
    /// Input file (.pdf, .txt, .png, .jpg)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Extraction flags shared by every subcommand.
#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// Fail on input without a %PDF- header
    #[arg(long, global = true)]
    strict: bool,

    /// Plausibility threshold in characters
    #[arg(
        long,
        global = true,
        env = "RAWPDF_MIN_CHARS",
        default_value_t = rawpdf::parser::DEFAULT_MIN_TEXT_CHARS
    )]
    min_chars: usize,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(
        long,
        global = true,
        env = "RAWPDF_MAX_BYTES",
        default_value_t = rawpdf::parser::DEFAULT_MAX_INPUT_BYTES
    )]
    max_bytes: u64,

    /// Duplicate fragment handling
    #[arg(long, global = true, value_enum, default_value = "exact")]
    dedup: DedupMode,

    /// Longest fragment collapsed by --dedup short
    #[arg(long, global = true, default_value_t = 40)]
    dedup_max_chars: usize,

    /// Join the strings of one TJ array without spaces
    #[arg(long, global = true)]
    concat_arrays: bool,

    /// Also sweep the whole file for printable literal strings
    #[arg(long, global = true)]
    loose: bool,
}

impl ExtractArgs {
    fn to_options(&self) -> ExtractOptions {
        let dedup = match self.dedup {
            DedupMode::Off => DedupPolicy::Off,
            DedupMode::Exact => DedupPolicy::Exact,
            DedupMode::Short => DedupPolicy::ShortOnly {
                max_chars: self.dedup_max_chars,
            },
        };
        let spacing = if self.concat_arrays {
            ArraySpacing::Concatenate
        } else {
            ArraySpacing::Separate
        };

        let options = ExtractOptions::new()
            .with_min_text_chars(self.min_chars)
            .with_max_input_bytes(self.max_bytes)
            .with_dedup(dedup)
            .with_array_spacing(spacing)
            .with_loose_literals(self.loose);

        if self.strict {
            options.strict()
        } else {
            options.lenient()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text
    Text {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract to JSON ({"text": ..., "warning": ...})
    Json {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Include extraction statistics
        #[arg(long)]
        stats: bool,
    },

    /// Show header and extraction statistics of a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Extract several files in parallel, writing <stem>.txt for each
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DedupMode {
    /// Keep every fragment
    Off,
    /// Drop exact repeats (default)
    Exact,
    /// Drop repeats of short fragments only
    Short,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.extract.to_options();

    let result = match cli.command {
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), options),
        Some(Commands::Json {
            input,
            output,
            compact,
            stats,
        }) => cmd_json(&input, output.as_deref(), compact, stats, options),
        Some(Commands::Info { input }) => cmd_info(&input, options),
        Some(Commands::Batch { inputs, output }) => cmd_batch(&inputs, &output, options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract text if input is provided
            if let Some(input) = cli.input {
                cmd_text(&input, cli.output.as_deref(), options)
            } else {
                println!("{}", "Usage: rawpdf <FILE> [OUTPUT]".yellow());
                println!("       rawpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn convert(
    input: &Path,
    options: ConvertOptions,
) -> Result<ConvertResult, Box<dyn std::error::Error>> {
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert(input, &options)?;
    report_warning(input, &result);
    Ok(result)
}

fn report_warning(input: &Path, result: &ConvertResult) {
    if let Some(warning) = result.warning() {
        eprintln!(
            "{}: {} ({})",
            "Warning".yellow().bold(),
            warning,
            input.display()
        );
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = convert(input, ConvertOptions::new().with_extract_options(options))?;

    if let Some(path) = output {
        fs::write(path, result.text())?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.text());
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    stats: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let convert_options = ConvertOptions::new()
        .with_extract_options(options)
        .with_stats(stats);
    let result = convert(input, convert_options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, options: ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), fs::metadata(input)?.len());
    match detect_format_from_path(input) {
        Ok(format) => {
            println!("{}: {}", "Format".bold(), format);
            if format.header_offset > 0 {
                println!("{}: {}", "Header offset".bold(), format.header_offset);
            }
        }
        Err(e) => println!("{}: {}", "Format".bold(), e.to_string().yellow()),
    }

    let report = Extractor::with_options(options).extract_file(input)?;
    let stats = &report.stats;

    println!();
    println!("{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Streams".bold(), stats.stream_count);
    println!("{}: {}", "Text operations".bold(), stats.operation_count);
    println!("{}: {}", "Fragments".bold(), stats.fragment_count);
    println!("{}: {}", "Empty fragments".bold(), stats.empty_fragment_count);
    println!("{}: {}", "Duplicates dropped".bold(), stats.duplicate_count);
    if stats.loose_literal_count > 0 {
        println!("{}: {}", "Loose literals".bold(), stats.loose_literal_count);
    }
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    let status = match report.result.warning() {
        Some(warning) => warning.yellow(),
        None => "OK".green(),
    };
    println!("{}: {}", "Status".bold(), status);

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Extracting...");
    let registry = ConverterRegistry::with_defaults();
    let convert_options = ConvertOptions::new()
        .with_extract_options(options)
        .with_stats(true);
    let results = registry.convert_batch_with(inputs, &convert_options, |_| pb.inc(1));

    pb.set_message("Writing...");
    let names = output_file_names(inputs);
    let mut totals = ExtractionStats::new();
    let mut written = Vec::new();
    let mut failed = Vec::new();
    for ((input, name), result) in inputs.iter().zip(&names).zip(results) {
        match result {
            Ok(result) => {
                let path = output_dir.join(name);
                fs::write(&path, result.text())?;
                if let Some(stats) = &result.stats {
                    totals.merge(stats);
                }
                written.push((path, result.warning()));
            }
            Err(e) => failed.push((input, e)),
        }
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (path, warning) in &written {
        match warning {
            Some(warning) => println!(
                "  {} {} {}",
                "├─".dimmed(),
                path.display(),
                format!("({})", warning).yellow()
            ),
            None => println!("  {} {}", "├─".dimmed(), path.display()),
        }
    }
    println!(
        "{}: {} files, {} streams, {} words, {} characters",
        "Total".bold(),
        written.len(),
        totals.stream_count,
        totals.word_count,
        totals.char_count
    );

    if !failed.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for (input, e) in &failed {
            println!("  {} {}: {}", "├─".dimmed(), input.display(), e);
        }
        return Err(format!("{} of {} files failed", failed.len(), inputs.len()).into());
    }

    Ok(())
}

/// Output file names for a batch: `<stem>.txt`, or `<file name>.txt` when
/// two inputs share a stem, with a numeric suffix as a last resort.
fn output_file_names(inputs: &[PathBuf]) -> Vec<String> {
    let stem_of = |path: &PathBuf| {
        path.file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for input in inputs {
        *stem_counts.entry(stem_of(input)).or_default() += 1;
    }

    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let stem = stem_of(input);
            let base = if stem_counts[&stem] > 1 {
                input
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned()
            } else {
                stem
            };

            let mut name = format!("{}.txt", base);
            let mut n = 1;
            while !taken.insert(name.clone()) {
                n += 1;
                name = format!("{}-{}.txt", base, n);
            }
            name
        })
        .collect()
}

fn cmd_version() {
    println!("{} {}", "rawpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Raw PDF content-stream text extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_map_to_default_options() {
        let cli = Cli::try_parse_from(["rawpdf", "contract.pdf"]).unwrap();
        let options = cli.extract.to_options();

        assert_eq!(cli.input, Some(PathBuf::from("contract.pdf")));
        assert_eq!(options.dedup, DedupPolicy::Exact);
        assert_eq!(options.array_spacing, ArraySpacing::Separate);
        assert!(!options.loose_literals);
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "rawpdf",
            "text",
            "contract.pdf",
            "--strict",
            "--min-chars",
            "50",
            "--max-bytes",
            "1024",
            "--dedup",
            "short",
            "--dedup-max-chars",
            "12",
            "--concat-arrays",
            "--loose",
        ])
        .unwrap();
        let options = cli.extract.to_options();

        assert_eq!(options.error_mode, rawpdf::ErrorMode::Strict);
        assert_eq!(options.min_text_chars, 50);
        assert_eq!(options.max_input_bytes, 1024);
        assert_eq!(options.dedup, DedupPolicy::ShortOnly { max_chars: 12 });
        assert_eq!(options.array_spacing, ArraySpacing::Concatenate);
        assert!(options.loose_literals);
    }

    #[test]
    fn test_batch_requires_inputs() {
        assert!(Cli::try_parse_from(["rawpdf", "batch"]).is_err());
    }

    #[test]
    fn test_batch_output_names_unique_stems() {
        let inputs = vec![PathBuf::from("in/lease.pdf"), PathBuf::from("in/notes.txt")];
        assert_eq!(output_file_names(&inputs), vec!["lease.txt", "notes.txt"]);
    }

    #[test]
    fn test_batch_output_names_shared_stem() {
        let inputs = vec![
            PathBuf::from("a.pdf"),
            PathBuf::from("a.txt"),
            PathBuf::from("b.pdf"),
        ];
        assert_eq!(
            output_file_names(&inputs),
            vec!["a.pdf.txt", "a.txt.txt", "b.txt"]
        );
    }

    #[test]
    fn test_batch_output_names_same_file_name_in_two_dirs() {
        let inputs = vec![PathBuf::from("x/lease.pdf"), PathBuf::from("y/lease.pdf")];
        assert_eq!(
            output_file_names(&inputs),
            vec!["lease.pdf.txt", "lease.pdf-2.txt"]
        );
    }
}
