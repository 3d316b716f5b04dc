//! # rawpdf
//!
//! Minimal PDF text extraction straight from content streams.
//!
//! This library recovers visible text from simple, uncompressed PDFs without
//! a full PDF parser: it locates `stream ... endstream` regions, scans them
//! for the `Tj` and `TJ` text-showing operators and decodes their literal
//! strings. PDFs it cannot read (scans, compressed streams, exotic font
//! encodings) are not errors; they come back as a degraded result carrying a
//! diagnostic placeholder and a warning.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rawpdf::extract_file;
//!
//! fn main() -> rawpdf::Result<()> {
//!     let result = extract_file("contract.pdf")?;
//!
//!     if let Some(warning) = result.warning() {
//!         eprintln!("warning: {}", warning);
//!     }
//!     println!("{}", result.text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **No PDF dependency**: a single-pass scanner over the raw bytes
//! - **Graceful degradation**: low-yield documents produce a diagnostic
//!   result, never a panic or an error
//! - **Configurable assembly**: dedup policy, `TJ` spacing, plausibility
//!   threshold, input size cap
//! - **Upload intake**: `.pdf`, `.txt` and image files through one registry
//! - **Parallel batches**: uses Rayon for independent inputs

pub mod convert;
pub mod detect;
pub mod error;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter};
pub use detect::{detect_format_from_bytes, detect_format_from_path, PdfFormat};
pub use error::{Error, Result};
pub use parser::{ArraySpacing, DedupPolicy, ErrorMode, ExtractOptions, Extractor};
pub use render::{
    excerpt, Diagnostic, DiagnosticKind, ExtractionReport, ExtractionResult, ExtractionStats,
    JsonFormat,
};

use std::io::Read;
use std::path::Path;

/// Extract text from an in-memory PDF.
///
/// # Arguments
///
/// * `data` - The complete PDF file content
/// * `file_name` - Advisory name used in diagnostics only
///
/// # Example
///
/// ```
/// use rawpdf::extract_bytes;
///
/// let pdf = b"%PDF-1.4\nstream\n(Bonjour) Tj\nendstream\nstream\n[(le) (monde)] TJ\nendstream";
/// let result = extract_bytes(pdf, "hello.pdf").unwrap();
/// assert_eq!(result.text(), "Bonjour le monde");
/// assert!(result.warning().is_none());
/// ```
pub fn extract_bytes(data: &[u8], file_name: &str) -> Result<ExtractionResult> {
    Extractor::new().extract(data, file_name)
}

/// Extract text from an in-memory PDF with custom options.
///
/// # Example
///
/// ```
/// use rawpdf::{extract_bytes_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().with_min_text_chars(50);
/// let result = extract_bytes_with_options(b"stream\n(short) Tj\nendstream", "a.pdf", options)
///     .unwrap();
/// assert!(result.is_degraded());
/// ```
pub fn extract_bytes_with_options(
    data: &[u8],
    file_name: &str,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    Extractor::with_options(options).extract(data, file_name)
}

/// Extract text from a PDF file.
///
/// # Example
///
/// ```no_run
/// use rawpdf::extract_file;
///
/// let result = extract_file("contract.pdf").unwrap();
/// println!("{}", result.text());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    Ok(Extractor::new().extract_file(path)?.result)
}

/// Extract text from a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use rawpdf::{extract_file_with_options, DedupPolicy, ExtractOptions};
///
/// let options = ExtractOptions::new()
///     .strict()
///     .with_dedup(DedupPolicy::ShortOnly { max_chars: 40 });
/// let result = extract_file_with_options("contract.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    Ok(Extractor::with_options(options).extract_file(path)?.result)
}

/// Extract text from a reader.
///
/// At most one byte past the default input cap is read.
///
/// # Example
///
/// ```no_run
/// use rawpdf::extract_reader;
/// use std::fs::File;
///
/// let file = File::open("contract.pdf").unwrap();
/// let result = extract_reader(file, "contract.pdf").unwrap();
/// ```
pub fn extract_reader<R: Read>(reader: R, file_name: &str) -> Result<ExtractionResult> {
    Ok(Extractor::new().extract_reader(reader, file_name)?.result)
}

/// Extract several in-memory PDFs, in parallel unless disabled.
///
/// Results come back in input order.
///
/// # Example
///
/// ```
/// use rawpdf::{extract_batch, ExtractOptions};
///
/// let inputs = [
///     ("a.pdf", &b"stream\n(first contract) Tj\nendstream"[..]),
///     ("b.pdf", &b"stream\n(second contract) Tj\nendstream"[..]),
/// ];
/// let results = extract_batch(&inputs, ExtractOptions::default());
/// assert_eq!(results[1].as_ref().unwrap().text(), "second contract");
/// ```
pub fn extract_batch<N, B>(
    inputs: &[(N, B)],
    options: ExtractOptions,
) -> Vec<Result<ExtractionResult>>
where
    N: AsRef<str> + Sync,
    B: AsRef<[u8]> + Sync,
{
    Extractor::with_options(options)
        .extract_batch(inputs)
        .into_iter()
        .map(|report| report.map(|r| r.result))
        .collect()
}

/// Read a PDF file asynchronously and extract its text.
///
/// The size cap is checked against file metadata before reading; the
/// extraction itself runs on the calling task.
#[cfg(feature = "async")]
pub async fn extract_file_async<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionReport> {
    let path = path.as_ref();
    let size = tokio::fs::metadata(path).await?.len();
    options.check_input_size(size)?;

    let data = tokio::fs::read(path).await?;
    Extractor::with_options(options).extract_with_stats(&data, &parser::file_label(path))
}
