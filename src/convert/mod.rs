//! Upload intake: dispatching files to converters by extension.
//!
//! PDFs go through the raw extractor, plain text passes through untouched
//! and images come back as an "OCR not implemented" placeholder without
//! ever reaching the extractor.
//!
//! # Example
//!
//! ```no_run
//! use rawpdf::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> rawpdf::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!
//!     let result = registry.convert(Path::new("contract.pdf"), &ConvertOptions::default())?;
//!     if let Some(warning) = result.warning() {
//!         eprintln!("{}", warning);
//!     }
//!     println!("{}", result.text());
//!     Ok(())
//! }
//! ```

mod image;
mod pdf;
mod text;

pub use image::ImageConverter;
pub use pdf::PdfConverter;
pub use text::TextConverter;

use crate::error::{Error, Result};
use crate::parser::{file_label, read_file_capped, ExtractOptions};
use crate::render::{ExtractionResult, ExtractionStats};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options for PDF input
    pub extract: ExtractOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

/// Result of document conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// Extracted text or diagnostic placeholder
    #[serde(flatten)]
    pub result: ExtractionResult,

    /// Name of the converter that produced the result
    pub converter: String,

    /// Extraction statistics (if collected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ExtractionStats>,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(result: ExtractionResult, converter: impl Into<String>) -> Self {
        Self {
            result,
            converter: converter.into(),
            stats: None,
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// The text to forward downstream.
    pub fn text(&self) -> &str {
        self.result.text()
    }

    pub fn warning(&self) -> Option<&'static str> {
        self.result.warning()
    }

    /// Get text length in bytes.
    pub fn content_len(&self) -> usize {
        self.text().len()
    }
}

/// Trait for document converters.
///
/// Implement this trait to accept a new kind of upload.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert an in-memory upload. `file_name` is used in diagnostics.
    fn convert_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult>;

    /// Convert a file at the given path.
    ///
    /// The file size is checked against the input cap before reading.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let bytes = read_file_capped(path, &options.extract)?;
        self.convert_bytes(&bytes, &file_label(path), options)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting uploads.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default converters (PDF, text, images).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfConverter::new()));
        registry.register(Arc::new(TextConverter::new()));
        registry.register(Arc::new(ImageConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions,
    /// replacing any converter previously registered for them.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.converter_for(path)?.convert(path, options)
    }

    /// Convert an in-memory upload, dispatching on the extension of `file_name`.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        self.converter_for(Path::new(file_name))?
            .convert_bytes(bytes, file_name, options)
    }

    /// Convert several files. Output order matches input order.
    pub fn convert_batch<P>(
        &self,
        paths: &[P],
        options: &ConvertOptions,
    ) -> Vec<Result<ConvertResult>>
    where
        P: AsRef<Path> + Sync,
    {
        self.convert_batch_with(paths, options, |_| {})
    }

    /// Convert several files, calling `on_done` as each one finishes.
    ///
    /// Output order matches input order. In parallel mode `on_done` runs on
    /// worker threads, in completion order.
    pub fn convert_batch_with<P, F>(
        &self,
        paths: &[P],
        options: &ConvertOptions,
        on_done: F,
    ) -> Vec<Result<ConvertResult>>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path) + Sync,
    {
        let convert_one = |path: &P| {
            let path = path.as_ref();
            let result = self.convert(path, options);
            on_done(path);
            result
        };

        if options.extract.parallel {
            paths.par_iter().map(convert_one).collect()
        } else {
            paths.iter().map(convert_one).collect()
        }
    }

    fn converter_for(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(Error::MissingExtension)?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
