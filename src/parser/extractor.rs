//! The extraction pipeline: locate streams, scan them, assemble the text.

use std::fs;
use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

use crate::detect::detect_format_from_bytes;
use crate::error::Result;
use crate::render::{ExtractionReport, ExtractionResult, TextAssembler};

use super::content::ContentScanner;
use super::locator::StreamLocator;
use super::loose::LooseLiterals;
use super::options::{ErrorMode, ExtractOptions};

/// Raw PDF text extractor.
///
/// Holds only configuration; every call is independent, so one extractor
/// can be shared across threads.
///
/// ```
/// use rawpdf::parser::Extractor;
///
/// let pdf = b"%PDF-1.4\nstream\nBT (Bonjour le monde) Tj ET\nendstream";
/// let result = Extractor::new().extract(pdf, "hello.pdf").unwrap();
/// assert_eq!(result.text(), "Bonjour le monde");
/// assert_eq!(result.warning(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract text from an in-memory PDF.
    ///
    /// `file_name` is advisory and only appears in diagnostics.
    pub fn extract(&self, data: &[u8], file_name: &str) -> Result<ExtractionResult> {
        Ok(self.extract_with_stats(data, file_name)?.result)
    }

    /// Extract text and collect statistics.
    pub fn extract_with_stats(&self, data: &[u8], file_name: &str) -> Result<ExtractionReport> {
        self.options.check_input_size(data.len() as u64)?;
        self.check_header(data, file_name)?;

        let mut assembler = TextAssembler::from_options(&self.options);

        for region in StreamLocator::new(data) {
            assembler.begin_stream();
            if region.truncated {
                log::debug!(
                    "{}: stream at offset {} runs to end of input",
                    file_name,
                    region.offset
                );
            }

            for op in ContentScanner::new(region.bytes(data)) {
                assembler.push_operation(&op);
            }
        }

        if self.options.loose_literals {
            for fragment in LooseLiterals::new(data) {
                assembler.push_loose(fragment);
            }
        }

        let stats = assembler.stats();
        log::debug!(
            "{}: {} streams, {} text operations, {} fragments ({} duplicates dropped)",
            file_name,
            stats.stream_count,
            stats.operation_count,
            stats.fragment_count,
            stats.duplicate_count
        );

        Ok(assembler.finish(file_name))
    }

    /// Extract text from a PDF file.
    ///
    /// The size cap is checked against file metadata before reading.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionReport> {
        let path = path.as_ref();
        let data = read_file_capped(path, &self.options)?;
        self.extract_with_stats(&data, &file_label(path))
    }

    /// Extract text from a reader, reading at most one byte past the cap.
    pub fn extract_reader<R: Read>(
        &self,
        mut reader: R,
        file_name: &str,
    ) -> Result<ExtractionReport> {
        let mut data = Vec::new();
        match self.options.max_input_bytes {
            0 => reader.read_to_end(&mut data)?,
            limit => reader.take(limit.saturating_add(1)).read_to_end(&mut data)?,
        };
        self.extract_with_stats(&data, file_name)
    }

    /// Extract several independent inputs.
    ///
    /// Runs in parallel unless the options say otherwise. Output order
    /// matches input order.
    pub fn extract_batch<N, B>(&self, inputs: &[(N, B)]) -> Vec<Result<ExtractionReport>>
    where
        N: AsRef<str> + Sync,
        B: AsRef<[u8]> + Sync,
    {
        let extract_one = |(name, bytes): &(N, B)| {
            self.extract_with_stats(bytes.as_ref(), name.as_ref())
        };

        if self.options.parallel {
            inputs.par_iter().map(extract_one).collect()
        } else {
            inputs.iter().map(extract_one).collect()
        }
    }

    fn check_header(&self, data: &[u8], file_name: &str) -> Result<()> {
        match detect_format_from_bytes(data) {
            Ok(format) => {
                log::debug!(
                    "{}: {} header at offset {}",
                    file_name,
                    format,
                    format.header_offset
                );
                Ok(())
            }
            Err(e) => match self.options.error_mode {
                ErrorMode::Strict => Err(e),
                ErrorMode::Lenient => {
                    log::warn!("{}: {}, scanning anyway", file_name, e);
                    Ok(())
                }
            },
        }
    }
}

/// Read a whole file after checking its size against the cap.
pub(crate) fn read_file_capped(path: &Path, options: &ExtractOptions) -> Result<Vec<u8>> {
    let size = fs::metadata(path)?.len();
    options.check_input_size(size)?;
    Ok(fs::read(path)?)
}

/// The name a path is reported under in diagnostics.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
