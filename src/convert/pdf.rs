//! PDF converter: runs the raw extractor.

use crate::error::Result;
use crate::parser::Extractor;

use super::{ConvertOptions, ConvertResult, DocumentConverter};

/// PDF document converter.
#[derive(Debug, Clone, Default)]
pub struct PdfConverter {
    _private: (),
}

impl PdfConverter {
    /// Create a new PDF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for PdfConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn convert_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let extractor = Extractor::with_options(options.extract.clone());
        let report = extractor.extract_with_stats(bytes, file_name)?;

        let result = ConvertResult::new(report.result, self.name());
        if options.collect_stats {
            Ok(result.with_stats(report.stats))
        } else {
            Ok(result)
        }
    }
}
