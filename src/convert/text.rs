//! Plain-text passthrough converter.

use crate::error::Result;
use crate::render::{ExtractionResult, ExtractionStats};

use super::{ConvertOptions, ConvertResult, DocumentConverter};

/// Passes `.txt` uploads through as-is.
///
/// Invalid UTF-8 is replaced lossily. No plausibility threshold applies:
/// the user supplied the text directly.
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    _private: (),
}

impl TextConverter {
    /// Create a new text converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for TextConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn convert_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        options.extract.check_input_size(bytes.len() as u64)?;

        let text = String::from_utf8_lossy(bytes).into_owned();
        log::debug!("{}: passing through {} bytes of text", file_name, bytes.len());

        let stats = options.collect_stats.then(|| {
            let mut stats = ExtractionStats::new();
            stats.count_text(&text);
            stats
        });

        let result = ConvertResult::new(ExtractionResult::complete(text), self.name());
        Ok(match stats {
            Some(stats) => result.with_stats(stats),
            None => result,
        })
    }
}
