//! Image uploads: there is no OCR stage.

use std::path::Path;

use crate::error::Result;
use crate::parser::file_label;
use crate::render::{Diagnostic, ExtractionResult};

use super::{ConvertOptions, ConvertResult, DocumentConverter};

/// Answers image uploads with an "OCR not implemented" placeholder.
///
/// The image bytes are never inspected and the extractor is never called.
#[derive(Debug, Clone, Default)]
pub struct ImageConverter {
    _private: (),
}

impl ImageConverter {
    /// Create a new image converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn placeholder(&self, file_name: &str) -> ConvertResult {
        log::info!("{}: image upload, OCR not available", file_name);
        ConvertResult::new(
            ExtractionResult::Degraded(Diagnostic::ocr_unavailable(file_name)),
            self.name(),
        )
    }
}

impl DocumentConverter for ImageConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg"]
    }

    fn name(&self) -> &str {
        "image"
    }

    fn convert_bytes(
        &self,
        _bytes: &[u8],
        file_name: &str,
        _options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        Ok(self.placeholder(file_name))
    }

    fn convert(&self, path: &Path, _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(self.placeholder(&file_label(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DiagnosticKind, OCR_UNAVAILABLE_WARNING};

    #[test]
    fn test_image_extensions() {
        let converter = ImageConverter::new();
        assert!(converter.supports_extension("PNG"));
        assert!(converter.supports_extension("jpg"));
        assert!(converter.supports_extension("jpeg"));
        assert!(!converter.supports_extension("gif"));
    }

    #[test]
    fn test_image_placeholder() {
        let converter = ImageConverter::new();
        // Content that would extract as text must still be ignored
        let result = converter
            .convert_bytes(
                b"stream\n(Bonjour le monde) Tj\nendstream",
                "photo.jpg",
                &ConvertOptions::default(),
            )
            .unwrap();

        assert_eq!(result.warning(), Some(OCR_UNAVAILABLE_WARNING));
        assert!(result.text().contains("photo.jpg"));
        assert!(!result.text().contains("Bonjour"));
        assert_eq!(
            result.result.diagnostic().map(Diagnostic::kind),
            Some(DiagnosticKind::OcrUnavailable)
        );
    }

    #[test]
    fn test_image_file_never_read() {
        let converter = ImageConverter::new();
        let result = converter
            .convert(Path::new("/nonexistent/scan.png"), &ConvertOptions::default())
            .unwrap();
        assert!(result.text().contains("scan.png"));
    }
}
