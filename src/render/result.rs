//! Extraction results, diagnostics and statistics.

use serde::{Deserialize, Serialize};

/// Warning attached to a low-yield extraction.
pub const LIMITED_EXTRACTION_WARNING: &str = "Limited text extraction";

/// Warning attached to an image upload.
pub const OCR_UNAVAILABLE_WARNING: &str = "OCR not implemented";

/// Outcome of extracting text from one input.
///
/// Poor extraction is not an error. A document that yields too little text
/// comes back as [`ExtractionResult::Degraded`], whose [`text`](Self::text)
/// is a user-facing placeholder and whose [`warning`](Self::warning) is set.
///
/// Serializes as `{"text": ..., "warning": ...}` with `warning` omitted for
/// complete results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// Plausible body text was recovered
    Complete { text: String },
    /// Too little or no text; carries a diagnostic placeholder
    Degraded(Diagnostic),
}

impl ExtractionResult {
    /// Create a complete result.
    pub fn complete(text: impl Into<String>) -> Self {
        ExtractionResult::Complete { text: text.into() }
    }

    /// The text to show or forward downstream. Never absent.
    pub fn text(&self) -> &str {
        match self {
            ExtractionResult::Complete { text } => text,
            ExtractionResult::Degraded(diagnostic) => diagnostic.placeholder(),
        }
    }

    /// The warning, present only for degraded results.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            ExtractionResult::Complete { .. } => None,
            ExtractionResult::Degraded(diagnostic) => Some(diagnostic.kind().warning()),
        }
    }

    /// Whatever text was actually recovered, without placeholder wording.
    pub fn recovered_text(&self) -> &str {
        match self {
            ExtractionResult::Complete { text } => text,
            ExtractionResult::Degraded(diagnostic) => diagnostic.recovered(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ExtractionResult::Degraded(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ExtractionResult::Complete { .. } => None,
            ExtractionResult::Degraded(diagnostic) => Some(diagnostic),
        }
    }

    /// Take the text, placeholder included.
    pub fn into_text(self) -> String {
        match self {
            ExtractionResult::Complete { text } => text,
            ExtractionResult::Degraded(diagnostic) => diagnostic.placeholder,
        }
    }
}

/// Wire shape of an [`ExtractionResult`].
#[derive(Serialize)]
struct ExtractionPayload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'a str>,
}

impl Serialize for ExtractionResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExtractionPayload {
            text: self.text(),
            warning: self.warning(),
        }
        .serialize(serializer)
    }
}

/// Why a result was degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Assembled text fell below the plausibility threshold
    LowYield,
    /// An image was uploaded; there is no OCR stage
    OcrUnavailable,
}

impl DiagnosticKind {
    pub fn warning(&self) -> &'static str {
        match self {
            DiagnosticKind::LowYield => LIMITED_EXTRACTION_WARNING,
            DiagnosticKind::OcrUnavailable => OCR_UNAVAILABLE_WARNING,
        }
    }
}

/// Details of a degraded extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    file_name: String,
    recovered: String,
    placeholder: String,
}

impl Diagnostic {
    /// A PDF that yielded too little text.
    ///
    /// The placeholder names the file, gives the likely causes and quotes
    /// whatever was recovered.
    pub fn low_yield(file_name: impl Into<String>, recovered: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let recovered = recovered.into();
        let placeholder = format!(
            "[Scanned PDF detected: {file_name}]\n\n\
             This PDF appears to be a scan or an image, or its text is stored in a \
             compressed stream or an unsupported encoding. For a better analysis:\n\
             1. Use a PDF with selectable text\n\
             2. Or paste the text directly\n\n\
             Extracted text (if any):\n{recovered}"
        );
        Self {
            kind: DiagnosticKind::LowYield,
            file_name,
            recovered,
            placeholder,
        }
    }

    /// An image upload, which is never passed to the extractor.
    pub fn ocr_unavailable(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let placeholder = format!(
            "[Image detected: {file_name}]\n\n\
             Text recognition (OCR) is not implemented. Please upload a PDF with \
             selectable text or paste the contract text directly."
        );
        Self {
            kind: DiagnosticKind::OcrUnavailable,
            file_name,
            recovered: String::new(),
            placeholder,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn recovered(&self) -> &str {
        &self.recovered
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Stream regions located in the document
    pub stream_count: u32,

    /// `Tj`/`TJ` operations recognized
    pub operation_count: u32,

    /// Literal payloads decoded from those operations
    pub fragment_count: u32,

    /// Fragments dropped for being empty or whitespace only
    pub empty_fragment_count: u32,

    /// Fragments dropped as duplicates
    pub duplicate_count: u32,

    /// Fragments recovered by the loose literal sweep
    pub loose_literal_count: u32,

    /// Approximate word count of the assembled text
    pub word_count: u32,

    /// Character count of the assembled text (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stream(&mut self) {
        self.stream_count += 1;
    }

    pub fn add_operation(&mut self) {
        self.operation_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.stream_count += other.stream_count;
        self.operation_count += other.operation_count;
        self.fragment_count += other.fragment_count;
        self.empty_fragment_count += other.empty_fragment_count;
        self.duplicate_count += other.duplicate_count;
        self.loose_literal_count += other.loose_literal_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

/// An extraction result together with its statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub stats: ExtractionStats,
}
