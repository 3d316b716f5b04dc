//! Text assembly and output rendering.

mod assemble;
mod excerpt;
mod json;
mod result;

pub use assemble::{normalize_whitespace, TextAssembler};
pub use excerpt::{excerpt, CHAT_CONTEXT_CHARS, QUESTION_CONTEXT_CHARS};
pub use json::{to_json, JsonFormat};
pub use result::{
    Diagnostic, DiagnosticKind, ExtractionReport, ExtractionResult, ExtractionStats,
    LIMITED_EXTRACTION_WARNING, OCR_UNAVAILABLE_WARNING,
};
