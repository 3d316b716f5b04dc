//! PDF content-stream parsing.
//!
//! The pipeline runs in three stages over an immutable byte buffer:
//! [`StreamLocator`] finds `stream ... endstream` regions, [`ContentScanner`]
//! recovers `Tj`/`TJ` operations from each region, and [`decode_literal`]
//! turns their literal payloads into text. [`Extractor`] ties the stages
//! together with the text assembler.

mod content;
mod extractor;
mod literal;
mod locator;
mod loose;
mod options;

pub use content::{ContentScanner, ShowOperator, TextOperation};
pub use extractor::Extractor;
pub(crate) use extractor::{file_label, read_file_capped};
pub use literal::{decode_literal, DecodedFragment};
pub use locator::{ContentStreamRegion, StreamLocator};
pub use loose::{LooseLiterals, MAX_LOOSE_LITERAL_BYTES, MIN_LOOSE_LITERAL_BYTES};
pub use options::{
    ArraySpacing, DedupPolicy, ErrorMode, ExtractOptions, DEFAULT_MAX_INPUT_BYTES,
    DEFAULT_MIN_TEXT_CHARS,
};
