//! Extraction options and configuration.

use crate::error::{Error, Result};

/// Default cap on input admitted to the extractor (32 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 32 * 1024 * 1024;

/// Default plausibility threshold, in characters of assembled text.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;

/// Options for extracting text from a PDF buffer.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum input size in bytes (0 = unlimited)
    pub max_input_bytes: u64,

    /// Assembled text shorter than this is reported as low yield
    pub min_text_chars: usize,

    /// Duplicate fragment handling
    pub dedup: DedupPolicy,

    /// Spacing between the strings of one `TJ` array
    pub array_spacing: ArraySpacing,

    /// Also sweep the whole document for printable literal strings
    pub loose_literals: bool,

    /// Whether batch extraction runs in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Require a `%PDF-` header.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Extract from any buffer, header or not.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the input size cap in bytes (0 = unlimited).
    pub fn with_max_input_bytes(mut self, bytes: u64) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Set the plausibility threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    /// Set the dedup policy.
    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Set the `TJ` array spacing.
    pub fn with_array_spacing(mut self, spacing: ArraySpacing) -> Self {
        self.array_spacing = spacing;
        self
    }

    /// Enable or disable the loose literal sweep.
    pub fn with_loose_literals(mut self, enabled: bool) -> Self {
        self.loose_literals = enabled;
        self
    }

    /// Enable or disable parallel batch extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Reject inputs larger than the configured cap.
    pub fn check_input_size(&self, size: u64) -> Result<()> {
        if self.max_input_bytes > 0 && size > self.max_input_bytes {
            return Err(Error::InputTooLarge {
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            dedup: DedupPolicy::Exact,
            array_spacing: ArraySpacing::Separate,
            loose_literals: false,
            parallel: true,
        }
    }
}

/// Error handling mode for inputs without a PDF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when the `%PDF-` header is missing or malformed
    Strict,
    /// Warn and scan anyway
    #[default]
    Lenient,
}

/// Which repeated fragments collapse to their first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Keep every fragment
    Off,
    /// Drop any fragment equal to an earlier one
    #[default]
    Exact,
    /// Drop repeats only of fragments up to `max_chars` characters,
    /// so long repeated clauses survive while headers and footers do not
    ShortOnly { max_chars: usize },
}

impl DedupPolicy {
    /// Whether a fragment is subject to deduplication.
    pub fn applies_to(&self, fragment: &str) -> bool {
        match self {
            DedupPolicy::Off => false,
            DedupPolicy::Exact => true,
            DedupPolicy::ShortOnly { max_chars } => fragment.chars().count() <= *max_chars,
        }
    }
}

/// How the strings of one `TJ` array are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArraySpacing {
    /// Every string is its own fragment, separated by a space
    #[default]
    Separate,
    /// The strings of one array form a single fragment, no separator
    Concatenate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .strict()
            .with_min_text_chars(50)
            .with_max_input_bytes(1024)
            .with_dedup(DedupPolicy::Off)
            .with_array_spacing(ArraySpacing::Concatenate)
            .with_loose_literals(true)
            .sequential();

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.min_text_chars, 50);
        assert_eq!(options.max_input_bytes, 1024);
        assert_eq!(options.dedup, DedupPolicy::Off);
        assert_eq!(options.array_spacing, ArraySpacing::Concatenate);
        assert!(options.loose_literals);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.min_text_chars, DEFAULT_MIN_TEXT_CHARS);
        assert_eq!(options.dedup, DedupPolicy::Exact);
        assert_eq!(options.array_spacing, ArraySpacing::Separate);
        assert!(!options.loose_literals);
        assert!(options.parallel);
    }

    #[test]
    fn test_check_input_size() {
        let options = ExtractOptions::new().with_max_input_bytes(10);
        assert!(options.check_input_size(10).is_ok());
        assert!(matches!(
            options.check_input_size(11),
            Err(Error::InputTooLarge { size: 11, limit: 10 })
        ));

        let unlimited = ExtractOptions::new().with_max_input_bytes(0);
        assert!(unlimited.check_input_size(u64::MAX).is_ok());
    }

    #[test]
    fn test_dedup_policy_applies_to() {
        assert!(!DedupPolicy::Off.applies_to("Page 1"));
        assert!(DedupPolicy::Exact.applies_to("a long repeated definition clause"));

        let short = DedupPolicy::ShortOnly { max_chars: 10 };
        assert!(short.applies_to("Page 1"));
        assert!(!short.applies_to("a long repeated definition clause"));
    }
}
