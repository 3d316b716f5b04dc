//! Error types for rawpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for rawpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction.
///
/// A PDF that merely extracts poorly is not an error: see
/// [`ExtractionResult::Degraded`](crate::ExtractionResult::Degraded).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with a PDF header (strict mode only).
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a malformed version.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The input exceeds the configured size cap.
    #[error("Input of {size} bytes exceeds the {limit} byte limit")]
    InputTooLarge {
        /// Size of the rejected input in bytes
        size: u64,
        /// Configured cap in bytes
        limit: u64,
    },

    /// The file name carries no extension to dispatch on.
    #[error("File has no extension")]
    MissingExtension,

    /// No converter is registered for the extension.
    #[error("No converter for extension: {0}")]
    UnsupportedExtension(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not a valid PDF");

        let err = Error::InputTooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Input of 2048 bytes exceeds the 1024 byte limit"
        );

        let err = Error::UnsupportedExtension("xyz".into());
        assert_eq!(err.to_string(), "No converter for extension: xyz");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
