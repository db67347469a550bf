//! Error types for relayout library.

use std::io;
use thiserror::Error;

/// Result type alias for relayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing document structure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Fragment input could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fragment violated the input contract and was dropped.
    #[error("Malformed fragment {index} on page {page}: {reason}")]
    MalformedFragment {
        /// 1-indexed page number
        page: u32,
        /// Position of the fragment in the page input
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The extraction collaborator could not supply fragments.
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    /// No page produced any text.
    #[error("No extractable text, likely a scanned or image-only document")]
    NoExtractableText,

    /// Layout options are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Check if this error only affects a single fragment.
    pub fn is_fragment_level(&self) -> bool {
        matches!(self, Error::MalformedFragment { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoExtractableText;
        assert_eq!(
            err.to_string(),
            "No extractable text, likely a scanned or image-only document"
        );

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::MalformedFragment {
            page: 2,
            index: 7,
            reason: "x is not finite".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed fragment 7 on page 2: x is not finite"
        );
        assert!(err.is_fragment_level());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_fragment_level());
    }
}
