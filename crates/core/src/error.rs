//! Error types for slide-deck parsing.
//!
//! Only document-level failures live here. Problems confined to a single
//! slide or block are reported as [`crate::Diagnostic`] values instead.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort parsing of a whole document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the input document.
    #[error("Failed to read document: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not valid UTF-8 text.
    #[error("Document is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// No slide headers were found and the caller required at least one.
    #[error("No slide headers found in document")]
    NoSlides,

    /// A field label configuration could not be turned into a matcher.
    #[error("Invalid field label: {0}")]
    InvalidLabel(String),
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidEncoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_error_maps_to_invalid_encoding() {
        let bytes = [0x66, 0x6f, 0xff];
        let err: Error = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(err, Error::InvalidEncoding(_)));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::NoSlides.to_string(), "No slide headers found in document");
        assert_eq!(
            Error::InvalidLabel("empty".to_string()).to_string(),
            "Invalid field label: empty"
        );
    }
}
