//! Error types for the mime-range crate.

use std::str::Utf8Error;
use thiserror::Error;

/// The main error type for the mime-range crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The type segment has no `/` separating content-type and subtype.
    #[error("Malformed media type: {0}")]
    MalformedType(String),

    /// The media range could not be tokenized or grouped.
    #[error("Malformed media range: {0}")]
    MalformedRange(String),

    /// A `q` parameter that is not a decimal in `[0, 1]`.
    #[error("Invalid quality value: {0:?}")]
    InvalidQuality(String),

    /// Parameter series grammar violation.
    #[error("Malformed parameter: {0}")]
    MalformedParameter(String),

    /// Wire data that is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Specialized Result type for mime-range operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Utf8Error> for Error {
    fn from(err: Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl Error {
    /// Re-labels a codec failure as a media range failure.
    pub(crate) fn into_range_error(self) -> Self {
        match self {
            Error::MalformedParameter(msg) => Error::MalformedRange(msg),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedType("text".to_string());
        assert_eq!(err.to_string(), "Malformed media type: text");

        let err = Error::MalformedRange("unterminated quoted value".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed media range: unterminated quoted value"
        );

        let err = Error::InvalidQuality("high".to_string());
        assert_eq!(err.to_string(), "Invalid quality value: \"high\"");

        let err = Error::MalformedParameter("dangling escape".to_string());
        assert_eq!(err.to_string(), "Malformed parameter: dangling escape");
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bytes = [0x74, 0xff, 0x2f];
        let utf8_err = std::str::from_utf8(&bytes).unwrap_err();
        let err: Error = utf8_err.into();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_into_range_error() {
        let err = Error::MalformedParameter("bad".to_string()).into_range_error();
        assert_eq!(err, Error::MalformedRange("bad".to_string()));

        let err = Error::InvalidQuality("x".to_string()).into_range_error();
        assert_eq!(err, Error::InvalidQuality("x".to_string()));
    }
}
