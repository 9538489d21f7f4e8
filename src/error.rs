//! Error types for geotag operations.

use thiserror::Error;

/// Result type alias for geotag operations.
pub type Result<T> = std::result::Result<T, GeotagError>;

/// Rejection produced by the tag normalization boundary.
///
/// Every request shape fails with the same fixed message so that clients
/// cannot tell which field was at fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// Missing or non-numeric coordinates, or blank text
    #[error("Invalid tag data")]
    InvalidTagData,
}

/// Main error type for geotag operations.
#[derive(Error, Debug)]
pub enum GeotagError {
    /// I/O errors from the tag store or session file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A submitted tag failed validation
    #[error(transparent)]
    InvalidTag(#[from] TagError),

    /// HTTP transport errors on the client side
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tag service answered with an unexpected status or body
    #[error("Unexpected response: {0}")]
    Response(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeotagError {
    /// Creates a new serialization error.
    pub fn serialization<T: ToString>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Creates a new response error.
    pub fn response<T: ToString>(msg: T) -> Self {
        Self::Response(msg.to_string())
    }

    /// Creates a new configuration error.
    pub fn config<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }
}

impl From<serde_json::Error> for GeotagError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_error_message_is_fixed() {
        assert_eq!(TagError::InvalidTagData.to_string(), "Invalid tag data");
        let wrapped: GeotagError = TagError::InvalidTagData.into();
        assert_eq!(wrapped.to_string(), "Invalid tag data");
    }

    #[test]
    fn test_serde_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted: GeotagError = err.into();
        assert!(matches!(converted, GeotagError::Serialization(_)));
    }
}
