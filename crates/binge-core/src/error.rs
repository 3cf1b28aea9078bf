//! Error types for the binge core library
//!
//! This module defines all error types used throughout the library.
//! The session layer never exposes these to its consumer directly; it
//! converts failures into per-concern fetch flags (see `session`).

use thiserror::Error;

/// Error type for binge core operations
#[derive(Error, Debug)]
pub enum BingeError {
    /// HTTP request failed (transport error or body decoding error)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("API returned status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        message: String,
    },

    /// Requested title was not found (HTTP 404)
    #[error("Title not found: {0}")]
    NotFound(String),

    /// Invalid IMDb title id provided
    #[error("Invalid title id: {0:?}")]
    InvalidTitleId(String),
}

/// Result type alias for binge core operations
pub type Result<T> = std::result::Result<T, BingeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = BingeError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "API returned status 503: service unavailable"
        );
    }

    #[test]
    fn test_not_found_display() {
        let error = BingeError::NotFound("tt0000000".to_string());
        assert_eq!(error.to_string(), "Title not found: tt0000000");
    }

    #[test]
    fn test_invalid_title_id_display() {
        let error = BingeError::InvalidTitleId("   ".to_string());
        assert_eq!(error.to_string(), "Invalid title id: \"   \"");
    }
}
