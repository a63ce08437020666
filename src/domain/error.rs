//! Error types for the book finder plugin.
//!
//! This module defines the centralized error type [`BookFinderError`], the
//! user-facing [`ErrorKind`] classification, and a [`Result`] alias used
//! throughout the crate. Raw error text is for logs only; the view renders the
//! fixed message attached to each [`ErrorKind`].

use thiserror::Error;

/// User message shown for any failed search, whatever the underlying cause.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch books. Please check your connection and try again.";

/// The main error type for book finder operations.
///
/// Transport and decoding failures are converted into [`ErrorKind`] at the
/// search controller boundary and never reach the rendering layer as-is.
#[derive(Debug, Error)]
pub enum BookFinderError {
    /// The request could not be delivered or no reply was received.
    ///
    /// Covers connection failures and a denied web access permission.
    #[error("Network error: {0}")]
    Network(String),

    /// The server replied with a non-success HTTP status.
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// The response body was not the expected JSON document.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookFinderError {
    /// Classifies the error for the search outcome.
    ///
    /// Returns `None` for errors that cannot result from a search request
    /// (I/O, theme and configuration problems).
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Network(_) | Self::HttpStatus(_) => Some(ErrorKind::Network),
            Self::Parse(_) => Some(ErrorKind::Parse),
            Self::Io(_) | Self::Theme(_) | Self::Config(_) => None,
        }
    }
}

/// Failure classes a search can settle into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or non-2xx status.
    Network,

    /// Body was not valid JSON or lacked the `docs` array.
    Parse,
}

impl ErrorKind {
    /// Returns the fixed user-facing message for this failure class.
    ///
    /// Both kinds share one message; users cannot act on the difference.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Network | Self::Parse => FETCH_FAILED_MESSAGE,
        }
    }
}

/// A specialized `Result` type for book finder operations.
pub type Result<T> = std::result::Result<T, BookFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_classify_as_network() {
        assert_eq!(
            BookFinderError::Network("connection refused".into()).kind(),
            Some(ErrorKind::Network)
        );
        assert_eq!(BookFinderError::HttpStatus(503).kind(), Some(ErrorKind::Network));
    }

    #[test]
    fn decode_errors_classify_as_parse() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(BookFinderError::from(err).kind(), Some(ErrorKind::Parse));
    }

    #[test]
    fn local_errors_are_not_search_failures() {
        assert_eq!(BookFinderError::Theme("bad".into()).kind(), None);
        assert_eq!(BookFinderError::Config("bad".into()).kind(), None);
    }

    #[test]
    fn user_message_never_contains_raw_error_text() {
        assert_eq!(ErrorKind::Network.user_message(), FETCH_FAILED_MESSAGE);
        assert_eq!(ErrorKind::Parse.user_message(), FETCH_FAILED_MESSAGE);
    }
}
