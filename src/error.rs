//! Error types for the Twitter client.
//!
//! Every fallible operation in this crate returns [`Result`]. REST calls report
//! one terminal [`TwitterError`]; open streams report per-frame failures on
//! their error channel and keep reading, and finish with exactly one terminal
//! error when the connection ends.
//!
//! # Classification
//!
//! | Variant | Fatal to an open stream | Retryable hint |
//! |---------|-------------------------|----------------|
//! | [`TwitterError::Http`] | yes | yes |
//! | [`TwitterError::Json`] | no | no |
//! | [`TwitterError::FrameTooLarge`] | no | no |
//! | [`TwitterError::StreamClosed`] | yes | yes |
//! | [`TwitterError::Api`] | n/a (open fails) | 408, 429, 5xx |
//!
//! The client never retries on its own; [`TwitterError::is_retryable`] is a
//! hook for callers that want to.

use thiserror::Error;

/// Errors produced by the client, the signer inputs and stream readers.
#[derive(Error, Debug)]
pub enum TwitterError {
    /// Transport failure: connect, timeout or body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body or stream frame was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a non-success status or an error document.
    #[error("Twitter API error {status}: {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Error text reported by the API, or the raw body
        message: String,
    },

    /// A stream frame grew past the configured limit before its delimiter.
    #[error("stream frame exceeded {limit} bytes")]
    FrameTooLarge {
        /// Configured maximum frame length
        limit: usize,
    },

    /// The server ended the stream body.
    #[error("stream closed by server")]
    StreamClosed,

    /// A header value did not have the expected shape.
    #[error("header parse error: {0}")]
    HeaderParse(String),

    /// The client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TwitterError {
    /// Whether a caller-side retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_decode() && !e.is_builder(),
            Self::Api { status, .. } => crate::client::is_retryable_status(*status),
            Self::StreamClosed => true,
            _ => false,
        }
    }

    /// Whether this error ends an open stream.
    ///
    /// Decode failures and oversized frames only affect a single frame.
    pub fn is_fatal_to_stream(&self) -> bool {
        !matches!(self, Self::Json(_) | Self::FrameTooLarge { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, TwitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_errors_are_not_fatal() {
        let json = serde_json::from_str::<u64>("nope").unwrap_err();
        assert!(!TwitterError::Json(json).is_fatal_to_stream());
        assert!(!TwitterError::FrameTooLarge { limit: 8 }.is_fatal_to_stream());
        assert!(TwitterError::StreamClosed.is_fatal_to_stream());
    }

    #[test]
    fn test_api_error_classification() {
        let busy = TwitterError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert!(busy.is_retryable());
        assert_eq!(busy.status(), Some(503));

        let denied = TwitterError::Api {
            status: 401,
            message: "Could not authenticate you.".into(),
        };
        assert!(!denied.is_retryable());
        assert_eq!(denied.to_string(), "Twitter API error 401: Could not authenticate you.");
    }
}
