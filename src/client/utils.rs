//! Utility functions for the Twitter client.
//!
//! This module provides helper functions for:
//! - Status code classification
//! - Backoff delay calculation for callers that retry on their own
//! - Detecting API error documents in success responses

use serde::Deserialize;
use std::time::Duration;

/// Check if status code indicates retryable error
///
/// 420 (Enhance Your Calm) is excluded: it asks the caller to back off.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Check if status code indicates access denied
pub fn is_access_denied_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Exponential backoff delay calculation
///
/// The client never retries by itself; this is for callers that reconnect
/// streams or repeat REST calls.
pub fn exponential_backoff(attempt: u32, base_ms: u64) -> Duration {
    let delay_ms = base_ms.saturating_mul(2_u64.pow(attempt.min(10)));
    Duration::from_millis(delay_ms)
}

#[derive(Debug, Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<Vec<ErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: String,
}

/// Extract the message of an API error document, if `body` is one.
///
/// Recognises both `{"error": "..."}` and `{"errors": [{"message": "..."}]}`.
/// Anything else, including valid payloads, yields `None`.
pub fn api_error_message(body: &[u8]) -> Option<String> {
    let doc: ErrorDocument = serde_json::from_slice(body).ok()?;
    if let Some(msg) = doc.error.filter(|m| !m.is_empty()) {
        return Some(msg);
    }
    let messages: Vec<String> = doc
        .errors?
        .into_iter()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable_status() {
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(429));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(420));
    }

    #[test]
    fn test_is_access_denied_status() {
        assert!(is_access_denied_status(401));
        assert!(!is_access_denied_status(500));
    }

    #[test]
    fn test_exponential_backoff() {
        let delay0 = exponential_backoff(0, 100);
        let delay1 = exponential_backoff(1, 100);
        assert!(delay1 > delay0);
        assert_eq!(exponential_backoff(2, 100), Duration::from_millis(400));
        assert_eq!(exponential_backoff(40, 100), exponential_backoff(10, 100));
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            api_error_message(br#"{"error":"Could not authenticate you.","request":"/1/x.json"}"#),
            Some("Could not authenticate you.".to_string())
        );
        assert_eq!(
            api_error_message(br#"{"errors":[{"message":"Rate limit exceeded","code":88}]}"#),
            Some("Rate limit exceeded".to_string())
        );
        assert_eq!(api_error_message(br#"{"id":1,"text":"hi"}"#), None);
        assert_eq!(api_error_message(br#"[{"id":1}]"#), None);
        assert_eq!(api_error_message(br#"{"error":""}"#), None);
    }
}
