//! Client configuration.

use crate::protocol::constants::{API_BASE_URL, SAMPLE_STREAM_URL, USER_STREAM_URL};
use serde::{Deserialize, Serialize};

/// Configuration for [`TwitterClient`](super::TwitterClient).
///
/// # Examples
///
/// ```
/// use twitter_stream::client::ClientConfig;
///
/// let config = ClientConfig {
///     stream_buffer: 1024,
///     ..Default::default()
/// };
/// assert_eq!(config.request_timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for REST calls, without a trailing slash
    pub api_base_url: String,
    /// Per-user stream endpoint (sends a friends preamble)
    pub user_stream_url: String,
    /// Public sample stream endpoint
    pub sample_stream_url: String,
    /// Whole-request timeout for REST calls. Streams are not subject to it.
    pub request_timeout_ms: u64,
    /// TCP connect timeout for every request
    pub connect_timeout_ms: u64,
    /// Capacity of each stream output channel
    pub stream_buffer: usize,
    /// Longest frame a stream will buffer while waiting for its delimiter
    pub max_frame_bytes: usize,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Proxy for all requests; empty means none
    pub proxy_url: String,
    /// Log per-frame stream errors at `warn` level
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            user_stream_url: USER_STREAM_URL.to_string(),
            sample_stream_url: SAMPLE_STREAM_URL.to_string(),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            stream_buffer: 100,
            max_frame_bytes: 1024 * 1024,
            user_agent: format!("twitter_stream/{}", env!("CARGO_PKG_VERSION")),
            proxy_url: String::new(),
            enable_logging: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"stream_buffer": 8, "api_base_url": "http://localhost/1"}"#).unwrap();
        assert_eq!(config.stream_buffer, 8);
        assert_eq!(config.api_base_url, "http://localhost/1");
        assert_eq!(config.sample_stream_url, SAMPLE_STREAM_URL);
        assert_eq!(config.max_frame_bytes, 1024 * 1024);
    }
}
