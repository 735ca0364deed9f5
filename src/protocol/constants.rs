//! Endpoint URLs and protocol names.

/// Base URL for REST calls.
pub const API_BASE_URL: &str = "https://api.twitter.com/1";

/// Per-user event stream; opens with a [`Friends`](crate::types::Friends) preamble.
pub const USER_STREAM_URL: &str = "https://userstream.twitter.com/2/user.json";

/// Global sample of public statuses; no preamble.
pub const SAMPLE_STREAM_URL: &str = "https://stream.twitter.com/1/statuses/sample.json";

/// REST paths, relative to [`API_BASE_URL`].
pub mod paths {
    pub const VERIFY_CREDENTIALS: &str = "account/verify_credentials.json";
    pub const FRIEND_IDS: &str = "friends/ids.json";
    pub const HOME_TIMELINE: &str = "statuses/home_timeline.json";
    pub const SHOW_STATUS: &str = "statuses/show";
}

/// OAuth parameter names.
pub mod params {
    pub const CONSUMER_KEY: &str = "oauth_consumer_key";
    pub const NONCE: &str = "oauth_nonce";
    pub const SIGNATURE: &str = "oauth_signature";
    pub const SIGNATURE_METHOD: &str = "oauth_signature_method";
    pub const TIMESTAMP: &str = "oauth_timestamp";
    pub const TOKEN: &str = "oauth_token";
    pub const VERSION: &str = "oauth_version";
}

/// Scheme prefix of the `Authorization` header value.
pub const AUTH_SCHEME: &str = "OAuth";

/// The only signature method this client produces.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// OAuth protocol version.
pub const OAUTH_VERSION: &str = "1.0";

/// Length of generated nonces.
pub const NONCE_LEN: usize = 40;

/// Stream frame delimiter.
pub const FRAME_DELIMITER: u8 = b'\r';

/// A frame carrying no payload, sent to hold the connection open.
pub const KEEP_ALIVE_FRAME: &[u8] = b"\n\r";
