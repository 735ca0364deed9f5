//! OAuth credential pairs.
//!
//! The application pair and the per-user pair are different types so that one
//! can never be passed where the other is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The application's consumer key and secret. One per client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerCredentials {
    /// `oauth_consumer_key`
    pub key: String,
    /// Consumer secret, first half of the signing key
    pub secret: String,
}

impl ConsumerCredentials {
    /// Build a consumer pair.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for ConsumerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A user's access token and secret, supplied per call and never stored by
/// the client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// `oauth_token`
    #[serde(rename = "oauth_token")]
    pub token: String,
    /// Token secret, second half of the signing key
    #[serde(rename = "oauth_token_secret")]
    pub secret: String,
}

impl AccessToken {
    /// Build a user token pair.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Whether both halves are present. Signing with an empty half produces a
    /// header the server will reject.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.secret.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}
