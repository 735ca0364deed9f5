//! OAuth 1.0a request signing and wire-level constants.
//!
//! Requests to the Twitter API are authenticated with an `Authorization:
//! OAuth ...` header carrying an HMAC-SHA1 signature over a canonical
//! rendering of the request. This module provides every piece of that:
//!
//! - **[constants]** endpoint URLs, header and parameter names
//! - **[encoding]** RFC 3986 percent-encoding
//! - **[headers]** serializing and parsing `OAuth` header values
//! - **[oauth]** the signer itself
//!
//! # Examples
//!
//! ```
//! use twitter_stream::protocol::{FixedClock, OAuthSigner, SignableRequest};
//! use twitter_stream::{AccessToken, ConsumerCredentials};
//!
//! let signer = OAuthSigner::new(ConsumerCredentials::new("ckey", "csecret"));
//! let request = SignableRequest::get("https://api.twitter.com/1/account/verify_credentials.json")
//!     .unwrap();
//! let user = AccessToken::new("token", "secret");
//!
//! let header = signer.authorization_with(&request, &user, "fixednonce", 1_318_622_958);
//! assert!(header.starts_with("OAuth oauth_consumer_key=\"ckey\", oauth_nonce=\"fixednonce\""));
//! ```

pub mod constants;
pub mod encoding;
pub mod headers;
pub mod oauth;

pub use encoding::{percent_decode, percent_encode};
pub use headers::{format_authorization_header, format_parameter_string, parse_authorization_header};
pub use oauth::{generate_nonce, Clock, FixedClock, OAuthSigner, SignableRequest, SystemClock};
