//! RFC 3986 percent-encoding as required by OAuth 1.0a.

use crate::error::{Result, TwitterError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the unreserved set `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string, UTF-8 bytes first. Space becomes `%20`.
///
/// ```
/// use twitter_stream::protocol::percent_encode;
///
/// assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
/// assert_eq!(percent_encode("snow☃"), "snow%E2%98%83");
/// ```
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Reverse [`percent_encode`].
///
/// Fails when the decoded bytes are not UTF-8.
pub fn percent_decode(s: &str) -> Result<String> {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .map(|c| c.into_owned())
        .map_err(|e| TwitterError::HeaderParse(format!("invalid percent-encoding '{}': {}", s, e)))
}
