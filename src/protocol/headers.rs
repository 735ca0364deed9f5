//! `Authorization: OAuth ...` header formatting and parsing.
//!
//! # Header Format
//!
//! | Piece | Format | Example |
//! |-------|--------|---------|
//! | Scheme | `OAuth` followed by a space | `OAuth ` |
//! | Parameter | `name="value"` | `oauth_version="1.0"` |
//! | Separator | comma and space | `, ` |
//!
//! Parameters are always emitted in byte-wise lexicographic order of their
//! names. Values are written as given; only `oauth_signature` arrives here
//! already percent-encoded.

use super::constants::AUTH_SCHEME;
use crate::error::{Result, TwitterError};
use std::collections::BTreeMap;

/// Render the canonical `name=value&name=value` parameter string.
///
/// Values are not encoded at this stage.
///
/// ```
/// use std::collections::BTreeMap;
/// use twitter_stream::protocol::format_parameter_string;
///
/// let mut params = BTreeMap::new();
/// params.insert("b".to_string(), "2".to_string());
/// params.insert("a".to_string(), "1".to_string());
/// assert_eq!(format_parameter_string(&params), "a=1&b=2");
/// ```
pub fn format_parameter_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Render a full `Authorization` header value.
///
/// ```
/// use std::collections::BTreeMap;
/// use twitter_stream::protocol::format_authorization_header;
///
/// let mut params = BTreeMap::new();
/// params.insert("oauth_version".to_string(), "1.0".to_string());
/// params.insert("oauth_nonce".to_string(), "abc".to_string());
/// assert_eq!(
///     format_authorization_header(&params),
///     r#"OAuth oauth_nonce="abc", oauth_version="1.0""#,
/// );
/// ```
pub fn format_authorization_header(params: &BTreeMap<String, String>) -> String {
    let pairs = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {}", AUTH_SCHEME, pairs)
}

/// Parse an `Authorization: OAuth ...` value back into its parameters.
///
/// Values are returned exactly as they appear between the quotes.
///
/// # Errors
///
/// Returns [`TwitterError::HeaderParse`] if the scheme is not `OAuth` or a
/// parameter is not of the form `name="value"`.
pub fn parse_authorization_header(value: &str) -> Result<BTreeMap<String, String>> {
    let rest = value
        .strip_prefix(AUTH_SCHEME)
        .and_then(|r| r.strip_prefix(' '))
        .ok_or_else(|| {
            TwitterError::HeaderParse(format!("Invalid Authorization: expected OAuth scheme, got '{}'", value))
        })?;

    let mut params = BTreeMap::new();
    if rest.trim().is_empty() {
        return Ok(params);
    }

    for part in rest.split(", ") {
        let (name, quoted) = part.trim().split_once('=').ok_or_else(|| {
            TwitterError::HeaderParse(format!("Invalid OAuth parameter: '{}'", part))
        })?;
        let unquoted = quoted
            .strip_prefix('"')
            .and_then(|q| q.strip_suffix('"'))
            .ok_or_else(|| TwitterError::HeaderParse(format!("Unquoted OAuth value: '{}'", part)))?;
        params.insert(name.to_string(), unquoted.to_string());
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parameter_string_is_sorted_bytewise() {
        let p = params(&[("oauth_token", "t"), ("Zeta", "z"), ("alpha", "a")]);
        assert_eq!(format_parameter_string(&p), "Zeta=z&alpha=a&oauth_token=t");
    }

    #[test]
    fn test_parameter_string_does_not_encode() {
        let p = params(&[("q", "a b&c")]);
        assert_eq!(format_parameter_string(&p), "q=a b&c");
    }

    #[test]
    fn test_parse_inverts_format() {
        let p = params(&[
            ("oauth_consumer_key", "key"),
            ("oauth_signature", "abc%2B%3D"),
            ("oauth_version", "1.0"),
        ]);
        let header = format_authorization_header(&p);
        assert_eq!(parse_authorization_header(&header).unwrap(), p);
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert!(parse_authorization_header("Bearer abc").is_err());
        assert!(parse_authorization_header("OAuth oauth_nonce=abc").is_err());
    }

    #[test]
    fn test_parse_empty_parameter_list() {
        assert!(parse_authorization_header("OAuth ").unwrap().is_empty());
    }
}
