//! OAuth 1.0a HMAC-SHA1 request signing.
//!
//! # Signing Flow
//!
//! 1. Draw a 40 character nonce from `[a-zA-Z0-9]`
//! 2. Collect the protocol parameters plus every query parameter (first value
//!    per name wins; protocol parameters win over same-named query keys)
//! 3. Join them as `name=value` pairs in byte order, separated by `&`
//! 4. Base string: percent-encoded method, base URL and parameter string, joined by `&`
//! 5. Key: percent-encoded consumer secret and user secret, joined by `&`
//! 6. `oauth_signature` = percent-encoded base64 of HMAC-SHA1(key, base string)
//! 7. Re-sort with the signature and render the `OAuth` header
//!
//! The nonce and the timestamp are the only impure inputs. They come from a
//! caller-supplied [`rand::Rng`] and [`Clock`], or are passed directly to
//! [`OAuthSigner::authorization_with`] for fully deterministic output.

use super::constants::{params, NONCE_LEN, OAUTH_VERSION, SIGNATURE_METHOD};
use super::encoding::percent_encode;
use super::headers::{format_authorization_header, format_parameter_string};
use crate::error::Result;
use crate::types::{AccessToken, ConsumerCredentials};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use rand::Rng;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Method;
use sha1::Sha1;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

type HmacSha1 = Hmac<Sha1>;

const NONCE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of the `oauth_timestamp` value.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now_unix(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_unix(&self) -> u64 {
        self.0
    }
}

/// Draw a fresh nonce of [`NONCE_LEN`] alphanumeric characters.
pub fn generate_nonce<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..NONCE_LEN)
        .map(|_| NONCE_ALPHABET[rng.gen_range(0..NONCE_ALPHABET.len())] as char)
        .collect()
}

/// The parts of a request that are covered by the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL; the query string contributes parameters
    pub url: Url,
}

impl SignableRequest {
    /// Describe a request.
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url }
    }

    /// Describe a GET request to an absolute URL.
    pub fn get(url: &str) -> Result<Self> {
        Ok(Self::new(Method::GET, Url::parse(url)?))
    }

    /// Describe an already-built `reqwest` request.
    pub fn from_request(request: &reqwest::Request) -> Self {
        Self::new(request.method().clone(), request.url().clone())
    }

    /// `scheme://host[:port]/path`, without query or fragment.
    pub fn base_url(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}://{}:{}{}", self.url.scheme(), host, port, self.url.path()),
            None => format!("{}://{}{}", self.url.scheme(), host, self.url.path()),
        }
    }

    /// Decoded query parameters. When a name repeats, the first value wins.
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (k, v) in self.url.query_pairs() {
            out.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
        out
    }
}

/// Signs requests on behalf of one application.
///
/// The consumer pair is fixed at construction; the user pair is supplied on
/// every call, so a signature always covers exactly the pair it was built for.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    consumer: ConsumerCredentials,
}

impl OAuthSigner {
    /// Create a signer for an application.
    pub fn new(consumer: ConsumerCredentials) -> Self {
        Self { consumer }
    }

    /// The application credentials.
    pub fn consumer(&self) -> &ConsumerCredentials {
        &self.consumer
    }

    /// Protocol and query parameters for a request, before signing.
    pub fn base_params(
        &self,
        request: &SignableRequest,
        user: &AccessToken,
        nonce: &str,
        timestamp: u64,
    ) -> BTreeMap<String, String> {
        let mut vals = BTreeMap::new();
        vals.insert(params::CONSUMER_KEY.to_string(), self.consumer.key.clone());
        vals.insert(params::NONCE.to_string(), nonce.to_string());
        vals.insert(params::SIGNATURE_METHOD.to_string(), SIGNATURE_METHOD.to_string());
        vals.insert(params::TIMESTAMP.to_string(), timestamp.to_string());
        vals.insert(params::TOKEN.to_string(), user.token.clone());
        vals.insert(params::VERSION.to_string(), OAUTH_VERSION.to_string());

        for (k, v) in request.params() {
            vals.entry(k).or_insert(v);
        }
        vals
    }

    /// The key the HMAC is computed with.
    pub fn signing_key(&self, user: &AccessToken) -> String {
        format!(
            "{}&{}",
            percent_encode(&self.consumer.secret),
            percent_encode(&user.secret)
        )
    }

    /// The percent-encoded `oauth_signature` value for a prepared parameter set.
    pub fn signature(
        &self,
        request: &SignableRequest,
        user: &AccessToken,
        params: &BTreeMap<String, String>,
    ) -> String {
        let base = signature_base_string(request, params);
        let key = self.signing_key(user);

        let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(base.as_bytes());
        percent_encode(&BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Build the `Authorization` header value from an explicit nonce and
    /// timestamp. Same inputs, same output.
    pub fn authorization_with(
        &self,
        request: &SignableRequest,
        user: &AccessToken,
        nonce: &str,
        timestamp: u64,
    ) -> String {
        let mut vals = self.base_params(request, user, nonce, timestamp);
        let signature = self.signature(request, user, &vals);
        vals.insert(params::SIGNATURE.to_string(), signature);
        format_authorization_header(&vals)
    }

    /// Build the `Authorization` header value, drawing the nonce from `rng`
    /// and the timestamp from `clock`.
    pub fn authorization<R: Rng + ?Sized>(
        &self,
        request: &SignableRequest,
        user: &AccessToken,
        rng: &mut R,
        clock: &dyn Clock,
    ) -> String {
        let nonce = generate_nonce(rng);
        self.authorization_with(request, user, &nonce, clock.now_unix())
    }

    /// Sign a `reqwest` request in place, replacing any `Authorization` header.
    ///
    /// Uses the thread-local CSPRNG and the system clock. If the rendered
    /// header is not a legal header value (a query value carrying control
    /// characters) the request is left unsigned and the server will reject it.
    pub fn sign(&self, request: &mut reqwest::Request, user: &AccessToken) {
        let signable = SignableRequest::from_request(request);
        let header = self.authorization(&signable, user, &mut rand::thread_rng(), &SystemClock);

        match HeaderValue::from_str(&header) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => {
                tracing::warn!(url = %signable.base_url(), error = %e, "Authorization header is not a valid header value");
            }
        }
    }
}

/// The string that is HMAC-signed: method, base URL and canonical parameter
/// string, each percent-encoded, joined by `&`.
pub fn signature_base_string(request: &SignableRequest, params: &BTreeMap<String, String>) -> String {
    [
        percent_encode(request.method.as_str()),
        percent_encode(&request.base_url()),
        percent_encode(&format_parameter_string(params)),
    ]
    .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_authorization_header;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const TIMESTAMP: u64 = 1_318_622_958;
    const SHOW_URL: &str = "https://api.twitter.com/1/statuses/show/42.json?include_entities=true";

    fn signer() -> OAuthSigner {
        OAuthSigner::new(ConsumerCredentials::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        ))
    }

    fn user() -> AccessToken {
        AccessToken::new(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
    }

    fn signature_of(header: &str) -> String {
        parse_authorization_header(header).unwrap()[params::SIGNATURE].clone()
    }

    #[test]
    fn test_known_answer() {
        let request = SignableRequest::get(SHOW_URL).unwrap();
        let header = signer().authorization_with(&request, &user(), NONCE, TIMESTAMP);
        assert_eq!(
            header,
            "OAuth include_entities=\"true\", \
             oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", \
             oauth_nonce=\"kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg\", \
             oauth_signature=\"fchkg3BDccBXBl%2BPgLPGUUtrQuY%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", \
             oauth_timestamp=\"1318622958\", \
             oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\", \
             oauth_version=\"1.0\""
        );
    }

    #[test]
    fn test_base_string() {
        let request = SignableRequest::get(SHOW_URL).unwrap();
        let params = signer().base_params(&request, &user(), NONCE, TIMESTAMP);
        let base = signature_base_string(&request, &params);
        assert!(base.starts_with(
            "GET&https%3A%2F%2Fapi.twitter.com%2F1%2Fstatuses%2Fshow%2F42.json&include_entities%3Dtrue%26oauth_consumer_key%3D"
        ));
        assert!(base.ends_with("oauth_version%3D1.0"));
    }

    #[test]
    fn test_query_order_does_not_change_signature() {
        let a = SignableRequest::get("https://api.twitter.com/1/x.json?count=5&trim_user=1&since_id=9").unwrap();
        let b = SignableRequest::get("https://api.twitter.com/1/x.json?since_id=9&count=5&trim_user=1").unwrap();
        let s = signer();
        assert_eq!(
            s.authorization_with(&a, &user(), NONCE, TIMESTAMP),
            s.authorization_with(&b, &user(), NONCE, TIMESTAMP)
        );
    }

    #[test]
    fn test_first_duplicate_query_value_wins() {
        let request = SignableRequest::get("https://api.twitter.com/1/x.json?count=5&count=7").unwrap();
        assert_eq!(request.params()["count"], "5");

        let only_first = SignableRequest::get("https://api.twitter.com/1/x.json?count=5").unwrap();
        assert_eq!(
            signer().authorization_with(&request, &user(), NONCE, TIMESTAMP),
            signer().authorization_with(&only_first, &user(), NONCE, TIMESTAMP)
        );
    }

    #[test]
    fn test_query_cannot_override_protocol_params() {
        let request = SignableRequest::get("https://api.twitter.com/1/x.json?oauth_nonce=evil").unwrap();
        let header = signer().authorization_with(&request, &user(), NONCE, TIMESTAMP);
        assert_eq!(parse_authorization_header(&header).unwrap()[params::NONCE], NONCE);
    }

    #[test]
    fn test_every_input_changes_the_signature() {
        let request = SignableRequest::get(SHOW_URL).unwrap();
        let baseline = signature_of(&signer().authorization_with(&request, &user(), NONCE, TIMESTAMP));

        let other_consumer_key = OAuthSigner::new(ConsumerCredentials::new("other", signer().consumer().secret.clone()));
        let other_consumer_secret = OAuthSigner::new(ConsumerCredentials::new(signer().consumer().key.clone(), "other"));
        let other_token = AccessToken::new("other", user().secret);
        let other_secret = AccessToken::new(user().token, "other");
        let post = SignableRequest::new(Method::POST, request.url.clone());
        let other_path = SignableRequest::get("https://api.twitter.com/1/statuses/show/43.json?include_entities=true").unwrap();
        let other_param = SignableRequest::get("https://api.twitter.com/1/statuses/show/42.json?include_entities=false").unwrap();

        let variants = [
            other_consumer_key.authorization_with(&request, &user(), NONCE, TIMESTAMP),
            other_consumer_secret.authorization_with(&request, &user(), NONCE, TIMESTAMP),
            signer().authorization_with(&request, &other_token, NONCE, TIMESTAMP),
            signer().authorization_with(&request, &other_secret, NONCE, TIMESTAMP),
            signer().authorization_with(&post, &user(), NONCE, TIMESTAMP),
            signer().authorization_with(&other_path, &user(), NONCE, TIMESTAMP),
            signer().authorization_with(&other_param, &user(), NONCE, TIMESTAMP),
            signer().authorization_with(&request, &user(), "anothernonce", TIMESTAMP),
            signer().authorization_with(&request, &user(), NONCE, TIMESTAMP + 1),
        ];
        for header in &variants {
            assert_ne!(signature_of(header), baseline, "{header}");
        }
    }

    #[test]
    fn test_injected_rng_and_clock_are_deterministic() {
        let request = SignableRequest::get(SHOW_URL).unwrap();
        let clock = FixedClock(TIMESTAMP);
        let a = signer().authorization(&request, &user(), &mut StdRng::seed_from_u64(7), &clock);
        let b = signer().authorization(&request, &user(), &mut StdRng::seed_from_u64(7), &clock);
        assert_eq!(a, b);

        let parsed = parse_authorization_header(&a).unwrap();
        assert_eq!(parsed[params::TIMESTAMP], "1318622958");
        assert_eq!(parsed[params::NONCE].len(), NONCE_LEN);
    }

    #[test]
    fn test_nonce_uses_full_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let nonce = generate_nonce(&mut rng);
            assert_eq!(nonce.len(), NONCE_LEN);
            assert!(nonce.bytes().all(|b| b.is_ascii_alphanumeric()));
            seen.extend(nonce.bytes());
        }
        assert_eq!(seen.len(), NONCE_ALPHABET.len());
        assert!(seen.contains(&b'9'));
    }

    #[test]
    fn test_base_url_keeps_explicit_port_and_drops_query() {
        let request = SignableRequest::get("http://localhost:8080/1/a.json?x=1#frag").unwrap();
        assert_eq!(request.base_url(), "http://localhost:8080/1/a.json");
    }

    #[test]
    fn test_empty_secret_still_produces_a_key() {
        assert_eq!(
            signer().signing_key(&AccessToken::new("t", "")),
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw&"
        );
    }

    #[test]
    fn test_keys_of_any_length_sign() {
        let request = SignableRequest::get(SHOW_URL).unwrap();
        let params = signer().base_params(&request, &user(), NONCE, TIMESTAMP);

        let empty = OAuthSigner::new(ConsumerCredentials::new("k", ""));
        let long = OAuthSigner::new(ConsumerCredentials::new("k", "s".repeat(200)));
        let a = empty.signature(&request, &AccessToken::new("t", ""), &params);
        let b = long.signature(&request, &AccessToken::new("t", "u".repeat(200)), &params);
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_sign_sets_authorization_header() {
        let client = reqwest::Client::new();
        let mut request = client.get(SHOW_URL).build().unwrap();
        signer().sign(&mut request, &user());

        let value = request.headers()[AUTHORIZATION].to_str().unwrap().to_string();
        let parsed = parse_authorization_header(&value).unwrap();
        assert_eq!(parsed[params::CONSUMER_KEY], "xvz1evFS4wEEPTGEFPHBog");
        assert_eq!(parsed["include_entities"], "true");
        assert!(parsed.contains_key(params::SIGNATURE));
        assert!(request.headers()[AUTHORIZATION].is_sensitive());
    }
}
