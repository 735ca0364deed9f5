//! Main Twitter client implementation.
//!
//! Provides [`TwitterClient`], which signs every request with the
//! application's consumer pair and the caller's user token.
//!
//! # Examples
//!
//! ## Verify a user's credentials
//!
//! ```ignore
//! use twitter_stream::{AccessToken, ConsumerCredentials, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwitterClient::new(ConsumerCredentials::new("key", "secret"));
//!     let token = AccessToken::new("token", "token-secret");
//!     let user = client.verify_credentials(&token).await?;
//!     println!("signed in as @{}", user.screen_name);
//!     Ok(())
//! }
//! ```
//!
//! ## Sample stream
//!
//! ```ignore
//! use twitter_stream::{AccessToken, ConsumerCredentials, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwitterClient::new(ConsumerCredentials::new("key", "secret"));
//!     let token = AccessToken::new("token", "token-secret");
//!     let mut stream = client.sample_stream(&token).await?;
//!
//!     while let Some(Ok(tweet)) = stream.next().await {
//!         println!("{}: {}", tweet.id, tweet.text);
//!     }
//!     Ok(())
//! }
//! ```

use crate::client::config::ClientConfig;
use crate::client::subscription::{StreamOptions, TweetStream};
use crate::client::utils::api_error_message;
use crate::error::{Result, TwitterError};
use crate::protocol::constants::paths;
use crate::protocol::OAuthSigner;
use crate::types::{AccessToken, ConsumerCredentials, CursorPage, Friends, Snowflake, Tweet, User};
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// The main Twitter API client
///
/// Holds the application's consumer credentials for its whole life; user
/// credentials are passed to each call and never stored.
///
/// # Features
///
/// - OAuth 1.0a HMAC-SHA1 signing of every authenticated request
/// - Single-resource REST calls with API error document detection
/// - User and sample streams read on background tasks
/// - Cheap to clone and safe to share across tasks
#[derive(Clone, Debug)]
pub struct TwitterClient {
    client: reqwest::Client,
    signer: Arc<OAuthSigner>,
    config: Arc<ClientConfig>,
}

impl TwitterClient {
    /// Create a new client with default configuration
    pub fn new(consumer: ConsumerCredentials) -> Self {
        Self::with_config(consumer, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// An unusable proxy URL is logged and ignored; use
    /// [`TwitterClient::try_with_config`] to have it reported instead.
    pub fn with_config(consumer: ConsumerCredentials, config: ClientConfig) -> Self {
        match Self::try_with_config(consumer.clone(), config.clone()) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "falling back to a client without proxy");
                let config = ClientConfig {
                    proxy_url: String::new(),
                    ..config
                };
                let client = Self::http_builder(&config).build().unwrap_or_default();
                Self::from_parts(client, consumer, config)
            }
        }
    }

    /// Create a new client, reporting configuration problems.
    pub fn try_with_config(consumer: ConsumerCredentials, config: ClientConfig) -> Result<Self> {
        let mut builder = Self::http_builder(&config);

        if !config.proxy_url.is_empty() {
            builder = builder.proxy(Self::proxy(&config.proxy_url)?);
        }

        let client = builder
            .build()
            .map_err(|e| TwitterError::Config(e.to_string()))?;
        Ok(Self::from_parts(client, consumer, config))
    }

    fn proxy(proxy_url: &str) -> Result<reqwest::Proxy> {
        let invalid = |reason: String| TwitterError::Config(format!("invalid proxy '{}': {}", proxy_url, reason));

        let url = Url::parse(proxy_url).map_err(|e| invalid(e.to_string()))?;
        if !PROXY_SCHEMES.contains(&url.scheme()) {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        reqwest::Proxy::all(url).map_err(|e| invalid(e.to_string()))
    }

    fn http_builder(config: &ClientConfig) -> reqwest::ClientBuilder {
        // No whole-request timeout here: it would cut long-lived streams.
        reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.clone())
    }

    fn from_parts(client: reqwest::Client, consumer: ConsumerCredentials, config: ClientConfig) -> Self {
        TwitterClient {
            client,
            signer: Arc::new(OAuthSigner::new(consumer)),
            config: Arc::new(config),
        }
    }

    /// Fetch the profile of the user owning `token`, confirming it is valid.
    #[instrument(skip(self, token))]
    pub async fn verify_credentials(&self, token: &AccessToken) -> Result<User> {
        let url = self.endpoint(paths::VERIFY_CREDENTIALS)?;
        let user: User = self.get_json(url, Some(token)).await?;
        debug!(user_id = %user.id, screen_name = %user.screen_name, "verified credentials");
        Ok(user)
    }

    /// Fetch one tweet by id, with entities.
    ///
    /// With `token == None` the request is sent unsigned.
    #[instrument(skip(self, token))]
    pub async fn tweet(&self, token: Option<&AccessToken>, id: Snowflake) -> Result<Tweet> {
        let mut url = self.endpoint(&format!("{}/{}.json", paths::SHOW_STATUS, id))?;
        url.query_pairs_mut().append_pair("include_entities", "true");
        self.get_json(url, token).await
    }

    /// Ids of the accounts the user follows. Only the first page is fetched.
    #[instrument(skip(self, token))]
    pub async fn friend_ids(&self, token: &AccessToken) -> Result<Vec<Snowflake>> {
        Ok(self.friend_ids_page(token, None).await?.ids)
    }

    /// One page of the accounts the user follows, starting at `cursor`.
    #[instrument(skip(self, token))]
    pub async fn friend_ids_page(&self, token: &AccessToken, cursor: Option<i64>) -> Result<CursorPage> {
        let mut url = self.endpoint(paths::FRIEND_IDS)?;
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", &cursor.to_string());
        }
        self.get_json(url, Some(token)).await
    }

    /// The most recent tweets on the user's home timeline.
    #[instrument(skip(self, token))]
    pub async fn home_timeline(&self, token: &AccessToken) -> Result<Vec<Tweet>> {
        let url = self.endpoint(paths::HOME_TIMELINE)?;
        self.get_json(url, Some(token)).await
    }

    /// Open the user's event stream.
    ///
    /// Returns the ids from the stream's friends preamble together with the
    /// running stream. Failing to connect, a non-success status, or a
    /// missing or malformed preamble fails the call and starts nothing.
    #[instrument(skip(self, token))]
    pub async fn user_stream(&self, token: &AccessToken) -> Result<(Vec<Snowflake>, TweetStream)> {
        let url = Url::parse(&self.config.user_stream_url)?;
        let response = self.open_stream(url, token).await?;
        let body = response.bytes_stream().map_err(TwitterError::from);
        let (friends, stream) =
            TweetStream::spawn_with_preamble::<Friends, _>(body, self.stream_options("user")).await?;
        debug!(friends = friends.friends.len(), "user stream preamble received");
        Ok((friends.friends, stream))
    }

    /// Open the public sample stream. It has no preamble.
    #[instrument(skip(self, token))]
    pub async fn sample_stream(&self, token: &AccessToken) -> Result<TweetStream> {
        let url = Url::parse(&self.config.sample_stream_url)?;
        let response = self.open_stream(url, token).await?;
        let body = response.bytes_stream().map_err(TwitterError::from);
        Ok(TweetStream::spawn(body, self.stream_options("sample")))
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the request signer
    pub fn signer(&self) -> &OAuthSigner {
        &self.signer
    }

    /// Build a GET request, signed when a token is given.
    pub fn build_get(&self, url: Url, token: Option<&AccessToken>) -> Result<reqwest::Request> {
        let mut request = self.client.get(url).build()?;
        if let Some(token) = token {
            self.signer.sign(&mut request, token);
        }
        Ok(request)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path
        ))?)
    }

    fn stream_options(&self, label: &str) -> StreamOptions {
        StreamOptions {
            buffer: self.config.stream_buffer,
            max_frame_bytes: self.config.max_frame_bytes,
            log_frame_errors: self.config.enable_logging,
            label: label.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, token: Option<&AccessToken>) -> Result<T> {
        let mut request = self.build_get(url, token)?;
        *request.timeout_mut() = Some(Duration::from_millis(self.config.request_timeout_ms));

        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        if let Some(message) = api_error_message(&body) {
            return Err(TwitterError::Api { status, message });
        }
        if !(200..300).contains(&status) {
            return Err(TwitterError::Api {
                status,
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    async fn open_stream(&self, url: Url, token: &AccessToken) -> Result<reqwest::Response> {
        let request = self.build_get(url, Some(token))?;
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.bytes().await.unwrap_or_default();
            let message = api_error_message(&body)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(TwitterError::Api { status, message });
        }

        Ok(response)
    }
}
