#![doc = include_str!("../README.md")]

//! # twitter_stream: signed requests and streaming ingestion
//!
//! This crate implements a client for the Twitter HTTP API built around two
//! pieces with real protocol content:
//!
//! 1. **Request signing** - OAuth 1.0a HMAC-SHA1 `Authorization` headers, with
//!    exact, order-independent canonicalization
//! 2. **Stream ingestion** - long-lived responses split on `\r`, keep-alive
//!    frames discarded, every other frame decoded into a typed event on a
//!    background task
//!
//! ## Key Features
//!
//! - **Deterministic signing**: nonce source and clock are injectable
//! - **Typed credentials**: the consumer pair and the user pair cannot be mixed up
//! - **Null-tolerant decoding**: every nullable scalar decodes `null` to its zero value
//! - **Lossless ids**: one [`Snowflake`] per id, string mirror derived on demand
//! - **Bounded queue**: events and errors are delivered in wire order with backpressure
//! - **Explicit cancellation**: dropping or cancelling a stream releases its connection
//!
//! ## Client Usage
//!
//! ```ignore
//! use twitter_stream::{AccessToken, ConsumerCredentials, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwitterClient::new(ConsumerCredentials::new("key", "secret"));
//!     let token = AccessToken::new("token", "token-secret");
//!
//!     let (friends, mut stream) = client.user_stream(&token).await?;
//!     println!("following {} accounts", friends.len());
//!
//!     while let Some(item) = stream.next().await {
//!         match item {
//!             Ok(tweet) => println!("{}: {}", tweet.id, tweet.text),
//!             Err(err) => eprintln!("stream error: {}", err),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Signing Usage
//!
//! ```
//! use twitter_stream::protocol::{FixedClock, OAuthSigner, SignableRequest};
//! use twitter_stream::{AccessToken, ConsumerCredentials};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let signer = OAuthSigner::new(ConsumerCredentials::new("ckey", "csecret"));
//! let request = SignableRequest::get("https://api.twitter.com/1/statuses/show/1.json").unwrap();
//! let token = AccessToken::new("token", "secret");
//!
//! let a = signer.authorization(&request, &token, &mut StdRng::seed_from_u64(1), &FixedClock(1_300_000_000));
//! let b = signer.authorization(&request, &token, &mut StdRng::seed_from_u64(1), &FixedClock(1_300_000_000));
//! assert_eq!(a, b);
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Wire types (Tweet, User, Snowflake, credentials, etc.)
//! - **[error]** - Error types and result handling
//! - **[client]** - HTTP client, frame parser and stream reader
//! - **[protocol]** - OAuth signing, percent-encoding and protocol constants

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{ClientConfig, EventStream, StreamHandle, TweetStream, TwitterClient};
pub use error::{Result, TwitterError};
pub use protocol::{OAuthSigner, SignableRequest};
pub use types::{AccessToken, ConsumerCredentials, Friends, Snowflake, Tweet, User};
