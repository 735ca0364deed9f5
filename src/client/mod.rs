//! Twitter HTTP client implementation.
//!
//! This module provides the client that signs and issues REST calls and
//! opens long-lived streams:
//!
//! - **Sign every request** with the application and the caller's user token
//! - **Fetch single resources** (a tweet, the authenticated user, friend ids)
//! - **Consume streams** of tweets on a background task, with keep-alive
//!   filtering, per-frame error reporting and explicit cancellation
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── config       - Client configuration
//! ├── fetch        - TwitterClient and HTTP operations
//! ├── parser       - Carriage-return frame parser
//! ├── subscription - Stream reader task and handles
//! └── utils        - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TwitterClient`] | Signed REST calls and stream openers |
//! | [`ClientConfig`] | Client configuration options |
//! | [`FrameParser`] | Streaming frame splitter |
//! | [`EventStream`] | Ordered events and errors of an open stream |
//! | [`StreamHandle`] | Cancellation and state of a stream's reader task |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use twitter_stream::client::{ClientConfig, TwitterClient};
//! use twitter_stream::ConsumerCredentials;
//!
//! let consumer = ConsumerCredentials::new("consumer-key", "consumer-secret");
//!
//! // Default configuration
//! let client = TwitterClient::new(consumer.clone());
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     stream_buffer: 1000,
//!     request_timeout_ms: 5_000,
//!     ..Default::default()
//! };
//! let client = TwitterClient::with_config(consumer, config);
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use twitter_stream::client::{exponential_backoff, is_retryable_status};
//! use std::time::Duration;
//!
//! assert!(is_retryable_status(503));
//! assert!(!is_retryable_status(404));
//!
//! let delay = exponential_backoff(2, 100);
//! assert_eq!(delay, Duration::from_millis(400));
//! ```

mod config;
mod fetch;
mod parser;
mod subscription;
mod utils;

pub use config::ClientConfig;
pub use fetch::TwitterClient;
pub use parser::{Frame, FrameParser, ParseState};
pub use subscription::{ByteStream, EventStream, StreamHandle, StreamOptions, StreamState, TweetStream};
pub use utils::*;
