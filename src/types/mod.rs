//! Wire types for the Twitter REST and streaming APIs.
//!
//! The API marks almost every scalar as nullable, so each field decodes
//! through the [`nullable`] adapter: a JSON `null` or a missing key yields the
//! type's zero value instead of a decode error.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Snowflake`] | 64-bit identifier with its decimal string mirror |
//! | [`Timestamp`] | `created_at` time in the API's Ruby date format |
//! | [`Tweet`] | A status, as delivered by REST calls and streams |
//! | [`User`] | A user profile |
//! | [`Friends`] | Preamble sent once at the start of a user stream |
//! | [`AccessToken`] | Per-user OAuth token pair |
//! | [`ConsumerCredentials`] | Application OAuth key pair |
//!
//! # Examples
//!
//! ```
//! use twitter_stream::types::Tweet;
//!
//! let tweet: Tweet = serde_json::from_str(
//!     r#"{"id": 42, "id_str": "42", "text": null, "retweet_count": null}"#,
//! ).unwrap();
//! assert_eq!(tweet.id.get(), 42);
//! assert_eq!(tweet.text, "");
//! assert_eq!(tweet.retweet_count, 0);
//! ```

mod credentials;
mod nullable;
mod snowflake;
mod timestamp;
mod tweet;
mod user;

pub use credentials::{AccessToken, ConsumerCredentials};
pub use nullable::nullable;
pub use snowflake::Snowflake;
pub use timestamp::Timestamp;
pub use tweet::{Coordinates, Entities, Hashtag, Media, Size, Tweet, Url, UserMention};
pub use user::{CursorPage, Friends, User};
