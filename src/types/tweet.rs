//! Tweets and the entities embedded in them.
//!
//! The deprecated `geo` block, `contributors` and `place` are not decoded.

use super::{nullable, Snowflake, Timestamp, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// GeoJSON point the tweet was sent from, if shared
    #[serde(default)]
    pub coordinates: Option<Coordinates>,

    /// Creation time
    #[serde(default)]
    pub created_at: Timestamp,

    /// Hashtags, links, mentions and media in the text
    #[serde(default, deserialize_with = "nullable")]
    pub entities: Entities,

    /// Whether the authenticating user favorited the tweet
    #[serde(default, deserialize_with = "nullable")]
    pub favorited: bool,

    /// Tweet id; `id_str` on the wire is its string mirror
    #[serde(default)]
    pub id: Snowflake,

    /// Screen name of the user this tweet replies to
    #[serde(default, deserialize_with = "nullable")]
    pub in_reply_to_screen_name: String,

    /// Id of the tweet this one replies to
    #[serde(default)]
    pub in_reply_to_status_id: Snowflake,

    /// Id of the user this tweet replies to
    #[serde(default)]
    pub in_reply_to_user_id: Snowflake,

    /// Whether a contained link may point at sensitive content
    #[serde(default, deserialize_with = "nullable")]
    pub possibly_sensitive: bool,

    /// Whether the sensitivity flag can still be changed
    #[serde(default, deserialize_with = "nullable")]
    pub possibly_sensitive_editable: bool,

    /// Number of retweets
    #[serde(default, deserialize_with = "nullable")]
    pub retweet_count: i64,

    /// Whether the authenticating user retweeted this tweet
    #[serde(default, deserialize_with = "nullable")]
    pub retweeted: bool,

    /// HTML anchor naming the posting application
    #[serde(default, deserialize_with = "nullable")]
    pub source: String,

    /// The status text
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,

    /// Whether the text was cut to fit the length limit
    #[serde(default, deserialize_with = "nullable")]
    pub truncated: bool,

    /// Author; absent in some trimmed payloads
    #[serde(default)]
    pub user: Option<Box<User>>,

    #[serde(default, deserialize_with = "nullable")]
    pub media_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub media_url_https: String,

    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub display_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub expanded_url: String,
}

impl Tweet {
    /// Whether this tweet is a reply to another status.
    pub fn is_reply(&self) -> bool {
        !self.in_reply_to_status_id.is_unset()
    }

    /// Screen name of the author, or an empty string if the user was omitted.
    pub fn author_screen_name(&self) -> &str {
        self.user.as_deref().map(|u| u.screen_name.as_str()).unwrap_or_default()
    }
}

/// Entities extracted from tweet text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, deserialize_with = "nullable")]
    pub hashtags: Vec<Hashtag>,

    #[serde(default, deserialize_with = "nullable")]
    pub urls: Vec<Url>,

    #[serde(default, deserialize_with = "nullable")]
    pub user_mentions: Vec<UserMention>,

    #[serde(default, deserialize_with = "nullable")]
    pub media: Vec<Media>,
}

/// A GeoJSON point. `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,

    #[serde(default, deserialize_with = "nullable")]
    pub coordinates: Vec<f64>,
}

impl Coordinates {
    /// Longitude and latitude, when the point is well formed.
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat] => Some((*lon, *lat)),
            _ => None,
        }
    }
}

/// A media item attached to a tweet. Only photos are sent today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub id: Snowflake,

    #[serde(default, deserialize_with = "nullable")]
    pub media_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub media_url_https: String,

    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub display_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub expanded_url: String,

    /// Available renditions keyed by name (`thumb`, `small`, `large`, ...)
    #[serde(default, deserialize_with = "nullable")]
    pub sizes: HashMap<String, Size>,

    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,

    #[serde(default, deserialize_with = "nullable")]
    pub indices: Vec<u32>,
}

/// Dimensions of one photo rendition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    #[serde(rename = "w", default, deserialize_with = "nullable")]
    pub width: u32,

    #[serde(rename = "h", default, deserialize_with = "nullable")]
    pub height: u32,

    #[serde(default, deserialize_with = "nullable")]
    pub resize: String,
}

/// An `@mention` in tweet text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMention {
    #[serde(default)]
    pub id: Snowflake,

    #[serde(default, deserialize_with = "nullable")]
    pub indices: Vec<u32>,

    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub screen_name: String,
}

/// A link in tweet text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    #[serde(default, deserialize_with = "nullable")]
    pub display_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub expanded_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub indices: Vec<u32>,

    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

/// A hashtag in tweet text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtag {
    #[serde(default, deserialize_with = "nullable")]
    pub indices: Vec<u32>,

    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

impl Hashtag {
    /// Case-folded tag text, suitable as a lookup key.
    pub fn normalized(&self) -> String {
        self.text.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = r#"{
        "coordinates": {"type": "Point", "coordinates": [-122.40, 37.78]},
        "created_at": "Wed Aug 27 13:08:45 +0000 2008",
        "entities": {
            "hashtags": [{"indices": [32, 42], "text": "Rustlang"}],
            "urls": [{"url": "http://t.co/x", "expanded_url": null, "display_url": "x.com", "indices": [0, 13]}],
            "user_mentions": [{"id": 6253282, "id_str": "6253282", "name": "API", "screen_name": "twitterapi", "indices": [4, 15]}],
            "media": [{"id": 7, "id_str": "7", "type": "photo", "sizes": {"thumb": {"w": 150, "h": 150, "resize": "crop"}}}]
        },
        "favorited": null,
        "id": 114749583439036416,
        "id_str": "114749583439036416",
        "in_reply_to_screen_name": null,
        "in_reply_to_status_id": null,
        "in_reply_to_status_id_str": null,
        "in_reply_to_user_id": null,
        "possibly_sensitive": false,
        "retweet_count": 3,
        "retweeted": false,
        "source": "web",
        "text": "Tweet Button, Follow Button, and #Rustlang",
        "truncated": false,
        "user": {"id": 6253282, "id_str": "6253282", "screen_name": "twitterapi", "name": "Twitter API"},
        "geo": null,
        "place": null,
        "contributors": null
    }"#;

    #[test]
    fn test_decode_full_status() {
        let tweet: Tweet = serde_json::from_str(STATUS).unwrap();
        assert_eq!(tweet.id.get(), 114_749_583_439_036_416);
        assert_eq!(tweet.id.as_string(), "114749583439036416");
        assert_eq!(tweet.created_at.unix(), 1_219_842_525);
        assert_eq!(tweet.retweet_count, 3);
        assert!(!tweet.favorited);
        assert!(!tweet.is_reply());
        assert_eq!(tweet.in_reply_to_screen_name, "");
        assert_eq!(tweet.author_screen_name(), "twitterapi");
        assert_eq!(tweet.coordinates.as_ref().and_then(Coordinates::lon_lat), Some((-122.40, 37.78)));
        assert_eq!(tweet.entities.hashtags[0].normalized(), "rustlang");
        assert_eq!(tweet.entities.urls[0].expanded_url, "");
        assert_eq!(tweet.entities.user_mentions[0].id.get(), 6_253_282);
        assert_eq!(tweet.entities.media[0].kind, "photo");
        assert_eq!(tweet.entities.media[0].sizes["thumb"].width, 150);
    }

    #[test]
    fn test_id_matches_string_mirror() {
        let raw: serde_json::Value = serde_json::from_str(STATUS).unwrap();
        let tweet: Tweet = serde_json::from_value(raw.clone()).unwrap();
        let mirror: Snowflake = raw["id_str"].as_str().unwrap().parse().unwrap();
        assert_eq!(tweet.id, mirror);
    }

    #[test]
    fn test_every_scalar_tolerates_null() {
        let raw = r#"{
            "coordinates": null, "created_at": null, "entities": null, "favorited": null,
            "id": null, "in_reply_to_screen_name": null, "in_reply_to_status_id": null,
            "in_reply_to_user_id": null, "possibly_sensitive": null,
            "possibly_sensitive_editable": null, "retweet_count": null, "retweeted": null,
            "source": null, "text": null, "truncated": null, "user": null,
            "media_url": null, "media_url_https": null, "url": null,
            "display_url": null, "expanded_url": null
        }"#;
        let tweet: Tweet = serde_json::from_str(raw).unwrap();
        assert_eq!(tweet, Tweet::default());
    }
}
