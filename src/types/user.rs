//! User profiles, the user-stream preamble and friend-id pages.

use super::{nullable, Snowflake, Timestamp};
use serde::{Deserialize, Serialize};

/// A user profile as returned by `account/verify_credentials` and embedded in
/// tweets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "nullable")]
    pub contributors_enabled: bool,

    #[serde(default)]
    pub created_at: Timestamp,

    #[serde(default, deserialize_with = "nullable")]
    pub default_profile: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub default_profile_image: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub description: String,

    #[serde(default, deserialize_with = "nullable")]
    pub favourites_count: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub follow_request_sent: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub followers_count: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub following: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub friends_count: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub geo_enabled: bool,

    /// User id; `id_str` on the wire is its string mirror
    #[serde(default)]
    pub id: Snowflake,

    #[serde(default, deserialize_with = "nullable")]
    pub is_translator: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub lang: String,

    #[serde(default, deserialize_with = "nullable")]
    pub listed_count: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub location: String,

    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_background_color: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_background_image_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_background_image_url_https: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_image_url: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_image_url_https: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_link_color: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_sidebar_border_color: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_sidebar_fill_color: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_text_color: String,

    #[serde(default, deserialize_with = "nullable")]
    pub profile_use_background_image: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub protected: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub screen_name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub show_all_inline_media: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub statuses_count: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub time_zone: String,

    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    /// Offset from UTC in seconds
    #[serde(default, deserialize_with = "nullable")]
    pub utc_offset: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub verified: bool,
}

/// The object a user stream sends once, before any tweet: the ids of every
/// account the user follows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friends {
    #[serde(default, deserialize_with = "nullable")]
    pub friends: Vec<Snowflake>,
}

/// One page of a cursored id listing such as `friends/ids`.
///
/// Only the first page is ever requested; the cursors are kept so callers can
/// page themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPage {
    #[serde(default, deserialize_with = "nullable")]
    pub next_cursor: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub previous_cursor: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub ids: Vec<Snowflake>,
}

impl CursorPage {
    /// Whether more pages follow this one.
    pub fn has_next(&self) -> bool {
        self.next_cursor != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_user_with_nulls() {
        let raw = r#"{
            "id": 6253282, "id_str": "6253282", "screen_name": "twitterapi",
            "name": "Twitter API", "location": null, "url": null, "utc_offset": null,
            "time_zone": null, "followers_count": 1000, "verified": true,
            "created_at": "Wed May 23 06:01:13 +0000 2007", "notifications": null
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id.get(), 6_253_282);
        assert_eq!(user.location, "");
        assert_eq!(user.utc_offset, 0);
        assert_eq!(user.followers_count, 1000);
        assert!(user.verified);
        assert!(!user.protected);
    }

    #[test]
    fn test_decode_friends_preamble() {
        let friends: Friends = serde_json::from_str(r#"{"friends":[1,2,3]}"#).unwrap();
        let ids: Vec<u64> = friends.friends.iter().map(|f| f.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_page() {
        let page: CursorPage = serde_json::from_str(
            r#"{"ids":[9,8],"next_cursor":1374004777531007833,"next_cursor_str":"1374004777531007833","previous_cursor":0}"#,
        )
        .unwrap();
        assert!(page.has_next());
        assert_eq!(page.ids, vec![Snowflake(9), Snowflake(8)]);
    }
}
