//! `created_at` timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Format of `created_at` fields, e.g. `Wed Aug 27 13:08:45 +0000 2008`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A point in time as reported by the API.
///
/// Decodes from the API's `created_at` string; `null` decodes to the Unix
/// epoch. Serializes as Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Parse a `created_at` string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_str(s, CREATED_AT_FORMAT).map(|dt| Timestamp(dt.with_timezone(&Utc)))
    }

    /// Seconds since the Unix epoch.
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// The wrapped time.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp(DateTime::UNIX_EPOCH)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CREATED_AT_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.unix())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => Timestamp::parse(&s).map_err(serde::de::Error::custom),
            None => Ok(Timestamp::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_created_at() {
        let ts: Timestamp = serde_json::from_str(r#""Wed Aug 27 13:08:45 +0000 2008""#).unwrap();
        assert_eq!(ts.unix(), 1_219_842_525);
        assert_eq!(ts.to_string(), "Wed Aug 27 13:08:45 +0000 2008");
    }

    #[test]
    fn test_offset_is_normalised_to_utc() {
        let ts = Timestamp::parse("Wed Aug 27 15:08:45 +0200 2008").unwrap();
        assert_eq!(ts.unix(), 1_219_842_525);
    }

    #[test]
    fn test_null_is_epoch() {
        let ts: Timestamp = serde_json::from_str("null").unwrap();
        assert_eq!(ts.unix(), 0);
    }

    #[test]
    fn test_serializes_as_unix_seconds() {
        let ts = Timestamp::parse("Wed Aug 27 13:08:45 +0000 2008").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1219842525");
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!(serde_json::from_str::<Timestamp>(r#""2008-08-27T13:08:45Z""#).is_err());
    }
}
