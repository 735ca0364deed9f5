//! 64-bit identifiers.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 64-bit Twitter identifier.
///
/// The API sends every id twice: as a JSON number (`id`) and as a decimal
/// string (`id_str`) for consumers that cannot hold a full `u64`. Only the
/// integer is stored; the string mirror is derived with [`Snowflake::as_string`]
/// or `Display`, so the two forms can never disagree.
///
/// Decoding accepts a number, a decimal string, or `null` (which yields `0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(pub u64);

impl Snowflake {
    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Snowflake(id)
    }

    /// The raw integer.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The decimal string mirror, as sent in `*_str` fields.
    pub fn as_string(self) -> String {
        self.0.to_string()
    }

    /// Whether this is the zero value left by a `null` or absent id.
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Snowflake(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Snowflake)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned 64-bit id as a number or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
        Ok(Snowflake(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
        u64::try_from(v)
            .map(Snowflake)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Snowflake, E> {
        Ok(Snowflake::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Snowflake, E> {
        Ok(Snowflake::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Snowflake, D::Error> {
        deserializer.deserialize_any(self)
    }
}
