//! Null-tolerant field decoding.

use serde::{Deserialize, Deserializer};

/// Decode a field, mapping a JSON `null` to `T::default()`.
///
/// Pair it with `#[serde(default)]` so that an absent key behaves the same
/// way as an explicit `null`:
///
/// ```
/// use serde::Deserialize;
/// use twitter_stream::types::nullable;
///
/// #[derive(Deserialize)]
/// struct Profile {
///     #[serde(default, deserialize_with = "nullable")]
///     location: String,
/// }
///
/// let p: Profile = serde_json::from_str(r#"{"location": null}"#).unwrap();
/// assert_eq!(p.location, "");
/// ```
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
