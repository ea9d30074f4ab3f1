//! Permissive JSON decoding helpers.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as `T::default()`.
///
/// Use together with `#[serde(default)]` so that both a missing field and an
/// explicit `null` produce the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
