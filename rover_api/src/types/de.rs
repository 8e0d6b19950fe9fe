use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing key: fall back to `T::default()`.
///
/// Pair with `#[serde(default)]` so the key may also be absent.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
