//! Serde helpers for optional references.
//!
//! "Unassigned" and "not in a sprint" are always represented as an absent
//! value. Older clients sent an empty string for "unassigned"; these helpers
//! fold that into `None` on input.

use serde::{Deserialize, Deserializer};

/// `Option<T>` where `""` and `null` both mean `None`
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(T::from))
}

/// Patch-style `Option<Option<T>>`: missing = leave unchanged (via
/// `#[serde(default)]`), `null` or `""` = clear, value = set.
pub fn patch_ref<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    empty_as_none(deserializer).map(Some)
}

/// Patch-style `Option<Option<T>>` for plain values: missing = unchanged,
/// `null` = clear, value = set
pub fn patch_value<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
