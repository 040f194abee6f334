use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub mod allocations;
pub mod clients;

/// Deserializes an optional form field, treating an empty or blank string
/// (an unselected `<select>` posts one) as absent.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
