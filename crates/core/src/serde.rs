//! Serde helper functions for request deserialization.
//!
//! These functions handle the quirks of form-driven clients where empty
//! strings should be treated as None for optional fields.

use serde::{Deserialize, Deserializer};

use crate::document::DateInput;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional date input, treating empty strings as None.
///
/// Accepts epoch milliseconds, RFC 3339 timestamps and `YYYY-MM-DD` dates.
/// Anything else is rejected here rather than at write time.
pub fn deserialize_optional_date_input<'de, D>(
    deserializer: D,
) -> Result<Option<DateInput>, D::Error>
where
    D: Deserializer<'de>,
{
    let input: Option<DateInput> = Option::deserialize(deserializer)?;
    match input {
        Some(DateInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(input) => input
            .parse()
            .map(|_| Some(input))
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
