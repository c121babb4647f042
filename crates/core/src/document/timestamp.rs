//! Conversion between store-native timestamps and plain dates.
//!
//! The store keeps timestamps as `{"seconds": i64, "nanoseconds": u32}`
//! objects. Documents written by older clients may instead carry RFC 3339
//! strings, bare `YYYY-MM-DD` dates or epoch milliseconds, so reads accept all
//! of them. Reads never fail: anything absent or unrecognisable becomes "now".

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use super::Document;

/// Field used by the server-timestamp sentinel object.
pub const SERVER_TIMESTAMP_FIELD: &str = "$serverTimestamp";

/// Errors produced when converting a caller-supplied date for storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Unparseable date: {0}")]
    Unparseable(String),
    #[error("Timestamp out of range: {0}")]
    OutOfRange(i64),
}

/// The store's native timestamp representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl StoreTimestamp {
    /// Reads a timestamp object. Returns `None` for anything else, including
    /// an unresolved server-timestamp sentinel.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let seconds = object.get("seconds")?.as_i64()?;
        let nanoseconds = object
            .get("nanoseconds")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Some(Self {
            seconds,
            nanoseconds: u32::try_from(nanoseconds).ok()?,
        })
    }

    pub fn to_value(self) -> Value {
        json!({ "seconds": self.seconds, "nanoseconds": self.nanoseconds })
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }
}

impl From<DateTime<Utc>> for StoreTimestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Self {
            seconds: date.timestamp(),
            nanoseconds: date.timestamp_subsec_nanos(),
        }
    }
}

/// A caller-supplied date: either epoch milliseconds or a date-like string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
}

impl DateInput {
    /// Parses this input into a UTC date.
    pub fn parse(&self) -> Result<DateTime<Utc>, TimestampError> {
        match self {
            DateInput::Millis(millis) => {
                DateTime::from_timestamp_millis(*millis).ok_or(TimestampError::OutOfRange(*millis))
            }
            DateInput::Text(text) => {
                parse_date_text(text).ok_or_else(|| TimestampError::Unparseable(text.clone()))
            }
        }
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(date: DateTime<Utc>) -> Self {
        DateInput::Text(date.to_rfc3339())
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

/// Returns the sentinel asking the store to fill in its own time on write.
pub fn server_timestamp() -> Value {
    json!({ SERVER_TIMESTAMP_FIELD: true })
}

/// Returns true if the value is the server-timestamp sentinel.
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.get(SERVER_TIMESTAMP_FIELD))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Replaces every top-level server-timestamp sentinel with `at`.
pub fn resolve_server_timestamps(document: &mut Document, at: DateTime<Utc>) {
    for value in document.values_mut() {
        if is_server_timestamp(value) {
            *value = StoreTimestamp::from(at).to_value();
        }
    }
}

/// Converts a caller-supplied date into a store value.
///
/// `None` produces the server-timestamp sentinel.
///
/// # Examples
///
/// ```
/// use subsync_core::document::{is_server_timestamp, to_store, DateInput};
///
/// let stored = to_store(Some(&DateInput::from("2023-03-07"))).unwrap();
/// assert_eq!(stored["seconds"], 1678147200);
///
/// assert!(is_server_timestamp(&to_store(None).unwrap()));
/// ```
pub fn to_store(input: Option<&DateInput>) -> Result<Value, TimestampError> {
    match input {
        Some(input) => Ok(StoreTimestamp::from(input.parse()?).to_value()),
        None => Ok(server_timestamp()),
    }
}

/// Converts a stored value into a date, falling back to the current time.
pub fn to_domain(value: Option<&Value>) -> DateTime<Utc> {
    to_domain_at(value, Utc::now())
}

/// Converts a stored value into a date, falling back to `now`.
pub fn to_domain_at(value: Option<&Value>, now: DateTime<Utc>) -> DateTime<Utc> {
    parse_timestamp(value).unwrap_or(now)
}

/// Reads any timestamp-shaped value. Returns `None` when absent or malformed.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        object @ Value::Object(_) => StoreTimestamp::from_value(object)?.to_datetime(),
        Value::String(text) => parse_date_text(text),
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
