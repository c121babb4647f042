use serde::{Deserialize, Serialize};

use super::QueryKey;

/// Notification published whenever a cached query changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum CacheEvent {
    /// The query was marked stale; its next read refetches.
    Invalidated(QueryKey),
    /// The query was refetched from the store.
    Refreshed(QueryKey),
}

impl CacheEvent {
    pub fn key(&self) -> QueryKey {
        match self {
            CacheEvent::Invalidated(key) | CacheEvent::Refreshed(key) => *key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialization() {
        let value = serde_json::to_value(CacheEvent::Invalidated(QueryKey::Members)).unwrap();
        assert_eq!(value, json!({ "type": "invalidated", "key": "members" }));
    }

    #[test]
    fn test_event_key() {
        assert_eq!(
            CacheEvent::Refreshed(QueryKey::Reminders).key(),
            QueryKey::Reminders
        );
    }
}
