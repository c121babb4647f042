use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Collection;

/// Identifies a cached collection query.
///
/// Each key maps to exactly one collection, so writes to one collection never
/// touch the cached results of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKey {
    Members,
    Payments,
    Reminders,
}

impl QueryKey {
    pub const ALL: [QueryKey; 3] = [QueryKey::Members, QueryKey::Payments, QueryKey::Reminders];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Members => "members",
            QueryKey::Payments => "payments",
            QueryKey::Reminders => "reminders",
        }
    }

    /// Returns the collection this query reads.
    pub fn collection(&self) -> Collection {
        match self {
            QueryKey::Members => Collection::Members,
            QueryKey::Payments => Collection::Payments,
            QueryKey::Reminders => Collection::Reminders,
        }
    }
}

impl From<Collection> for QueryKey {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Members => QueryKey::Members,
            Collection::Payments => QueryKey::Payments,
            Collection::Reminders => QueryKey::Reminders,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_match_collections() {
        for key in QueryKey::ALL {
            assert_eq!(key.as_str(), key.collection().as_str());
            assert_eq!(QueryKey::from(key.collection()), key);
        }
    }

    #[test]
    fn test_key_serializes_lowercase() {
        let json = serde_json::to_string(&QueryKey::Payments).unwrap();
        assert_eq!(json, "\"payments\"");
    }
}
