use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::timestamp::StoreTimestamp;

/// A schemaless stored document.
pub type Document = serde_json::Map<String, Value>;

/// The collections held by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Members,
    Payments,
    Reminders,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Members,
        Collection::Payments,
        Collection::Reminders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Members => "members",
            Collection::Payments => "payments",
            Collection::Reminders => "reminders",
        }
    }

    /// Name of the entity stored in this collection, used in error messages.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Collection::Members => "Member",
            Collection::Payments => "Payment",
            Collection::Reminders => "Reminder",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, data: Document) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Returns a field of the document, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering requested from a store listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }

    /// Compares two documents on this ordering's field.
    ///
    /// Documents missing the field sort after all others in either direction.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match (a.get(self.field), b.get(self.field)) {
            (Some(a), Some(b)) => {
                let ordering = compare_values(a, b);
                match self.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Compares two field values the way a document store orders them: by type
/// first, then within the type.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (rank_a, rank_b) = (type_rank(a), type_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Object(_), Value::Object(_)) => {
            StoreTimestamp::from_value(a).cmp(&StoreTimestamp::from_value(b))
        }
        _ => Ordering::Equal,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Object(_) if StoreTimestamp::from_value(value).is_some() => 3,
        Value::String(_) => 4,
        Value::Array(_) => 5,
        Value::Object(_) => 6,
    }
}
