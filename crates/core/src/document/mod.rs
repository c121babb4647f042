mod timestamp;
mod traits;
mod types;

pub use timestamp::{
    is_server_timestamp, parse_timestamp, resolve_server_timestamps, server_timestamp, to_domain,
    to_domain_at, to_store, DateInput, StoreTimestamp, TimestampError, SERVER_TIMESTAMP_FIELD,
};
pub use traits::DocumentStore;
pub use types::{compare_values, Collection, Direction, Document, OrderBy, StoredDocument};
