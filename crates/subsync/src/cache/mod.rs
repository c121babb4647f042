//! Query cache for collection reads.
//!
//! [`QueryCache`] sits between request handlers and the repositories. Reads
//! are served from per-collection [`QuerySlot`]s while fresh; writes go
//! straight to the repository and, once confirmed, invalidate the slot of the
//! collection they touched.
//!
//! # Example
//!
//! ```ignore
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let repo = Arc::new(DocumentRepository::new(store));
//! let cache = QueryCache::from_repository(repo, Freshness::default(), 64);
//!
//! let members = cache.members().await;
//! ```

mod query;
mod slot;

pub use query::QueryCache;
pub use slot::QuerySlot;
