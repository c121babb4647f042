//! In-memory document store.
//!
//! Keeps every collection in a `HashMap` wrapped in `Arc<RwLock<_>>`. Data is
//! not persisted and is lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use subsync::storage::inmemory::InMemoryDocumentStore;
//!
//! let store = InMemoryDocumentStore::new();
//! let id = store.add(Collection::Members, document).await?;
//! ```

mod store;

pub use store::InMemoryDocumentStore;
