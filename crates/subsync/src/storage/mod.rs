//! Storage backends.
//!
//! `inmemory` provides the document store used by the binary and by tests.
//! `document` maps the store's schemaless documents onto the typed
//! repository traits defined in `subsync_core::storage`.

pub mod document;
pub mod inmemory;

pub use document::DocumentRepository;
pub use inmemory::InMemoryDocumentStore;
