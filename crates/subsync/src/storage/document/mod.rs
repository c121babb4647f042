//! Typed repositories over a document store.
//!
//! Documents are parsed into domain types at this boundary; nothing untyped
//! leaves it.

mod conversions;
mod repository;

pub use repository::DocumentRepository;
