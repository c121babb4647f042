use async_trait::async_trait;

use crate::storage::Result;

use super::{Collection, Document, OrderBy, StoredDocument};

/// A remote store of schemaless documents grouped into collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists every document in a collection, optionally ordered by a field.
    async fn list(
        &self,
        collection: Collection,
        order: Option<OrderBy>,
    ) -> Result<Vec<StoredDocument>>;

    /// Gets a document by its id.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<StoredDocument>>;

    /// Adds a document and returns its newly assigned id.
    async fn add(&self, collection: Collection, data: Document) -> Result<String>;

    /// Merges the given fields into an existing document.
    async fn update(&self, collection: Collection, id: &str, fields: Document) -> Result<()>;

    /// Deletes a document by its id.
    async fn delete(&self, collection: Collection, id: &str) -> Result<()>;
}
