//! In-memory document store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use subsync_core::document::{
    resolve_server_timestamps, Collection, Document, DocumentStore, OrderBy, StoredDocument,
};
use subsync_core::storage::{RepositoryError, Result};

type CollectionMap = HashMap<Collection, HashMap<String, Document>>;

/// In-memory document store.
///
/// Ids are random UUIDs. Server-timestamp sentinels are replaced with the
/// current time on `add` and `update`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<CollectionMap>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document verbatim under the given id.
    #[cfg(test)]
    pub async fn insert_raw(&self, collection: Collection, id: &str, data: Document) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .insert(id.to_string(), data);
    }

    /// Returns the number of documents in a collection.
    #[cfg(test)]
    pub async fn count(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(
        &self,
        collection: Collection,
        order: Option<OrderBy>,
    ) -> Result<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<StoredDocument> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| StoredDocument::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order {
            documents.sort_by(|a, b| order.compare(&a.data, &b.data));
        }

        Ok(documents)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|data| StoredDocument::new(id, data.clone())))
    }

    async fn add(&self, collection: Collection, mut data: Document) -> Result<String> {
        resolve_server_timestamps(&mut data, Utc::now());
        let id = Uuid::new_v4().to_string();

        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .insert(id.clone(), data);

        Ok(id)
    }

    async fn update(&self, collection: Collection, id: &str, mut fields: Document) -> Result<()> {
        resolve_server_timestamps(&mut fields, Utc::now());

        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: collection.entity_name(),
                id: id.to_string(),
            })?;

        document.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(&collection)
            .and_then(|docs| docs.remove(id));

        if removed.is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: collection.entity_name(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
