//! Read-only document store abstraction
//!
//! Pages are read from a hierarchical document store: one document per user
//! in the `users` collection, and that user's links in the `links`
//! sub-collection beneath it.

pub mod memory;

pub use memory::InMemoryDocumentStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::Document;

/// Collection holding profile documents
pub const USERS_COLLECTION: &str = "users";

/// Sub-collection holding a user's links
pub const LINKS_SUBCOLLECTION: &str = "links";

/// Trait for read-only access to a document store
///
/// Implementations never write. Both reads may be issued concurrently for the
/// same parent document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the document does not exist.
    async fn get_document(&self, collection: &str, id: &str)
    -> Result<Option<Document>, StoreError>;

    /// List the documents of a sub-collection, in the store's order
    ///
    /// A missing parent or empty sub-collection yields an empty vector.
    async fn list_children(
        &self,
        collection: &str,
        id: &str,
        subcollection: &str,
    ) -> Result<Vec<Document>, StoreError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        (**self).get_document(collection, id).await
    }

    async fn list_children(
        &self,
        collection: &str,
        id: &str,
        subcollection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).list_children(collection, id, subcollection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the DocumentStore trait is object-safe
    fn _assert_object_safe(_: &dyn DocumentStore) {}

    #[tokio::test]
    async fn test_arc_forwarding() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.insert_document(USERS_COLLECTION, Document::new("alice", Default::default()));

        let shared: Arc<dyn DocumentStore> = store;
        let doc = shared.get_document(USERS_COLLECTION, "alice").await.unwrap();
        assert!(doc.is_some());
    }
}
