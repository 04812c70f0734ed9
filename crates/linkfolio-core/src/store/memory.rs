//! In-memory document store
//!
//! Backs tests and local demos. Data can be inserted directly or loaded from a
//! JSON fixture:
//!
//! ```json
//! {
//!   "users": {
//!     "alice": {
//!       "name": "Alice Smith",
//!       "title": "Engineer",
//!       "links": [
//!         { "id": "gh", "name": "GitHub", "link": "github.com/a", "isEnabled": true }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! A user entry with only `links` has no profile document.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{DocumentStore, LINKS_SUBCOLLECTION, USERS_COLLECTION};
use crate::error::StoreError;
use crate::model::Document;

type DocumentKey = (String, String);
type ChildrenKey = (String, String, String);

/// In-memory implementation of DocumentStore
///
/// Uses `DashMap` for concurrent access. Sub-collections keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    /// (collection, id) -> document
    documents: DashMap<DocumentKey, Document>,
    /// (collection, id, subcollection) -> ordered children
    children: DashMap<ChildrenKey, Vec<Document>>,
    /// When set, every read fails with `StoreError::Unavailable`
    unavailable: AtomicBool,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    users: BTreeMap<String, FixtureUser>,
}

#[derive(Debug, Deserialize)]
struct FixtureUser {
    #[serde(default)]
    links: Vec<Map<String, Value>>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from fixture JSON text
    pub fn from_fixture_json(json: &str) -> Result<Self, StoreError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let store = Self::new();

        for (user_id, user) in fixture.users {
            if !user.fields.is_empty() {
                store.insert_document(USERS_COLLECTION, Document::new(&user_id, user.fields));
            }

            for (index, mut fields) in user.links.into_iter().enumerate() {
                let link_id = match fields.remove("id") {
                    Some(Value::String(id)) => id,
                    _ => index.to_string(),
                };
                store.push_child(
                    USERS_COLLECTION,
                    &user_id,
                    LINKS_SUBCOLLECTION,
                    Document::new(link_id, fields),
                );
            }
        }

        debug!(
            documents = store.document_count(),
            "Loaded in-memory store from fixture"
        );
        Ok(store)
    }

    /// Build a store from a fixture file
    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_fixture_json(&json)
    }

    /// Insert or replace a document
    pub fn insert_document(&self, collection: &str, document: Document) {
        trace!(collection, id = %document.id, "Inserting document");
        self.documents
            .insert((collection.to_string(), document.id.clone()), document);
    }

    /// Append a document to a sub-collection
    pub fn push_child(&self, collection: &str, id: &str, subcollection: &str, document: Document) {
        self.children
            .entry((collection.to_string(), id.to_string(), subcollection.to_string()))
            .or_default()
            .push(document);
    }

    /// Make every subsequent read fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of top-level documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let key = (collection.to_string(), id.to_string());
        Ok(self.documents.get(&key).map(|entry| entry.value().clone()))
    }

    async fn list_children(
        &self,
        collection: &str,
        id: &str,
        subcollection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let key = (collection.to_string(), id.to_string(), subcollection.to_string());
        Ok(self
            .children
            .get(&key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
