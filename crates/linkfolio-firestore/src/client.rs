//! Firestore REST client

use async_trait::async_trait;
use linkfolio_core::{Document, DocumentStore, StoreError};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::config::FirestoreConfig;
use crate::value::{ListPage, RawDocument, decode_document};

const USER_AGENT: &str = concat!("linkfolio/", env!("CARGO_PKG_VERSION"));

/// Read-only [`DocumentStore`] over the Firestore REST API
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: Client,
    config: FirestoreConfig,
    documents_root: Url,
}

impl FirestoreStore {
    /// Create a store for the configured project
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StoreError::transport(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, config)
    }

    /// Create a store reusing an existing HTTP client
    pub fn with_client(client: Client, config: FirestoreConfig) -> Result<Self, StoreError> {
        let mut documents_root = Url::parse(&config.base_url)
            .map_err(|e| StoreError::transport(format!("Invalid base URL {:?}: {e}", config.base_url)))?;
        documents_root
            .path_segments_mut()
            .map_err(|()| StoreError::transport(format!("Base URL {:?} cannot have a path", config.base_url)))?
            .pop_if_empty()
            .extend([
                "projects",
                config.project_id.as_str(),
                "databases",
                config.database.as_str(),
                "documents",
            ]);

        Ok(Self {
            client,
            config,
            documents_root,
        })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    /// URL under the documents root; segments are percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.documents_root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }

    // Logged and reported paths never carry the query, which holds the key.
    async fn fetch(&self, url: Url) -> Result<Option<reqwest::Response>, StoreError> {
        let path = url.path().to_string();
        debug!(%path, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::transport(e.without_url().to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            status => Err(StoreError::Status {
                status: status.as_u16(),
                path,
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    #[instrument(level = "debug", skip(self))]
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        // An empty id would address the collection itself.
        if id.is_empty() {
            return Ok(None);
        }

        let Some(response) = self.fetch(self.url(&[collection, id])).await? else {
            return Ok(None);
        };
        let raw: RawDocument = response
            .json()
            .await
            .map_err(|e| StoreError::decode(e.without_url().to_string()))?;

        decode_document(&raw).map(Some)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_children(
        &self,
        collection: &str,
        id: &str,
        subcollection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        if id.is_empty() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.url(&[collection, id, subcollection]);
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &self.config.page_size.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            // A missing parent lists as empty; a page vanishing mid-listing
            // would otherwise return a truncated list.
            let path = url.path().to_string();
            let Some(response) = self.fetch(url).await? else {
                if page_token.is_some() {
                    return Err(StoreError::Status {
                        status: StatusCode::NOT_FOUND.as_u16(),
                        path,
                    });
                }
                break;
            };
            let page: ListPage = response
                .json()
                .await
                .map_err(|e| StoreError::decode(e.without_url().to_string()))?;

            for raw in &page.documents {
                documents.push(decode_document(raw)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = documents.len(), "Listed children");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(config: FirestoreConfig) -> FirestoreStore {
        FirestoreStore::new(config).unwrap()
    }

    #[test]
    fn test_document_url() {
        let store = store(FirestoreConfig::new("demo"));
        let url = store.url(&["users", "alice"]);
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents/users/alice"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let store = store(FirestoreConfig::new("demo"));
        let url = store.url(&["users", "a/b c"]);
        assert!(url.path().ends_with("/documents/users/a%2Fb%20c"));
    }

    #[test]
    fn test_api_key_goes_in_query() {
        let store = store(
            FirestoreConfig::new("demo")
                .with_base_url("http://127.0.0.1:9000/v1/")
                .with_api_key("k3y"),
        );
        let url = store.url(&["users", "alice"]);
        assert_eq!(url.query(), Some("key=k3y"));
        assert_eq!(
            url.path(),
            "/v1/projects/demo/databases/(default)/documents/users/alice"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = FirestoreStore::new(FirestoreConfig::new("demo").with_base_url("not a url"));
        assert!(matches!(result, Err(StoreError::Transport(_))));
    }

    #[tokio::test]
    async fn test_empty_id_short_circuits() {
        // Unroutable base: any request would fail with a transport error.
        let store = store(FirestoreConfig::new("demo").with_base_url("http://127.0.0.1:1/v1"));
        assert!(store.get_document("users", "").await.unwrap().is_none());
        assert!(store.list_children("users", "", "links").await.unwrap().is_empty());
    }
}
