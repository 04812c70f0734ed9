//! Configuration for the Firestore backend

use serde::{Deserialize, Serialize};

/// Public Firestore REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Database id used when none is given
pub const DEFAULT_DATABASE: &str = "(default)";

/// Configuration for a [`FirestoreStore`](crate::FirestoreStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project id
    pub project_id: String,
    /// Database id
    pub database: String,
    /// REST root, without the `/projects/...` suffix
    pub base_url: String,
    /// Web API key sent as the `key` query parameter
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Documents requested per list page
    pub page_size: u32,
}

impl FirestoreConfig {
    /// Create a configuration for a project with default settings
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            page_size: 100,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point at another REST root (an emulator, for instance)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the database id
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the list page size (at least 1)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
