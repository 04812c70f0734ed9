//! # Linkfolio Firestore
//!
//! [`DocumentStore`](linkfolio_core::DocumentStore) backed by the Firestore
//! REST API (v1). Reads only: a profile document is fetched with a single
//! GET, and a links sub-collection is listed page by page until the server
//! stops returning a `nextPageToken`.
//!
//! ```rust,ignore
//! use linkfolio_firestore::{FirestoreConfig, FirestoreStore};
//!
//! let store = FirestoreStore::new(FirestoreConfig::new("my-project").with_api_key(key))?;
//! ```

pub mod client;
pub mod config;
pub mod value;

pub use client::FirestoreStore;
pub use config::{DEFAULT_BASE_URL, DEFAULT_DATABASE, FirestoreConfig};
