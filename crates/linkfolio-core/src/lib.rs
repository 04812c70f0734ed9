//! # Linkfolio Core
//!
//! Everything a link-in-bio page needs between the document store and the
//! renderer.
//!
//! ## Features
//!
//! - **ProfileLoader**: joins the profile document and its links sub-collection
//! - **ProfileSession**: generation-tracked view state that drops stale loads
//! - **Icon classification**: ordered keyword rules mapping link names to icons
//! - **View rows**: enabled links with normalized hrefs, in store order
//! - **Contact export**: vCard 3.0 artifact plus pluggable delivery sinks
//! - **InMemoryDocumentStore**: fixture-backed store for tests and demos
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use linkfolio_core::{InMemoryDocumentStore, LoadOutcome, ProfileLoader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryDocumentStore::from_fixture_file("fixtures/demo.json").unwrap();
//!     let loader = ProfileLoader::new(Arc::new(store));
//!
//!     if let Some(page) = loader.load_outcome("alice").await.into_page() {
//!         for row in &page.rows {
//!             println!("{} {}", row.label, row.href);
//!         }
//!         let card = page.contact_card();
//!         println!("{} ({} bytes)", card.filename, card.bytes.len());
//!     }
//! }
//! ```

pub mod delivery;
pub mod error;
pub mod icon;
pub mod loader;
pub mod model;
pub mod session;
pub mod store;
pub mod vcard;
pub mod view;

// Re-exports
pub use delivery::{ArtifactSink, DirectorySink, StagedFile, deliver_artifact};
pub use error::{DeliveryError, LoadError, LoadResult, StoreError};
pub use icon::{IconCategory, classify};
pub use loader::{LoadOutcome, LoadedProfile, ProfileLoader};
pub use model::{Document, Link, Profile};
pub use session::{NavigationResult, ProfileSession, ViewState};
pub use store::{DocumentStore, InMemoryDocumentStore, LINKS_SUBCOLLECTION, USERS_COLLECTION};
pub use vcard::{
    ContactArtifact, ContactCard, ContactRole, VCARD_MIME_TYPE, contact_filename, export_contact,
};
pub use view::{ProfilePage, ViewRow, build_rows, normalize_href};
