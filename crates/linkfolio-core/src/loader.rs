//! Profile loading
//!
//! [`ProfileLoader`] reads the profile document and the links sub-collection
//! for one identifier concurrently and joins the two results. It performs a
//! single attempt; there is no retry and no timeout.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::{LoadError, LoadResult};
use crate::model::{Document, Link, Profile};
use crate::store::{DocumentStore, LINKS_SUBCOLLECTION, USERS_COLLECTION};
use crate::view::ProfilePage;

/// A profile joined with its links
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub user_id: String,
    pub profile: Profile,
    /// Links in store order, disabled ones included
    pub links: Vec<Link>,
}

/// What a caller sees after a load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Found(LoadedProfile),
    /// No profile, or the load failed. The detail was logged.
    NotFound,
}

impl LoadOutcome {
    /// Convert into a renderable page, if found
    pub fn into_page(self) -> Option<ProfilePage> {
        match self {
            LoadOutcome::Found(loaded) => Some(ProfilePage::from(loaded)),
            LoadOutcome::NotFound => None,
        }
    }
}

/// Loads profiles from a [`DocumentStore`]
#[derive(Clone)]
pub struct ProfileLoader {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for ProfileLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileLoader").finish_non_exhaustive()
    }
}

impl ProfileLoader {
    /// Create a loader over a store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load a profile and its links
    ///
    /// Both reads are issued together and awaited as a join; neither result
    /// is inspected until both have settled. The identifier is passed to the
    /// store as-is.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NotFound`] when the profile document is absent, even if
    ///   the links read succeeded
    /// - [`LoadError::Store`] when either read failed
    /// - [`LoadError::InvalidProfile`] when the profile has no usable name
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&self, user_id: &str) -> LoadResult<LoadedProfile> {
        let (profile_doc, link_docs) = tokio::join!(
            self.store.get_document(USERS_COLLECTION, user_id),
            self.store
                .list_children(USERS_COLLECTION, user_id, LINKS_SUBCOLLECTION),
        );

        let profile_doc =
            profile_doc?.ok_or_else(|| LoadError::NotFound(user_id.to_string()))?;
        let profile =
            Profile::from_document(&profile_doc).map_err(|reason| LoadError::InvalidProfile {
                user_id: user_id.to_string(),
                reason,
            })?;
        let links = decode_links(user_id, link_docs?);

        debug!(user_id, links = links.len(), "Loaded profile");
        Ok(LoadedProfile {
            user_id: user_id.to_string(),
            profile,
            links,
        })
    }

    /// Load a profile, collapsing every failure into [`LoadOutcome::NotFound`]
    ///
    /// Store and decode failures are logged at warn level; a plain missing
    /// profile at debug level.
    pub async fn load_outcome(&self, user_id: &str) -> LoadOutcome {
        match self.load(user_id).await {
            Ok(loaded) => LoadOutcome::Found(loaded),
            Err(LoadError::NotFound(_)) => {
                debug!(user_id, "No profile document");
                LoadOutcome::NotFound
            }
            Err(error) => {
                warn!(user_id, %error, "Failed to load profile");
                LoadOutcome::NotFound
            }
        }
    }
}

/// Decode link documents, skipping malformed ones
fn decode_links(user_id: &str, docs: Vec<Document>) -> Vec<Link> {
    docs.iter()
        .filter_map(|doc| match Link::from_document(doc) {
            Ok(link) => Some(link),
            Err(reason) => {
                warn!(user_id, link_id = %doc.id, %reason, "Skipping malformed link");
                None
            }
        })
        .collect()
}
