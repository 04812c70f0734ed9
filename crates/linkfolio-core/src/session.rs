//! View state for a page whose identifier can change
//!
//! Every navigation takes a new generation number. A load only publishes its
//! result if its generation is still the latest when it resolves, so a slow
//! load for an identifier the viewer already left can never overwrite the
//! current state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::loader::{LoadOutcome, ProfileLoader};
use crate::view::ProfilePage;

/// What the page currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        user_id: String,
    },
    Ready(ProfilePage),
    /// Terminal state for a missing profile or a failed load
    NotFound {
        user_id: String,
    },
}

impl ViewState {
    /// The loaded page, if any
    pub fn page(&self) -> Option<&ProfilePage> {
        match self {
            ViewState::Ready(page) => Some(page),
            _ => None,
        }
    }
}

/// Whether a navigation's result became visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationResult {
    Applied,
    /// A later navigation or close happened first; the result was dropped
    Superseded,
}

/// Owns the generation counter and the published [`ViewState`]
#[derive(Debug)]
pub struct ProfileSession {
    loader: ProfileLoader,
    generation: AtomicU64,
    state: watch::Sender<ViewState>,
}

impl ProfileSession {
    pub fn new(loader: ProfileLoader) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            loader,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Latest generation handed out
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Show the page for `user_id`
    ///
    /// Publishes `Loading` immediately, then `Ready` or `NotFound` once the
    /// load settles, unless another navigation or [`close`](Self::close)
    /// happened in between.
    pub async fn navigate(&self, user_id: &str) -> NavigationResult {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(
            generation,
            ViewState::Loading {
                user_id: user_id.to_string(),
            },
        );

        let next = match self.loader.load_outcome(user_id).await {
            LoadOutcome::Found(loaded) => ViewState::Ready(ProfilePage::from(loaded)),
            LoadOutcome::NotFound => ViewState::NotFound {
                user_id: user_id.to_string(),
            },
        };

        if self.publish(generation, next) {
            NavigationResult::Applied
        } else {
            debug!(user_id, generation, "Discarding superseded load");
            NavigationResult::Superseded
        }
    }

    /// Tear the view down, invalidating any in-flight load
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(ViewState::Idle);
    }

    /// Replace the state if `generation` is still current.
    ///
    /// The check runs under the channel's write lock, so it cannot interleave
    /// with another publish.
    fn publish(&self, generation: u64, next: ViewState) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = next;
            applied = true;
            true
        });
        applied
    }
}
