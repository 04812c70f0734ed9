//! HTTP routes
//!
//! - `GET /{user_id}`: the rendered page, or a 404 "User not found" page
//! - `GET /{user_id}/contact.vcf`: the contact card as a download

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use linkfolio_core::{ContactArtifact, ProfileLoader, ProfilePage};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::HomepageError;
use crate::render::render_profile;

/// Shared state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    loader: Arc<ProfileLoader>,
}

impl AppState {
    pub fn new(loader: ProfileLoader) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }

    async fn page(&self, user_id: &str) -> Result<ProfilePage, HomepageError> {
        self.loader
            .load_outcome(user_id)
            .await
            .into_page()
            .ok_or_else(|| HomepageError::NotFound(user_id.to_string()))
    }
}

/// Build the homepage router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{user_id}", get(profile_page))
        .route("/{user_id}/contact.vcf", get(contact_card))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn profile_page(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Html<String>, HomepageError> {
    let page = state.page(&user_id).await?;
    debug!(%user_id, rows = page.rows.len(), "Rendering page");
    Ok(Html(render_profile(&page)))
}

async fn contact_card(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, HomepageError> {
    let artifact = state.page(&user_id).await?.contact_card();
    let disposition = HeaderValue::from_str(&content_disposition(&artifact.filename))
        .map_err(|e| HomepageError::Internal(format!("Content-Disposition: {e}")))?;

    let ContactArtifact {
        mime_type, bytes, ..
    } = artifact;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(mime_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

async fn not_found() -> HomepageError {
    HomepageError::NotFound(String::new())
}

/// `attachment` disposition with an ASCII fallback name and the exact name
/// as RFC 5987 `filename*`
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}
