//! Error types for the homepage server

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::render::render_not_found;

/// Errors raised while serving pages
#[derive(Debug, Error)]
pub enum HomepageError {
    /// The profile is missing or could not be loaded
    #[error("User not found: {0}")]
    NotFound(String),

    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),

    /// A response could not be assembled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HomepageError {
    /// Returns the HTTP status code for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Bind { .. } | Self::Serve(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HomepageError {
    fn into_response(self) -> Response {
        // Load failures were logged by the loader; the visitor only sees
        // "User not found".
        match self {
            Self::NotFound(_) => (self.status_code(), Html(render_not_found())).into_response(),
            _ => (self.status_code(), "Internal server error").into_response(),
        }
    }
}
