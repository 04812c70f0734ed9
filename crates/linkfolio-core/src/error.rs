//! Error types for linkfolio-core
//!
//! Store failures, load failures and artifact delivery failures are kept apart
//! so callers can log the detail while showing a single "not found" state.

use thiserror::Error;

/// Errors raised by a [`DocumentStore`](crate::store::DocumentStore) backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or connection failure talking to the store
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with an unexpected status
    #[error("Unexpected status {status} from {path}")]
    Status {
        /// HTTP-style status code
        status: u16,
        /// Request path (never includes credentials)
        path: String,
    },

    /// A response or fixture could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O error while reading local data
    #[error("I/O error: {0}")]
    Io(String),

    /// The store refused to serve reads
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

impl StoreError {
    /// Create a new Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a new Unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors that can occur while loading a profile page
#[derive(Debug, Error)]
pub enum LoadError {
    /// No profile document exists for the identifier
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// Either store read failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The profile document exists but cannot be rendered
    #[error("Invalid profile document for {user_id}: {reason}")]
    InvalidProfile {
        /// Identifier that was requested
        user_id: String,
        /// What was wrong with the document
        reason: String,
    },
}

impl LoadError {
    /// Whether this is the plain "no such profile" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

/// Errors raised while handing an artifact to the user
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Filesystem failure in a sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink refused the artifact
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Result type alias for load operations
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "fixture missing");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let store_err: StoreError = json_err.into();
        assert!(matches!(store_err, StoreError::Decode(_)));
    }

    #[test]
    fn test_status_error_message() {
        let err = StoreError::Status {
            status: 503,
            path: "/documents/users/alice".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 503 from /documents/users/alice"
        );
    }

    #[test]
    fn test_load_error_from_store() {
        let err: LoadError = StoreError::transport("connection reset").into();
        assert!(matches!(err, LoadError::Store(StoreError::Transport(_))));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        assert!(LoadError::NotFound("alice".to_string()).is_not_found());
    }
}
