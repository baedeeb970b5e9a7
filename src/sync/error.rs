//! Sync error types.

use crate::DbError;
use tracing::error;

/// Error that can occur while talking to the sync API.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SyncError {
    /// Credentials are missing or were rejected even after a token refresh.
    #[display("Not authorized, log in again")]
    Unauthorized,

    /// The request never got a response.
    #[display("Network error: {}", _0)]
    Network(String),

    /// The server answered with a non-success status.
    #[display("Server error {}: {}", status, message)]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[display("Invalid response: {}", _0)]
    InvalidResponse(String),

    /// Reading or updating local match storage failed.
    #[display("Storage error: {}", _0)]
    Storage(String),

    /// Reading or writing stored credentials failed.
    #[display("Credential store error: {}", _0)]
    Credentials(String),
}

impl std::error::Error for SyncError {}

impl SyncError {
    /// Whether the user has to log in before syncing can succeed.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        error!(error = %err, "HTTP request failed");
        Self::Network(err.to_string())
    }
}

impl From<DbError> for SyncError {
    fn from(err: DbError) -> Self {
        Self::Storage(err.to_string())
    }
}
