//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("API error: {0}")]
    Api(#[from] enhancer_api::ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] enhancer_storage::StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Login response did not contain a token")]
    MissingToken,
}

impl SessionError {
    /// HTTP status when the failure came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Api(err) => err.status(),
            _ => None,
        }
    }
}
