//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] enhancer_storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] enhancer_api::ApiError),

    #[error("Session error: {0}")]
    Session(#[from] enhancer_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] enhancer_router::NavigationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// HTTP status when the failure came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Api(err) => err.status(),
            CoreError::Session(err) => err.status(),
            _ => None,
        }
    }
}
