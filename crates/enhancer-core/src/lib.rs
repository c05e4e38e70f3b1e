//! PDF Enhancer Core
//!
//! Central coordination layer for the report client.
//! Storage, session, router and API client are wired together in `Client`;
//! front ends hold one `Client` and never touch the pieces directly.

mod client;
mod config;
mod error;

pub use client::Client;
pub use config::{
    Config, ENV_API_BASE_URL, ENV_DATA_DIR, ENV_DOWNLOAD_DIR, ENV_REQUEST_TIMEOUT_SECS,
};
pub use error::CoreError;

// Re-export core components
pub use enhancer_api::{
    ApiClient, ApiError, ApiResponse, LoginResponse, PdfDownload, RegisterResponse, Report,
    ReportDetail, SummaryResponse, User,
};
pub use enhancer_router::{
    routes, Navigation, NavigationError, NavigationOutcome, NavigationTarget, ResolvedRoute,
    Router,
};
pub use enhancer_session::{Session, SessionError, UserStore};
pub use enhancer_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
