//! PDF Enhancer API Client
//!
//! Thin wrappers over the report service's HTTP API:
//! - `UserApi`: login and registration
//! - `ReportApi`: list, detail, summary generation, PDF URL, upload
//!
//! Clones of an `ApiClient` share one Authorization header, so setting the
//! bearer token once affects every wrapper built from it.

mod client;
mod download;
mod error;
mod models;
mod reports;
mod users;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use download::PdfDownload;
pub use error::ApiError;
pub use models::{
    ApiResponse, AuthPayload, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    Report, ReportDetail, ReportUpload, SummaryResponse, User,
};
pub use reports::ReportApi;
pub use users::UserApi;

pub type Result<T> = std::result::Result<T, ApiError>;
