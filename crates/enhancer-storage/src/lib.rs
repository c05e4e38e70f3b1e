//! PDF Enhancer Storage Layer
//!
//! SQLite-backed key/value storage that plays the role of the browser's
//! `localStorage` for the client. Values are opaque strings; callers
//! serialize structured data themselves.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
