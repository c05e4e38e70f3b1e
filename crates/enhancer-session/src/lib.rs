//! PDF Enhancer Session Store
//!
//! Holds the logged-in user's token and profile:
//! - Restored from local storage on startup
//! - Written through to local storage on login, removed on logout
//! - Mirrored into the API client's Authorization header
//!
//! Invariant: a token is present if and only if the user is logged in.

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Session, TOKEN_KEY, USER_KEY};
pub use store::UserStore;

pub type Result<T> = std::result::Result<T, SessionError>;
