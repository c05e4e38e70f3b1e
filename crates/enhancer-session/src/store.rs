//! User store
//!
//! Owns the in-memory session and keeps it in step with local storage and
//! the API client's Authorization header.

use parking_lot::RwLock;
use std::sync::Arc;

use enhancer_api::{ApiClient, ApiResponse, LoginResponse, RegisterResponse, User};
use enhancer_router::AuthState;
use enhancer_storage::Database;

use crate::error::SessionError;
use crate::session::Session;
use crate::Result;

pub struct UserStore {
    session: Arc<RwLock<Option<Session>>>,
    db: Database,
    api: ApiClient,
}

impl UserStore {
    /// Restore any persisted session. A restored token is installed as the
    /// client's bearer token so requests made before any login are
    /// authenticated.
    pub fn new(db: Database, api: ApiClient) -> Result<Self> {
        let session = Session::load(&db)?;

        match &session {
            Some(session) => {
                api.set_bearer_token(&session.token);
                tracing::info!(user_id = %session.user.user_id, "Restored session");
            }
            None => api.clear_bearer_token(),
        }

        Ok(Self {
            session: Arc::new(RwLock::new(session)),
            db,
            api,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_some()
    }

    /// Profile of the logged-in user; the empty user when logged out.
    pub fn user_info(&self) -> User {
        self.session
            .read()
            .as_ref()
            .map(|s| s.user.clone())
            .unwrap_or_default()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Log in and, on success, store token and user in memory and in local
    /// storage and set the Authorization header. Failures leave the current
    /// state untouched and return the underlying error.
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<LoginResponse>> {
        let response = self.api.users().login(email, password).await?;

        let payload = response
            .data
            .as_ref()
            .filter(|payload| !payload.token.is_empty())
            .ok_or(SessionError::MissingToken)?;

        let session = Session::new(payload.token.clone(), payload.user.clone());
        session.persist(&self.db)?;
        self.api.set_bearer_token(&session.token);

        tracing::info!(user_id = %session.user.user_id, "Logged in");

        *self.session.write() = Some(session);

        Ok(response)
    }

    /// Register a new account. The session is not changed; callers log in
    /// afterwards.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<RegisterResponse>> {
        let response = self.api.users().register(name, email, password).await?;
        tracing::info!(email = %email, "Registered account");
        Ok(response)
    }

    /// Clear local storage, then the Authorization header and the in-memory
    /// session. A storage failure leaves the user logged in.
    pub fn logout(&self) -> Result<()> {
        Session::clear(&self.db)?;
        self.api.clear_bearer_token();
        *self.session.write() = None;

        tracing::info!("Logged out");

        Ok(())
    }
}

impl AuthState for UserStore {
    fn is_authenticated(&self) -> bool {
        self.is_logged_in()
    }
}

impl Clone for UserStore {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            db: self.db.clone(),
            api: self.api.clone(),
        }
    }
}
