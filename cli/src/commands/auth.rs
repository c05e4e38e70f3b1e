//! Login, registration and session commands
use serde::Serialize;

use enhancer_core::User;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub logged_in: bool,
    pub user: User,
}

impl SessionInfo {
    fn of(state: &AppState) -> Self {
        let client = state.client();
        Self {
            logged_in: client.is_logged_in(),
            user: client.user_info(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Registered {
    pub message: String,
    pub user: User,
}

pub async fn login(state: &AppState, email: &str, password: &str) -> CommandResult<SessionInfo> {
    match state.client().login(email, password).await {
        Ok(_) => CommandResult::ok(SessionInfo::of(state)),
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            CommandResult::err(e.to_string())
        }
    }
}

pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> CommandResult<Registered> {
    match state.client().register(name, email, password).await {
        Ok(response) => CommandResult::ok(Registered {
            message: response.message,
            user: response.data.map(|payload| payload.user).unwrap_or_default(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn logout(state: &AppState) -> CommandResult<SessionInfo> {
    match state.with_client(|client| client.logout()) {
        Ok(()) => CommandResult::ok(SessionInfo::of(state)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn whoami(state: &AppState) -> CommandResult<SessionInfo> {
    CommandResult::ok(SessionInfo::of(state))
}
