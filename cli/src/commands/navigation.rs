//! Navigation commands
use enhancer_core::Navigation;

use super::CommandResult;
use crate::state::AppState;

pub fn open(state: &AppState, path: &str) -> CommandResult<Navigation> {
    match state.with_client(|client| client.navigate(path)) {
        Ok(navigation) => {
            tracing::debug!(
                path = %navigation.route.full_path,
                redirected = navigation.was_redirected(),
                "Resolved navigation"
            );
            CommandResult::ok(navigation)
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}
