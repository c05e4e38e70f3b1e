//! Command handlers
//!
//! Every handler returns a `CommandResult`; `main` prints it as JSON.

pub mod auth;
pub mod navigation;
pub mod reports;

use serde::Serialize;
use serde_json::Value;

use crate::cli::Command;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> CommandResult<T> {
    pub fn into_json(self) -> CommandResult<Value> {
        match self.data.map(serde_json::to_value).transpose() {
            Ok(data) => CommandResult {
                success: self.success,
                data,
                error: self.error,
            },
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for CommandResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}

pub async fn dispatch(state: &AppState, command: Command) -> CommandResult<Value> {
    match command {
        Command::Login(args) => auth::login(state, &args.email, &args.password)
            .await
            .into_json(),
        Command::Register(args) => auth::register(state, &args.name, &args.email, &args.password)
            .await
            .into_json(),
        Command::Logout => auth::logout(state).into_json(),
        Command::Whoami => auth::whoami(state).into_json(),
        Command::Reports => reports::list(state).await.into_json(),
        Command::Report(args) => reports::detail(state, &args.id).await.into_json(),
        Command::Summary(args) => reports::summary(state, &args.id).await.into_json(),
        Command::PdfUrl(args) => reports::pdf_url(state, &args.id).into_json(),
        Command::Download(args) => reports::download(state, &args.id, args.dir.as_deref())
            .await
            .into_json(),
        Command::Upload(args) => reports::upload(state, &args.path).await.into_json(),
        Command::Open(args) => navigation::open(state, &args.path).into_json(),
    }
}
