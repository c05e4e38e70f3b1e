//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("Unknown route name: {0}")]
    UnknownRouteName(String),

    #[error("Route {route} is missing parameter :{param}")]
    MissingParam { route: String, param: String },

    #[error("Redirect loop while resolving {0}")]
    RedirectLoop(String),

    #[error("Invalid route definition: {0}")]
    InvalidRoute(String),
}
