//! PDF Enhancer Router
//!
//! Client-side route table with a single pre-navigation guard:
//! - Routes carry a `requires_auth` flag
//! - Navigating to a protected route while logged out redirects to `Login`
//! - Static redirects (`/` → `/reports`) are followed before the guard runs

mod error;
mod guard;
mod history;
mod route;
mod router;
pub mod routes;

pub use error::NavigationError;
pub use guard::{AuthState, GuardDecision};
pub use history::NavigationHistory;
pub use route::{Params, ResolvedRoute, RouteRecord};
pub use router::{Navigation, NavigationOutcome, NavigationTarget, Router};

pub type Result<T> = std::result::Result<T, NavigationError>;
