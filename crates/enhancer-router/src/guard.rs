//! Authentication guard

use crate::route::ResolvedRoute;

/// Anything that can answer "is the user logged in?".
pub trait AuthState {
    fn is_authenticated(&self) -> bool;
}

impl AuthState for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
}

/// The only rule: protected routes need an authenticated user.
pub fn check(route: &ResolvedRoute, auth: &dyn AuthState) -> GuardDecision {
    if route.requires_auth && !auth.is_authenticated() {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Proceed
    }
}
