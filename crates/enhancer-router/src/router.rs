//! Router: route resolution, guard and history

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::NavigationError;
use crate::guard::{self, AuthState, GuardDecision};
use crate::history::NavigationHistory;
use crate::route::{Location, Params, ResolvedRoute, RouteRecord};
use crate::routes;
use crate::Result;

const MAX_REDIRECTS: usize = 10;

/// Where to navigate: a literal path or a named route with parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Path(String),
    Named { name: String, params: Params },
}

impl NavigationTarget {
    pub fn named(name: impl Into<String>) -> Self {
        NavigationTarget::Named {
            name: name.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            NavigationTarget::Named { name, mut params } => {
                params.insert(key.into(), value.into());
                NavigationTarget::Named { name, params }
            }
            path => path,
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        NavigationTarget::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        NavigationTarget::Path(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Proceeded,
    /// The guard sent the user to the login route instead of `requested`.
    RedirectedToLogin { requested: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub route: ResolvedRoute,
    pub outcome: NavigationOutcome,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        matches!(self.outcome, NavigationOutcome::RedirectedToLogin { .. })
    }
}

pub struct Router {
    routes: Vec<RouteRecord>,
    login_route: String,
    current: Option<ResolvedRoute>,
    history: NavigationHistory,
}

impl Router {
    /// Build a router over `routes`; `login_route` names the guard's target.
    pub fn new(routes: Vec<RouteRecord>, login_route: impl Into<String>) -> Result<Self> {
        let login_route = login_route.into();

        let mut names = HashSet::new();
        for route in &routes {
            route.validate()?;
            if let Some(name) = &route.name {
                if !names.insert(name.clone()) {
                    return Err(NavigationError::InvalidRoute(format!(
                        "duplicate route name: {}",
                        name
                    )));
                }
            }
        }

        let login = routes
            .iter()
            .find(|r| r.name.as_deref() == Some(login_route.as_str()))
            .ok_or_else(|| NavigationError::UnknownRouteName(login_route.clone()))?;
        if login.requires_auth {
            return Err(NavigationError::InvalidRoute(format!(
                "login route {} cannot require authentication",
                login_route
            )));
        }

        Ok(Self {
            routes,
            login_route,
            current: None,
            history: NavigationHistory::new(),
        })
    }

    /// Router over the application's route table.
    pub fn with_default_routes() -> Self {
        Self {
            routes: routes::default_routes(),
            login_route: routes::LOGIN.to_string(),
            current: None,
            history: NavigationHistory::new(),
        }
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Concrete path for a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String> {
        self.find_named(name)?.build_path(params)
    }

    /// Resolve a target against the table, following static redirects.
    /// The guard is not consulted.
    pub fn resolve(&self, target: &NavigationTarget) -> Result<ResolvedRoute> {
        let requested = self.target_path(target)?;
        let mut location = requested.clone();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let parsed = Location::parse(&location);
            let segments = parsed.segments();

            let (record, params) = self
                .routes
                .iter()
                .find_map(|r| r.matches(&segments).map(|p| (r, p)))
                .ok_or_else(|| NavigationError::NotFound(parsed.normalized_path()))?;

            if let Some(to) = &record.redirect {
                tracing::debug!(from = %location, to = %to, "Following route redirect");
                redirected_from.get_or_insert_with(|| Location::parse(&requested).normalized_path());
                // Carry the query across the redirect
                location = match parsed.query {
                    Some(query) => format!("{}?{}", to, query),
                    None => to.clone(),
                };
                continue;
            }

            let path = parsed.normalized_path();
            let full_path = match parsed.query {
                Some(query) => format!("{}?{}", path, query),
                None => path.clone(),
            };

            return Ok(ResolvedRoute {
                path,
                full_path,
                name: record.name.clone(),
                params,
                query: parsed.query_map(),
                requires_auth: record.requires_auth,
                redirected_from,
            });
        }

        Err(NavigationError::RedirectLoop(requested))
    }

    /// Navigate and record the previous route in history.
    pub fn push(
        &mut self,
        target: impl Into<NavigationTarget>,
        auth: &dyn AuthState,
    ) -> Result<Navigation> {
        let navigation = self.navigate(&target.into(), auth)?;
        if let Some(previous) = self.current.replace(navigation.route.clone()) {
            if previous.full_path != navigation.route.full_path {
                self.history.push(previous);
            }
        }
        Ok(navigation)
    }

    /// Navigate without adding a history entry.
    pub fn replace(
        &mut self,
        target: impl Into<NavigationTarget>,
        auth: &dyn AuthState,
    ) -> Result<Navigation> {
        let navigation = self.navigate(&target.into(), auth)?;
        self.current = Some(navigation.route.clone());
        Ok(navigation)
    }

    /// Return to the previous route, re-running the guard. `None` when the
    /// history is empty. The entry is only consumed when navigation
    /// succeeds.
    pub fn back(&mut self, auth: &dyn AuthState) -> Result<Option<Navigation>> {
        let Some(previous) = self.history.last() else {
            return Ok(None);
        };

        let target = NavigationTarget::Path(previous.full_path.clone());
        let navigation = self.navigate(&target, auth)?;
        self.history.pop();
        self.current = Some(navigation.route.clone());
        Ok(Some(navigation))
    }

    /// Forget the current route and history, e.g. after logout.
    pub fn reset(&mut self) {
        self.current = None;
        self.history.clear();
    }

    fn navigate(&self, target: &NavigationTarget, auth: &dyn AuthState) -> Result<Navigation> {
        let route = self.resolve(target)?;

        match guard::check(&route, auth) {
            GuardDecision::Proceed => {
                tracing::debug!(path = %route.full_path, "Navigation allowed");
                Ok(Navigation {
                    route,
                    outcome: NavigationOutcome::Proceeded,
                })
            }
            GuardDecision::RedirectToLogin => {
                tracing::info!(
                    requested = %route.full_path,
                    login = %self.login_route,
                    "Unauthenticated navigation redirected"
                );
                let login = self.resolve(&NavigationTarget::named(self.login_route.clone()))?;
                Ok(Navigation {
                    route: login,
                    outcome: NavigationOutcome::RedirectedToLogin {
                        requested: route.full_path,
                    },
                })
            }
        }
    }

    fn target_path(&self, target: &NavigationTarget) -> Result<String> {
        match target {
            NavigationTarget::Path(path) => Ok(path.clone()),
            NavigationTarget::Named { name, params } => self.href(name, params),
        }
    }

    fn find_named(&self, name: &str) -> Result<&RouteRecord> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .ok_or_else(|| NavigationError::UnknownRouteName(name.to_string()))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_default_routes()
    }
}
