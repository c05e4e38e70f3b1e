//! Route records and path matching

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::NavigationError;
use crate::Result;

/// Captured `:param` values, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub requires_auth: bool,
    /// Target path of a static redirect; such records have no view.
    pub redirect: Option<String>,
    segments: Vec<Segment>,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = split_path(&path)
            .into_iter()
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => Segment::Param(param.to_string()),
                None => Segment::Static(segment.to_string()),
            })
            .collect();

        Self {
            path,
            name: None,
            requires_auth: false,
            redirect: None,
            segments,
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        let mut record = Self::new(path);
        record.redirect = Some(to.into());
        record
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(NavigationError::InvalidRoute(format!(
                "path must start with '/': {}",
                self.path
            )));
        }

        for segment in &self.segments {
            if let Segment::Param(name) = segment {
                if name.is_empty() {
                    return Err(NavigationError::InvalidRoute(format!(
                        "empty parameter name in {}",
                        self.path
                    )));
                }
            }
        }

        if let Some(target) = &self.redirect {
            if !target.starts_with('/') {
                return Err(NavigationError::InvalidRoute(format!(
                    "redirect target must start with '/': {}",
                    target
                )));
            }
        }

        Ok(())
    }

    /// Match already-split path segments, capturing percent-decoded
    /// parameters.
    pub(crate) fn matches(&self, segments: &[&str]) -> Option<Params> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (pattern, actual) in self.segments.iter().zip(segments) {
            match pattern {
                Segment::Static(expected) if expected == actual => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(actual)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| (*actual).to_string());
                    params.insert(name.clone(), value);
                }
            }
        }

        Some(params)
    }

    /// Fill the pattern's parameters, percent-encoded, to produce a concrete
    /// path.
    pub fn build_path(&self, params: &Params) -> Result<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(value) => path.push_str(value),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| NavigationError::MissingParam {
                            route: self.label(),
                            param: name.clone(),
                        })?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }

        Ok(path)
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.path.clone())
    }
}

/// A path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    /// Normalized path without query or fragment
    pub path: String,
    /// Path plus the original query string, if any
    pub full_path: String,
    pub name: Option<String>,
    pub params: Params,
    pub query: BTreeMap<String, String>,
    pub requires_auth: bool,
    /// Path originally requested when static redirects were followed
    pub redirected_from: Option<String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Location split into its path, query and fragment pieces.
pub(crate) struct Location<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
}

impl<'a> Location<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.trim();
        let without_fragment = raw.split('#').next().unwrap_or("");
        match without_fragment.split_once('?') {
            Some((path, query)) => Self {
                path,
                query: Some(query).filter(|q| !q.is_empty()),
            },
            None => Self {
                path: without_fragment,
                query: None,
            },
        }
    }

    pub fn segments(&self) -> Vec<&'a str> {
        split_path(self.path)
    }

    pub fn normalized_path(&self) -> String {
        let segments = self.segments();
        if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segments.join("/"))
        }
    }

    pub fn query_map(&self) -> BTreeMap<String, String> {
        self.query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_match() {
        let route = RouteRecord::new("/reports");
        assert!(route.matches(&["reports"]).is_some());
        assert!(route.matches(&["report"]).is_none());
        assert!(route.matches(&["reports", "1"]).is_none());
    }

    #[test]
    fn test_param_capture() {
        let route = RouteRecord::new("/report/:id");
        let params = route.matches(&["report", "42"]).unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(route.matches(&["report"]).is_none());
    }

    #[test]
    fn test_params_are_percent_decoded() {
        let route = RouteRecord::new("/report/:id");
        let params = route.matches(&["report", "a%20b"]).unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("a b"));

        let params = route.matches(&["report", "q1%2F2024"]).unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("q1/2024"));

        // Invalid UTF-8 after decoding is kept verbatim
        let params = route.matches(&["report", "%FF"]).unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("%FF"));
    }

    #[test]
    fn test_build_path_encodes_params() {
        let route = RouteRecord::new("/report/:id");
        let mut params = Params::new();
        params.insert("id".to_string(), "q1/2024 v2".to_string());
        let path = route.build_path(&params).unwrap();
        assert_eq!(path, "/report/q1%2F2024%20v2");

        let location = Location::parse(&path);
        assert_eq!(route.matches(&location.segments()), Some(params));
    }

    #[test]
    fn test_root_matches_empty_path() {
        let route = RouteRecord::new("/");
        assert!(route.matches(&[]).is_some());
        assert_eq!(route.build_path(&Params::new()).unwrap(), "/");
    }

    #[test]
    fn test_build_path() {
        let route = RouteRecord::new("/report/:id").named("ReportDetail");
        let mut params = Params::new();
        params.insert("id".to_string(), "7".to_string());
        assert_eq!(route.build_path(&params).unwrap(), "/report/7");

        let err = route.build_path(&Params::new()).unwrap_err();
        assert_eq!(
            err,
            NavigationError::MissingParam {
                route: "ReportDetail".to_string(),
                param: "id".to_string()
            }
        );
    }

    #[test]
    fn test_validate() {
        assert!(RouteRecord::new("reports").validate().is_err());
        assert!(RouteRecord::new("/report/:").validate().is_err());
        assert!(RouteRecord::redirect("/", "reports").validate().is_err());
        assert!(RouteRecord::redirect("/", "/reports").validate().is_ok());
    }

    #[test]
    fn test_location_parsing() {
        let location = Location::parse("/reports/?page=2&sort=new#top");
        assert_eq!(location.normalized_path(), "/reports");
        let query = location.query_map();
        assert_eq!(query.get("page").map(String::as_str), Some("2"));
        assert_eq!(query.get("sort").map(String::as_str), Some("new"));

        let location = Location::parse("//report//9");
        assert_eq!(location.segments(), vec!["report", "9"]);
        assert_eq!(Location::parse("").normalized_path(), "/");
    }
}
