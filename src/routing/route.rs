//! Route definitions.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::views::ViewKind;

/// Path pattern a route is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Literal path, e.g. `/config`.
    Exact(String),
    /// Catch-all `*`.
    Wildcard,
}

impl PathPattern {
    /// Parse the textual form used in route declarations.
    pub fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            PathPattern::Wildcard
        } else {
            PathPattern::Exact(pattern.to_string())
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, PathPattern::Wildcard)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Exact(path) => f.write_str(path),
            PathPattern::Wildcard => f.write_str("*"),
        }
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What happens when a route matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// Mount a view.
    View(ViewKind),
    /// Navigate to another path instead of mounting anything.
    Redirect(String),
}

/// A single entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Symbolic name for named navigation. The catch-all is usually unnamed.
    pub name: Option<String>,
    pub path: PathPattern,
    pub target: RouteTarget,
}

impl Route {
    /// Named route mounting a view at a literal path.
    pub fn view(name: impl Into<String>, path: impl Into<String>, view: ViewKind) -> Self {
        Self {
            name: Some(name.into()),
            path: PathPattern::Exact(path.into()),
            target: RouteTarget::View(view),
        }
    }

    /// Unnamed catch-all redirecting to `to`.
    pub fn fallback(to: impl Into<String>) -> Self {
        Self {
            name: None,
            path: PathPattern::Wildcard,
            target: RouteTarget::Redirect(to.into()),
        }
    }

    /// Named redirect from a literal path.
    pub fn redirect(name: impl Into<String>, path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: PathPattern::Exact(path.into()),
            target: RouteTarget::Redirect(to.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The view this route mounts directly, if any.
    pub fn mounted_view(&self) -> Option<ViewKind> {
        match self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_parse() {
        assert_eq!(PathPattern::parse("*"), PathPattern::Wildcard);
        assert_eq!(PathPattern::parse("/config"), PathPattern::Exact("/config".into()));
        assert_eq!(PathPattern::parse("/*").to_string(), "/*");
    }

    #[test]
    fn test_fallback_is_unnamed_redirect() {
        let route = Route::fallback("/");
        assert!(route.name().is_none());
        assert!(route.path.is_wildcard());
        assert_eq!(route.mounted_view(), None);
    }

    #[test]
    fn test_route_serializes_flat_pattern() {
        let route = Route::view("config", "/config", ViewKind::Config);
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["path"], "/config");
        assert_eq!(json["target"]["view"], "Config");
    }
}
