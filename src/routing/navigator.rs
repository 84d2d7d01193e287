//! Navigation state over a route table.
//!
//! The active route is the only state. It changes on navigation events:
//! a path, a URL, a route name, or a step back through history.

use std::sync::Arc;

use crate::routing::location::{Location, LocationError, RouterMode};
use crate::routing::table::{Resolution, RouteTable};

/// Default number of history entries kept.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Errors raised by programmatic navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no route named '{0}'")]
    UnknownRouteName(String),
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Tracks the active route and navigation history for one client.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: Arc<RouteTable>,
    current: Resolution,
    /// Most recent first.
    history: Vec<Resolution>,
    max_history: usize,
}

impl Navigator {
    /// Start at `/`.
    pub fn new(table: Arc<RouteTable>) -> Self {
        let current = table.resolve_path("/");
        Self {
            table,
            current,
            history: Vec::new(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self.history.truncate(max_history);
        self
    }

    /// Navigate to a path reference. A `?query` is kept; a `#fragment` is dropped.
    pub fn navigate(&mut self, path: &str) -> &Resolution {
        self.navigate_to(&Location::from_target(path))
    }

    /// Navigate to an absolute URL or path reference.
    pub fn navigate_url(&mut self, url: &str, mode: RouterMode) -> Result<&Resolution, NavigationError> {
        let location = Location::parse(url, mode)?;
        Ok(self.navigate_to(&location))
    }

    /// Navigate by route name instead of by path.
    pub fn navigate_named(&mut self, name: &str) -> Result<&Resolution, NavigationError> {
        let path = self
            .table
            .path_for(name)
            .ok_or_else(|| NavigationError::UnknownRouteName(name.to_string()))?
            .to_string();
        Ok(self.navigate_to(&Location::new(path)))
    }

    /// Resolve a location and make it the active route.
    ///
    /// Landing on the route that is already active leaves history untouched.
    pub fn navigate_to(&mut self, location: &Location) -> &Resolution {
        let next = self.table.resolve(location);

        if next.location == self.current.location && next.view == self.current.view {
            tracing::debug!(path = %next.location, "Navigation to current route ignored");
            return &self.current;
        }

        tracing::debug!(
            from = %self.current.location,
            to = %next.location,
            view = %next.view,
            redirected = next.is_redirect(),
            "Navigated"
        );

        let previous = std::mem::replace(&mut self.current, next);
        if self.max_history > 0 {
            self.history.insert(0, previous);
            self.history.truncate(self.max_history);
        }
        &self.current
    }

    /// Return to the previous route. Returns false when history is empty.
    pub fn go_back(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        self.current = self.history.remove(0);
        true
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn current(&self) -> &Resolution {
        &self.current
    }

    pub fn history(&self) -> &[Resolution] {
        &self.history
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ViewKind;

    fn navigator() -> Navigator {
        Navigator::new(Arc::new(RouteTable::default_table()))
    }

    #[test]
    fn test_starts_at_home() {
        let nav = navigator();
        assert_eq!(nav.current().view, ViewKind::Home);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_navigate_scenarios() {
        let mut nav = navigator();

        assert_eq!(nav.navigate("/config").view, ViewKind::Config);

        let res = nav.navigate("/nonexistent");
        assert_eq!(res.view, ViewKind::Home);
        assert_eq!(res.location.path, "/");
        assert!(res.is_redirect());

        assert_eq!(nav.navigate("/export").view, ViewKind::Export);
        assert_eq!(nav.history().len(), 3);
    }

    #[test]
    fn test_duplicate_navigation_is_noop() {
        let mut nav = navigator();
        nav.navigate("/import");
        nav.navigate("/import");
        assert_eq!(nav.history().len(), 1);

        // Home redirect lands on the already active `/`.
        let mut nav = navigator();
        nav.navigate("/missing");
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_go_back() {
        let mut nav = navigator();
        nav.navigate("/config");
        nav.navigate("/preview");

        assert!(nav.go_back());
        assert_eq!(nav.current().view, ViewKind::Config);
        assert!(nav.go_back());
        assert_eq!(nav.current().view, ViewKind::Home);
        assert!(!nav.go_back());
    }

    #[test]
    fn test_history_cap() {
        let mut nav = navigator().with_max_history(2);
        for path in ["/config", "/import", "/preview", "/delete"] {
            nav.navigate(path);
        }
        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.history()[0].view, ViewKind::Preview);
        assert_eq!(nav.history()[1].view, ViewKind::Import);
    }

    #[test]
    fn test_navigate_named() {
        let mut nav = navigator();
        let res = nav.navigate_named("mapping").unwrap();
        assert_eq!(res.view, ViewKind::Mapping);
        assert_eq!(res.location.path, "/mapping");

        let err = nav.navigate_named("settings").unwrap_err();
        assert!(matches!(err, NavigationError::UnknownRouteName(name) if name == "settings"));
    }

    #[test]
    fn test_navigate_url_hash_mode() {
        let mut nav = navigator();
        let res = nav.navigate_url("https://app.example.com/#/delete", RouterMode::Hash).unwrap();
        assert_eq!(res.view, ViewKind::Delete);

        let res = nav.navigate_url("https://app.example.com/#/nowhere?x=1", RouterMode::Hash).unwrap();
        assert_eq!(res.view, ViewKind::Home);
        assert_eq!(res.location.to_string(), "/?x=1");
    }

    #[test]
    fn test_fragment_does_not_affect_matching() {
        let mut nav = navigator();
        let res = nav.navigate("/config#top");
        assert_eq!(res.view, ViewKind::Config);
        assert!(!res.is_redirect());

        let res = nav.navigate("/export?id=3#summary");
        assert_eq!(res.view, ViewKind::Export);
        assert_eq!(res.location.to_string(), "/export?id=3");
    }

    #[test]
    fn test_query_is_kept() {
        let mut nav = navigator();
        let res = nav.navigate("/preview?file=a.csv");
        assert_eq!(res.view, ViewKind::Preview);
        assert_eq!(res.location.query.as_deref(), Some("file=a.csv"));
    }
}
