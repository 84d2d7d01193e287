//! Route table and resolution.
//!
//! # Responsibilities
//! - Hold the ordered routes, checked once at construction
//! - Resolve a location to the view it mounts, following redirects
//! - Look routes up by name for programmatic navigation
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - First match wins, in declaration order
//! - Redirect chains are precomputed per route, so resolution never fails
//! - Exactly one wildcard, last, so every path has a match

use serde::Serialize;
use std::collections::HashSet;

use crate::routing::location::Location;
use crate::routing::matcher::{literal_key, pattern_matches, MatchOptions};
use crate::routing::route::{PathPattern, Route, RouteTarget};
use crate::views::ViewKind;

/// Longest redirect chain accepted before a table is considered looping.
pub const MAX_REDIRECTS: usize = 5;

/// A table invariant violated at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("route table is empty")]
    Empty,
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),
    #[error("route path '{0}' must start with '/'")]
    InvalidPath(String),
    #[error("route table has no catch-all '*' route")]
    MissingWildcard,
    #[error("route table has more than one catch-all '*' route")]
    MultipleWildcards,
    #[error("catch-all route at position {position} shadows later routes; it must be last")]
    WildcardNotLast { position: usize },
    #[error("catch-all route must redirect, not mount a view")]
    WildcardNotRedirect,
    #[error("redirect from '{from}' to '{to}' must target an absolute path")]
    InvalidRedirect { from: String, to: String },
    #[error("redirect chain starting at '{from}' does not reach a view within {MAX_REDIRECTS} hops")]
    RedirectLoop { from: String },
}

/// Outcome of resolving a location against the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Name of the route whose view is mounted.
    pub route: Option<String>,
    pub view: ViewKind,
    /// Where navigation ended up, after redirects.
    pub location: Location,
    /// Location originally asked for, when a redirect happened.
    pub redirected_from: Option<Location>,
}

impl Resolution {
    pub fn is_redirect(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Where a matched route ultimately leads.
#[derive(Debug, Clone)]
struct Terminal {
    /// Index of the route that mounts the view.
    view_route: usize,
    view: ViewKind,
    /// Final redirect target, or `None` if the route mounts directly.
    redirect_target: Option<Location>,
}

/// Immutable, validated route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    terminals: Vec<Terminal>,
    options: MatchOptions,
}

impl RouteTable {
    /// Build a table, checking every invariant.
    pub fn new(routes: Vec<Route>, options: MatchOptions) -> Result<Self, TableError> {
        check_shape(&routes, &options)?;
        let terminals = routes
            .iter()
            .enumerate()
            .map(|(index, _)| follow_redirects(&routes, index, &options))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(routes = routes.len(), "Route table compiled");

        Ok(Self {
            routes,
            terminals,
            options,
        })
    }

    /// The application's route table.
    pub fn default_table() -> Self {
        Self::with_options(MatchOptions::default())
    }

    /// The application's route table with custom matching switches.
    pub fn with_options(options: MatchOptions) -> Self {
        Self::new(default_routes(), options).expect("built-in route table is valid")
    }

    /// Routes in evaluation order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn route_by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name() == Some(name))
    }

    /// Literal path of a named route.
    pub fn path_for(&self, name: &str) -> Option<&str> {
        match &self.route_by_name(name)?.path {
            PathPattern::Exact(path) => Some(path),
            PathPattern::Wildcard => None,
        }
    }

    /// Resolve a bare path.
    pub fn resolve_path(&self, path: &str) -> Resolution {
        self.resolve(&Location::new(path))
    }

    /// Resolve a location to the view it mounts.
    pub fn resolve(&self, location: &Location) -> Resolution {
        // A validated table ends with the wildcard, which matches everything.
        let matched = first_match(&self.routes, &location.path, &self.options)
            .unwrap_or(self.routes.len() - 1);
        let terminal = &self.terminals[matched];
        let view_route = &self.routes[terminal.view_route];
        let view = terminal.view;

        match &terminal.redirect_target {
            None => Resolution {
                route: view_route.name.clone(),
                view,
                location: location.clone(),
                redirected_from: None,
            },
            Some(target) => Resolution {
                route: view_route.name.clone(),
                view,
                location: location.redirected_to(target),
                redirected_from: Some(location.clone()),
            },
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::default_table()
    }
}

impl Serialize for RouteTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.routes.serialize(serializer)
    }
}

/// Index of the first route whose pattern matches `path`.
pub fn first_match(routes: &[Route], path: &str, options: &MatchOptions) -> Option<usize> {
    routes
        .iter()
        .position(|route| pattern_matches(&route.path, path, options))
}

fn default_routes() -> Vec<Route> {
    vec![
        Route::view("config", "/config", ViewKind::Config),
        Route::view("import", "/import", ViewKind::Import),
        Route::view("preview", "/preview", ViewKind::Preview),
        Route::view("delete", "/delete", ViewKind::Delete),
        Route::view("export", "/export", ViewKind::Export),
        Route::view("mapping", "/mapping", ViewKind::Mapping),
        Route::view("home", "/", ViewKind::Home),
        Route::fallback("/"),
    ]
}

fn check_shape(routes: &[Route], options: &MatchOptions) -> Result<(), TableError> {
    if routes.is_empty() {
        return Err(TableError::Empty);
    }

    let mut names = HashSet::new();
    let mut paths = HashSet::new();
    let mut wildcards = Vec::new();

    for (position, route) in routes.iter().enumerate() {
        if let Some(name) = route.name() {
            if !names.insert(name) {
                return Err(TableError::DuplicateName(name.to_string()));
            }
        }
        match &route.path {
            PathPattern::Exact(path) => {
                if !path.starts_with('/') {
                    return Err(TableError::InvalidPath(path.clone()));
                }
                if !paths.insert(literal_key(path, options)) {
                    return Err(TableError::DuplicatePath(path.clone()));
                }
            }
            PathPattern::Wildcard => wildcards.push(position),
        }
    }

    match wildcards.as_slice() {
        [] => Err(TableError::MissingWildcard),
        [position] if *position != routes.len() - 1 => {
            Err(TableError::WildcardNotLast { position: *position })
        }
        [position] => match routes[*position].target {
            RouteTarget::Redirect(_) => Ok(()),
            RouteTarget::View(_) => Err(TableError::WildcardNotRedirect),
        },
        _ => Err(TableError::MultipleWildcards),
    }
}

fn follow_redirects(
    routes: &[Route],
    start: usize,
    options: &MatchOptions,
) -> Result<Terminal, TableError> {
    let mut current = start;
    let mut redirect_target = None;

    for _ in 0..=MAX_REDIRECTS {
        let to = match &routes[current].target {
            RouteTarget::View(view) => {
                return Ok(Terminal {
                    view_route: current,
                    view: *view,
                    redirect_target,
                })
            }
            RouteTarget::Redirect(to) => to,
        };

        if !to.starts_with('/') {
            return Err(TableError::InvalidRedirect {
                from: routes[current].path.to_string(),
                to: to.clone(),
            });
        }
        let target = Location::from_target(to);
        current = first_match(routes, &target.path, options).ok_or_else(|| {
            TableError::RedirectLoop {
                from: routes[start].path.to_string(),
            }
        })?;
        redirect_target = Some(target);
    }

    Err(TableError::RedirectLoop {
        from: routes[start].path.to_string(),
    })
}
