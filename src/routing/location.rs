//! URL to routable location.
//!
//! # Responsibilities
//! - Accept absolute URLs or path references
//! - Pick the route path from the URL path (history mode) or fragment (hash mode)
//! - Keep the query so redirects can carry it forward

use serde::{Deserialize, Serialize};
use std::fmt;
use url::{form_urlencoded, Url};

/// Where the client keeps its route in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
    /// Route lives in the URL path: `/config`.
    #[default]
    History,
    /// Route lives in the fragment: `/#/config`.
    Hash,
}

/// Errors produced while parsing a navigation target.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("URL has no routable path: {0}")]
    NotHierarchical(String),
}

/// A routable location: the path matched against the table plus its query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    /// Location with no query.
    pub fn new(path: impl Into<String>) -> Self {
        Self::from_parts(path, None)
    }

    /// Build from an already split path and query, as an HTTP request carries them.
    pub fn from_parts(path: impl Into<String>, query: Option<&str>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            path,
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    /// Parse an absolute URL or a path reference such as `/config?x=1#top`.
    pub fn parse(input: &str, mode: RouterMode) -> Result<Self, LocationError> {
        let base = Url::parse("http://localhost/")?;
        let url = base.join(input.trim())?;
        if url.cannot_be_a_base() {
            return Err(LocationError::NotHierarchical(input.to_string()));
        }

        match mode {
            RouterMode::History => Ok(Self::from_parts(url.path(), url.query())),
            RouterMode::Hash => {
                let fragment = url.fragment().unwrap_or("");
                let (path, query) = match fragment.split_once('?') {
                    Some((path, query)) => (path, Some(query)),
                    None => (fragment, None),
                };
                Ok(Self::from_parts(path, query))
            }
        }
    }

    /// Split a path reference like `/config?tab=1#top` without resolving it.
    ///
    /// The fragment is dropped; it never takes part in matching.
    pub fn from_target(target: &str) -> Self {
        let target = target.split_once('#').map_or(target, |(before, _)| before);
        match target.split_once('?') {
            Some((path, query)) => Self::from_parts(path, Some(query)),
            None => Self::from_parts(target, None),
        }
    }

    /// Where a redirect to `target` lands from this location.
    ///
    /// The target's path wins. Query parameters are merged, with the target's
    /// values replacing ours for the same key.
    pub fn redirected_to(&self, target: &Location) -> Self {
        let query = match (self.query.as_deref(), target.query.as_deref()) {
            (None, None) => None,
            (Some(ours), None) => Some(ours.to_string()),
            (None, Some(theirs)) => Some(theirs.to_string()),
            (Some(ours), Some(theirs)) => Some(merge_queries(ours, theirs)),
        };
        Self {
            path: target.path.clone(),
            query,
        }
    }
}

fn merge_queries(ours: &str, theirs: &str) -> String {
    let overridden: Vec<_> = form_urlencoded::parse(theirs.as_bytes())
        .map(|(key, _)| key)
        .collect();
    let mut merged = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(ours.as_bytes()) {
        if !overridden.contains(&key) {
            merged.append_pair(&key, &value);
        }
    }
    for (key, value) in form_urlencoded::parse(theirs.as_bytes()) {
        merged.append_pair(&key, &value);
    }
    merged.finish()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}
