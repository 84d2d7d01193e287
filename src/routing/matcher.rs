//! Path matching logic.
//!
//! # Responsibilities
//! - Match a literal path (exact, optionally case-insensitive)
//! - Match the catch-all wildcard
//!
//! # Design Decisions
//! - Matching is on the path only; query and fragment are stripped earlier
//! - Default options require byte-for-byte equality with the literal
//! - No regex: literal comparison keeps matching O(n) in route count

use serde::{Deserialize, Serialize};

use crate::routing::route::PathPattern;

/// Comparison switches applied to literal routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Compare letters case-sensitively.
    pub case_sensitive: bool,
    /// Treat `/config/` as distinct from `/config`.
    pub strict: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            strict: true,
        }
    }
}

/// Trait for matching a request path against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str, options: &MatchOptions) -> bool;
}

/// Matches one literal path.
#[derive(Debug, Clone, Copy)]
pub struct ExactMatcher<'a> {
    literal: &'a str,
}

impl<'a> ExactMatcher<'a> {
    pub fn new(literal: &'a str) -> Self {
        Self { literal }
    }
}

impl Matcher for ExactMatcher<'_> {
    fn matches(&self, path: &str, options: &MatchOptions) -> bool {
        let (expected, actual) = if options.strict {
            (self.literal, path)
        } else {
            (trim_trailing_slash(self.literal), trim_trailing_slash(path))
        };

        if options.case_sensitive {
            expected == actual
        } else {
            expected.eq_ignore_ascii_case(actual)
        }
    }
}

/// Matches every path.
#[derive(Debug, Clone, Copy, Default)]
pub struct WildcardMatcher;

impl Matcher for WildcardMatcher {
    fn matches(&self, _path: &str, _options: &MatchOptions) -> bool {
        true
    }
}

/// Evaluate a route pattern against a path.
pub fn pattern_matches(pattern: &PathPattern, path: &str, options: &MatchOptions) -> bool {
    match pattern {
        PathPattern::Exact(literal) => ExactMatcher::new(literal).matches(path, options),
        PathPattern::Wildcard => WildcardMatcher.matches(path, options),
    }
}

/// Key under which two literals would match the same paths.
pub fn literal_key(literal: &str, options: &MatchOptions) -> String {
    let literal = if options.strict {
        literal
    } else {
        trim_trailing_slash(literal)
    };
    if options.case_sensitive {
        literal.to_string()
    } else {
        literal.to_ascii_lowercase()
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}
