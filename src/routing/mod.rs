//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event (URL, path or route name)
//!     → location.rs (split path/query, hash or history mode)
//!     → table.rs (ordered lookup, redirects followed)
//!     → matcher.rs (evaluate path patterns)
//!     → Return: Resolution (view, final location, redirect origin)
//!
//! Route Compilation (at startup):
//!     Route[]
//!     → Check invariants (unique names, one trailing wildcard)
//!     → Precompute redirect chains
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (literal comparison only)
//! - Deterministic: same input always resolves to the same view
//! - First match wins (declaration order)
//! - No not-found state: the wildcard always resolves somewhere

pub mod location;
pub mod matcher;
pub mod navigator;
pub mod route;
pub mod table;

pub use location::{Location, LocationError, RouterMode};
pub use matcher::MatchOptions;
pub use navigator::{NavigationError, Navigator};
pub use route::{PathPattern, Route, RouteTarget};
pub use table::{Resolution, RouteTable, TableError};
