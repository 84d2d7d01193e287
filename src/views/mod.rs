//! Page-level views.
//!
//! # Responsibilities
//! - Name the closed set of views the application can mount
//! - Render the placeholder shell a client-side bundle hydrates
//!
//! # Design Decisions
//! - Views are opaque: this crate knows their names, never their contents
//! - Closed enum, so every route target is checked at compile time

use serde::{Deserialize, Serialize};
use std::fmt;

/// A page-level view mounted when a route matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    Config,
    Import,
    Preview,
    Delete,
    Export,
    Mapping,
    Home,
}

impl ViewKind {
    /// Every view, in table order.
    pub const ALL: [ViewKind; 7] = [
        ViewKind::Config,
        ViewKind::Import,
        ViewKind::Preview,
        ViewKind::Delete,
        ViewKind::Export,
        ViewKind::Mapping,
        ViewKind::Home,
    ];

    /// Component name as the client bundle registers it.
    pub fn component_name(&self) -> &'static str {
        match self {
            ViewKind::Config => "Config",
            ViewKind::Import => "Import",
            ViewKind::Preview => "Preview",
            ViewKind::Delete => "Delete",
            ViewKind::Export => "Export",
            ViewKind::Mapping => "Mapping",
            ViewKind::Home => "Home",
        }
    }

    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Config => "Configuration",
            ViewKind::Import => "Import",
            ViewKind::Preview => "Preview",
            ViewKind::Delete => "Delete",
            ViewKind::Export => "Export",
            ViewKind::Mapping => "Mapping",
            ViewKind::Home => "Home",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// Render the HTML shell for a mounted view.
///
/// `route_name` is `None` only for unnamed routes, which in a validated
/// table never mount a view directly.
pub fn render_shell(view: ViewKind, route_name: Option<&str>, path: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n",
            "<div id=\"app\" data-route=\"{route}\" data-view=\"{view}\" data-path=\"{path}\"></div>\n",
            "</body>\n",
            "</html>\n",
        ),
        title = view.title(),
        route = escape_attr(route_name.unwrap_or("")),
        view = view.component_name(),
        path = escape_attr(path),
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
