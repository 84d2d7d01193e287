//! Response construction.
//!
//! # Responsibilities
//! - Turn a resolution into an HTTP response
//! - Mounted view → 200 with the HTML shell
//! - Redirect → 307 to the final location, query preserved
//!
//! # Design Decisions
//! - Redirect chains are collapsed: the client is sent straight to the view's URL
//! - Shells are never cached; the client bundle owns page state

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::routing::Resolution;
use crate::views::render_shell;

/// Header naming the view a response mounts.
pub const X_VIEW: &str = "x-view";

/// Build the response for a resolved navigation.
pub fn navigation_response(resolution: &Resolution) -> Response {
    if resolution.is_redirect() {
        return Redirect::temporary(&resolution.location.to_string()).into_response();
    }

    let html = render_shell(
        resolution.view,
        resolution.route.as_deref(),
        &resolution.location.path,
    );
    let mut response = (StatusCode::OK, Html(html)).into_response();
    response.headers_mut().insert(
        X_VIEW,
        HeaderValue::from_static(resolution.view.component_name()),
    );
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
        .headers_mut()
        .insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
