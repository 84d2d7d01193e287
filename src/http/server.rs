//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router sending every path to the route table
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener with graceful shutdown
//! - Record navigation metrics

use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::navigation_response;
use crate::lifecycle::signals::stop_requested;
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::routing::{Location, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
}

/// HTTP server exposing the route table.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    table: Arc<RouteTable>,
}

impl HttpServer {
    /// Create a server with the built-in route table.
    pub fn new(config: AppConfig) -> Self {
        let table = Arc::new(RouteTable::with_options(config.routing.match_options()));
        Self::with_table(config, table)
    }

    /// Create a server over an explicit route table.
    pub fn with_table(config: AppConfig, table: Arc<RouteTable>) -> Self {
        let state = AppState {
            table: table.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            table,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(navigate_handler))
            .route("/{*path}", get(navigate_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            path = %req.uri().path(),
                            request_id = %request_id(req)
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.table.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(stop_requested(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

/// Resolve the request path against the route table.
async fn navigate_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    let location = Location::from_parts(uri.path(), uri.query());
    let resolution = state.table.resolve(&location);

    if resolution.is_redirect() {
        tracing::debug!(from = %location, to = %resolution.location, "Redirecting unmatched path");
    } else {
        tracing::debug!(view = %resolution.view, "Mounting view");
    }

    metrics::record_navigation(&resolution, start);
    navigation_response(&resolution)
}
