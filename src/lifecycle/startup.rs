//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the route table from validated configuration
//! - Start the metrics endpoint when enabled
//! - Bind the listener and hand it to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::ShutdownListener;
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start every subsystem and serve until shutdown.
pub async fn run(config: AppConfig, shutdown: ShutdownListener) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr = address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config);
    let address = server.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        routes = server.table().len(),
        "Route table loaded"
    );

    server.run(listener, shutdown).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    #[tokio::test]
    async fn test_bad_metrics_address_is_fatal() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let shutdown = Shutdown::new();
        let err = run(config, shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, StartupError::MetricsAddress(addr) if addr == "not-an-address"));
    }

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "256.0.0.1:80".into();

        let shutdown = Shutdown::new();
        let err = run(config, shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
