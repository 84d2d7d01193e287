//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl+C / SIGTERM into a graceful stop
//! - Race OS signals against an in-process shutdown trigger

use crate::lifecycle::shutdown::ShutdownListener;

/// Resolve once the process should stop accepting connections.
pub async fn stop_requested(mut listener: ShutdownListener) {
    tokio::select! {
        _ = os_signal() => tracing::info!("Shutdown signal received"),
        _ = listener.recv() => tracing::info!("Shutdown triggered"),
    }
}

#[cfg(unix)]
async fn os_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        _ = ctrl_c() => {}
        _ = term.recv() => {}
    }
}

#[cfg(not(unix))]
async fn os_signal() {
    ctrl_c().await
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
