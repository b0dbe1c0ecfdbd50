//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = crate::api::build_app(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🍔 Food server listening on {}", addr);

        let handle = Handle::new();

        // Ctrl-C -> graceful shutdown with a grace period
        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        tokio::spawn(shutdown_on(tokio::signal::ctrl_c(), handle.clone(), grace));

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Start a graceful shutdown once `signal` fires. If the signal handler
/// could not be installed the server keeps serving. Returns whether
/// shutdown was started.
async fn shutdown_on<F>(signal: F, handle: Handle<SocketAddr>, grace: Duration) -> bool
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Shutting down...");
            handle.graceful_shutdown(Some(grace));
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C, graceful shutdown disabled");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_error_keeps_serving() {
        let failed = async { Err(std::io::Error::other("no signal handler")) };
        assert!(!shutdown_on(failed, Handle::new(), Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_signal_starts_shutdown() {
        assert!(shutdown_on(async { Ok(()) }, Handle::new(), Duration::from_millis(10)).await);
    }
}
