//! HTTP Server - Listener and Graceful Shutdown
//!
//! Binds the application router and serves it until the shutdown
//! broadcast fires. In-flight requests are allowed to finish.

use std::future::Future;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use crate::domain::EventKind;

/// Axum-based HTTP server for all service routes.
pub struct HttpServer {
    /// Fully assembled router (routes + middleware + state).
    router: Router,
    /// Bind address, e.g. `0.0.0.0:8080`.
    bind_address: String,
}

impl HttpServer {
    pub fn new(router: Router, bind_address: impl Into<String>) -> Self {
        Self {
            router,
            bind_address: bind_address.into(),
        }
    }

    /// Bind and serve until `shutdown_rx` receives a value.
    #[instrument(skip(self, shutdown_rx), fields(address = %self.bind_address))]
    pub async fn run(self, shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.bind_address).await?;
        self.serve(listener, shutdown_rx).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let address = listener.local_addr()?;
        info!(event = %EventKind::Startup, address = %address, "HTTP server started");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        info!(event = %EventKind::Shutdown, "HTTP server stopped");
        Ok(())
    }
}

/// Resolve when SIGINT or (on Unix) SIGTERM arrives.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!(event = %EventKind::Shutdown, "SIGINT received"),
        () = terminate => info!(event = %EventKind::Shutdown, "SIGTERM received"),
    }
}

/// Wait for `signal` or for the server task to end, whichever comes first.
///
/// On `signal` the shutdown broadcast fires and the server is awaited.
/// A server error or panic is returned on both paths.
///
/// # Errors
/// Returns the server's own error, or an error if its task panicked.
pub async fn supervise<F>(
    mut server: JoinHandle<anyhow::Result<()>>,
    signal: F,
    shutdown_tx: broadcast::Sender<()>,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        () = signal => {
            let _ = shutdown_tx.send(());
            server.await.context("HTTP server task panicked")?
        }
        joined = &mut server => joined.context("HTTP server task panicked")?,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::routing::get;

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let router = Router::new().route("/", get(|| async { "up" }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let server = HttpServer::new(router, "127.0.0.1:0");
        let handle = tokio::spawn(server.serve(listener, shutdown_rx));

        shutdown_tx.send(()).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_supervise_signal_path_stops_server_cleanly() {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        let server: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
            let _ = shutdown_rx.recv().await;
            Ok(())
        });

        let result = supervise(server, std::future::ready(()), shutdown_tx).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_supervise_signal_path_reports_panicked_server() {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        let server: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
            let _ = shutdown_rx.recv().await;
            panic!("server crashed while draining");
        });

        let result = supervise(server, std::future::ready(()), shutdown_tx).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("panicked"), "{err:#}");
    }

    #[tokio::test]
    async fn test_supervise_server_exit_path_reports_error() {
        let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
        let server: JoinHandle<anyhow::Result<()>> =
            tokio::spawn(async { Err(anyhow::anyhow!("address in use")) });

        let result = supervise(server, std::future::pending(), shutdown_tx).await;
        assert!(result.unwrap_err().to_string().contains("address in use"));
    }
}
