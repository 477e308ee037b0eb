//! HTTP transport around a [`TransactionProcessor`](crate::processor::TransactionProcessor).
//!
//! Decodes requests, calls the processor and maps its results onto status
//! codes. Holds no ledger state of its own.

use std::{future::Future, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::Config;

pub mod errors;
pub mod routes;

pub use routes::SharedProcessor;

pub const API_PREFIX: &str = "/api/v1";

pub fn build_app(processor: SharedProcessor, request_timeout: Duration) -> Router {
    Router::new()
        .nest(API_PREFIX, routes::router())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(processor)
}

pub struct Server {
    listener: TcpListener,
    app: Router,
    shutdown_timeout: Duration,
}

impl Server {
    pub async fn bind(config: &Config, processor: SharedProcessor) -> Result<Self> {
        let listener = TcpListener::bind(config.listen_addr)
            .await
            .with_context(|| format!("Failed to bind `{}`", config.listen_addr))?;
        Ok(Self {
            listener,
            app: build_app(processor, config.request_timeout),
            shutdown_timeout: config.shutdown_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    /// Serves until `shutdown` completes, then stops accepting connections
    /// and waits up to the configured grace period for in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let Self {
            listener,
            app,
            shutdown_timeout,
        } = self;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        tokio::select! {
            joined = &mut server => {
                return joined
                    .context("Server task failed")?
                    .context("Server stopped unexpectedly");
            }
            () = shutdown => {}
        }

        info!("server is shutting down");
        let _ = stop_tx.send(());
        match tokio::time::timeout(shutdown_timeout, &mut server).await {
            Ok(joined) => joined
                .context("Server task failed")?
                .context("Server failed while shutting down"),
            Err(_) => {
                server.abort();
                anyhow::bail!("Server forced to shutdown after {shutdown_timeout:?}")
            }
        }
    }
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Unable to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!("Unable to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT"),
        () = terminate => info!("received SIGTERM"),
    }
}
