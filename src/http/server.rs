//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Build the route table and dispatcher once from configuration
//! - Create the Axum router with the dispatcher as the only handler
//! - Bind, serve and report the terminal outcome of a run
//! - Stop on request, from any task, any number of times

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{resolve_bind_address, ProxyConfig};
use crate::http::dispatch::{dispatch_handler, Dispatcher};
use crate::http::forward::Forwarder;
use crate::http::static_files::StaticRoot;
use crate::lifecycle::phase::PhaseCell;
use crate::lifecycle::{Phase, Shutdown};
use crate::observability::tracing::RequestSpan;
use crate::routing::RouteTable;

/// Terminal failure of a serve attempt.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("server is already {0}")]
    AlreadyStarted(Phase),
}

/// HTTP front door: routes to backends or serves static files.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    dispatcher: Dispatcher,
    shutdown: Arc<Shutdown>,
    phase: PhaseCell,
    drain_timeout: Duration,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let routes = Arc::new(RouteTable::from_config(&config.proxies));
        let forwarder = Forwarder::new(config.upstream_timeout_secs.map(Duration::from_secs));
        let static_root = StaticRoot::from_config(&config.static_dir);

        tracing::info!(
            routes = routes.len(),
            skipped = config.proxies.len() - routes.len(),
            static_dir = %config.static_dir,
            "Proxy configured"
        );

        let dispatcher = Dispatcher::new(routes, forwarder, static_root);
        let router = Self::build_router(dispatcher.clone());
        let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);

        Self {
            router,
            config,
            dispatcher,
            shutdown: Arc::new(Shutdown::new()),
            phase: PhaseCell::default(),
            drain_timeout,
        }
    }

    fn build_router(dispatcher: Dispatcher) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(dispatcher)
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
    }

    /// Resolve the configured address, bind it and serve until stopped.
    pub async fn start(&self) -> Result<(), ServeError> {
        let addr = resolve_bind_address(&self.config.addr);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServeError::Bind { addr, source })?;

        self.run(listener).await
    }

    /// Serve on an already bound listener until stopped or failed.
    pub async fn run(&self, listener: TcpListener) -> Result<(), ServeError> {
        self.phase
            .transition(Phase::Idle, Phase::Listening)
            .map_err(ServeError::AlreadyStarted)?;

        let addr = listener.local_addr().ok();
        tracing::info!(address = ?addr, "Starting proxy server");

        let app = self.router.clone().into_make_service_with_connect_info::<SocketAddr>();
        let shutdown = self.shutdown.clone();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .into_future();
        tokio::pin!(serve);

        // Connections get `drain_timeout` to finish once stop is requested;
        // whatever is still in flight after that is abandoned.
        let result = tokio::select! {
            result = &mut serve => result,
            _ = self.shutdown.wait() => {
                match tokio::time::timeout(self.drain_timeout, &mut serve).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!(timeout = ?self.drain_timeout, "Drain deadline elapsed, abandoning in-flight requests");
                        Ok(())
                    }
                }
            }
        };

        self.phase.set(Phase::Stopped);
        tracing::info!(address = ?addr, "Proxy server has shut down");

        result.map_err(ServeError::Serve)
    }

    /// Ask a running (or not yet started) server to stop. Idempotent.
    pub fn stop(&self) {
        let _ = self.phase.transition(Phase::Listening, Phase::ShuttingDown);
        if self.shutdown.trigger() {
            tracing::info!(phase = %self.phase.get(), "Stop requested");
        }
    }

    /// Handle that can stop the server from another task.
    pub fn shutdown_handle(&self) -> Arc<Shutdown> {
        self.shutdown.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn routes(&self) -> &RouteTable {
        self.dispatcher.routes()
    }
}
