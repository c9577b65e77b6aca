//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with the catch-all redirect handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Resolve request paths through the chain and emit redirects
//! - Serve until the shutdown signal, then drain gracefully
//!
//! # Design Decisions
//! - One route matches every path; the chain decides what happens
//! - A hit is always `302 Found` + `Location`; a miss is always the fixed
//!   greeting; the client never sees an error from lookup
//! - Handlers share only the immutable chain; no locks on the request path

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;
use crate::resolver::ResolverChain;

/// Greeting served by the terminal fallback when no source matches.
pub const DEFAULT_GREETING: &str = "Hello, world!\n";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ResolverChain>,
    pub metrics_enabled: bool,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given resolver chain.
    pub fn new(config: &ServerConfig, chain: Arc<ResolverChain>) -> Self {
        let state = AppState {
            chain,
            metrics_enabled: config.observability.metrics_enabled,
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown channel fires, then drain in-flight connections.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The configured router, for in-process testing without a listener.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Catch-all handler: resolve the path, redirect on a hit, greet on a miss.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().to_string();
    let path = request.uri().path();

    let Some(resolution) = state.chain.resolve(path) else {
        return default_response(&state, &method, start);
    };

    match HeaderValue::from_str(&resolution.url) {
        Ok(location) => {
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                url = %resolution.url,
                source = %resolution.source,
                "redirecting"
            );
            if state.metrics_enabled {
                metrics::record_request(&method, StatusCode::FOUND.as_u16(), &resolution.source, start);
            }
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                url = %resolution.url,
                "resolved URL is not a valid Location value, serving fallback"
            );
            default_response(&state, &method, start)
        }
    }
}

/// Terminal fallback: fixed greeting, 200, never redirects.
fn default_response(state: &AppState, method: &str, start: Instant) -> Response {
    if state.metrics_enabled {
        metrics::record_request(method, StatusCode::OK.as_u16(), "default", start);
    }
    (StatusCode::OK, DEFAULT_GREETING).into_response()
}
