//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout)
//! - Serve on a listener until shutdown is triggered

use std::sync::Arc;
use std::time::Duration;

use axum::{http::Method, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ContentTypeMode, RelayConfig};
use crate::http::handlers::{health, relay_image};
use crate::http::request::{make_span, UuidRequestId};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::relay::{UpstreamClient, UrlPolicy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub policy: Arc<UrlPolicy>,
    pub content_type: ContentTypeMode,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let policy = UrlPolicy::from_config(&config.upstream);
        let upstream = UpstreamClient::new(&config.upstream, policy.clone())?;
        Ok(Self {
            upstream,
            policy: Arc::new(policy),
            content_type: config.response.content_type,
        })
    }
}

/// HTTP server for the image relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(&config)?;
        let router = build_router(&config, state);
        Ok(Self { router })
    }

    /// The fully layered router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Outermost first: request id, trace, id propagation, CORS, timeout.
/// CORS sits outside the timeout so 408s are readable cross-origin too.
#[allow(deprecated)]
pub fn build_router(config: &RelayConfig, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/proxy-image", get(relay_image))
        .route("/health", get(health))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}
