//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the hero handlers
//! - Wire up middleware (request ID, tracing, timeout, panic catcher, metrics)
//! - Serve on a bound listener until shutdown is signalled

use std::time::Duration;

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    http::Request,
    middleware,
    routing::get,
    BoxError, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::ProxyConfig;
use crate::heroes::HeroService;
use crate::http::heroes::{get_hero, list_heroes};
use crate::http::middleware::metrics::track_metrics;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::http::response::{not_found, panic_response, request_timeout};
use crate::upstream::UpstreamError;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub heroes: HeroService,
}

/// HTTP server for the heroes proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let state = AppState {
            heroes: HeroService::from_config(&config)?,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let deadline = Duration::from_secs(config.timeouts.request_secs);
        let layers = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(HandleErrorLayer::new(move |err: BoxError| {
                request_timeout(err, deadline)
            }))
            .layer(TimeoutLayer::new(deadline));

        Router::new()
            .route("/heroes", get(list_heroes))
            .route("/heroes/{hero_id}", get(get_hero))
            .fallback(not_found)
            .method_not_allowed_fallback(not_found)
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(layers)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request.request_id(),
    )
}
