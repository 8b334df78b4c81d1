//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatcher as its only handler
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Percent-decode the path, strip the mount prefix, consult the route table
//! - Invoke the matched handler or answer 404
//! - Serve until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{decode_path, MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
use crate::http::response::not_found;
use crate::observability::metrics::{self, NotFoundReason};
use crate::routing::Router as RouteTable;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub prefix: Arc<str>,
}

/// HTTP front end of a route table.
pub struct HttpServer {
    app: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes` under the configured prefix.
    pub fn new(config: ServiceConfig, routes: Arc<RouteTable>) -> Self {
        let state = AppState {
            routes,
            prefix: Arc::from(config.routing.prefix.as_str()),
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServiceConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request.request_id(),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.routing.prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Strip the mount prefix from a request path.
///
/// `None` when the path lies outside the prefix.
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
}

/// Resolve the request against the route table and run its handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let Some(path) = decode_path(request.uri().path()).map(|p| p.into_owned()) else {
        tracing::debug!(request_id = %request_id, uri = %request.uri(), "Path is not UTF-8 once decoded");
        metrics::record_not_found(NotFoundReason::InvalidEncoding);
        return not_found();
    };

    let Some(relative) = strip_mount_prefix(&path, &state.prefix) else {
        tracing::debug!(request_id = %request_id, path = %path, "Path outside mount prefix");
        metrics::record_not_found(NotFoundReason::OutsidePrefix);
        return not_found();
    };

    let (route, handler, params) = match state.routes.match_path(relative) {
        Ok(matched) => (matched.name(), matched.handler().clone(), matched.into_params()),
        Err(err) => {
            tracing::debug!(request_id = %request_id, error = %err, "No route matched");
            metrics::record_not_found(NotFoundReason::NoRoute);
            return not_found();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        route = route,
        params = ?params,
        "Dispatching request"
    );

    let response = handler.call(request, params).await;
    metrics::record_request(method.as_str(), response.status().as_u16(), route, start_time);
    response
}
