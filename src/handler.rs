//! Handler capability.
//!
//! A handler is anything that turns a request plus the decoded path
//! parameters into a response. Routes hold handlers by direct reference
//! (`Arc<dyn Handler>`), so dispatch never looks a handler up by name.

use std::future::Future;
use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response};
use futures_util::future::BoxFuture;

use crate::routing::Params;

/// Fixed request -> response signature for routed endpoints.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>, params: Params) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>, params: Params) -> BoxFuture<'static, Response> {
        Box::pin(self(request, params))
    }
}

/// Shared handler reference stored in the route table.
pub type SharedHandler = Arc<dyn Handler>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    async fn teapot(_request: Request<Body>, params: Params) -> Response {
        (StatusCode::IM_A_TEAPOT, params.len().to_string()).into_response()
    }

    #[tokio::test]
    async fn test_async_fn_is_a_handler() {
        let handler: SharedHandler = Arc::new(teapot);
        let params: Params = [("pk", 7u64)].into_iter().collect();

        let response = handler.call(Request::new(Body::empty()), params).await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_closure_is_a_handler() {
        let handler: SharedHandler = Arc::new(|_req: Request<Body>, _params: Params| async {
            StatusCode::NO_CONTENT.into_response()
        });

        let response = handler.call(Request::new(Body::empty()), Params::new()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
