//! Echo handlers.
//!
//! The service binary has no event business logic of its own. It mounts
//! handlers that answer with what the router resolved, which is enough to
//! exercise and inspect the table end to end.

use axum::{body::Body, http::Request, response::IntoResponse, Json};
use serde_json::json;

use crate::events::{event_routes, EVENT_DETAIL, EVENT_LIST_CREATE};
use crate::handler::Handler;
use crate::http::request::RequestIdExt;
use crate::routing::{Params, Router, RouterError};

/// Handler answering `{"route", "method", "request_id", "params"}`.
pub fn echo(route: &'static str) -> impl Handler {
    move |request: Request<Body>, params: Params| async move {
        Json(json!({
            "route": route,
            "method": request.method().as_str(),
            "request_id": request.request_id(),
            "params": params,
        }))
        .into_response()
    }
}

/// The events table wired to echo handlers.
pub fn echo_event_routes() -> Result<Router, RouterError> {
    event_routes(echo(EVENT_LIST_CREATE), echo(EVENT_DETAIL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_echo_reports_route_and_params() {
        let router = echo_event_routes().unwrap();
        let m = router
            .match_path("event_detail/123e4567-e89b-12d3-a456-426614174000/")
            .unwrap();
        let handler = m.handler().clone();

        let request = Request::builder()
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        let response = handler.call(request, m.into_params()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["route"], "event_detail");
        assert_eq!(body["method"], "DELETE");
        assert_eq!(body["params"]["pk"], "123e4567-e89b-12d3-a456-426614174000");
    }
}
