//! HTTP route handlers.

use axum::{
    extract::{ConnectInfo, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::pipeline::{render_response, CsvResponse};
use crate::zabbix::JsonRpcTransport;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Origin reported when the peer address is unknown, e.g. local invocations.
pub const LOCAL_ORIGIN: &str = "127.0.0.1";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn JsonRpcTransport>,
}

pub fn router(state: AppState, csv_path: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(csv_path, get(alarms_csv).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Basic liveness check
pub async fn health() -> &'static str {
    "ok"
}

/// GET <csv path> - Active alarm table
pub async fn alarms_csv(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let origin = peer
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| LOCAL_ORIGIN.to_string());

    let response = render_response(state.transport.as_ref(), &origin).await;
    match &response {
        CsvResponse::Alarms { rows, .. } => debug!(%origin, rows, "Alarm table ready"),
        CsvResponse::Fault { message, .. } => debug!(%origin, "Error table ready: {}", message),
    }
    csv_response(response.into_body())
}

/// The polling device cannot handle chunked transfer, so the length is
/// always stated up front.
fn csv_response(body: String) -> Response {
    let length = body.len();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
        ],
        body,
    )
        .into_response()
}

pub async fn method_not_allowed() -> StatusCode {
    debug!("Rejecting non-GET request");
    StatusCode::METHOD_NOT_ALLOWED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zabbix::testing::ScriptedTransport;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::json;
    use tower::ServiceExt;

    fn app(transport: ScriptedTransport) -> (Router, Arc<ScriptedTransport>) {
        let transport = Arc::new(transport);
        let state = AppState {
            transport: transport.clone(),
        };
        (router(state, "/api_csv"), transport)
    }

    fn request(method: Method) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/api_csv")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_serves_csv_with_length() {
        let (app, _) = app(
            ScriptedTransport::new()
                .respond("problem.get", json!([{"eventid": "1", "objectid": "10", "clock": "100", "severity": "5", "suppressed": "0"}]))
                .respond("event.get", json!([{"eventid": "1", "acknowledged": "0"}]))
                .respond("trigger.get", json!([{"triggerid": "10", "status": "0", "hosts": [{"hostid": "5", "status": "0"}]}])),
        );

        let response = app.oneshot(request(Method::GET)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], CSV_CONTENT_TYPE);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "55");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"clock;severity;suppressed;hostid;host;name\n100;5;0;5;;\n");
    }

    #[tokio::test]
    async fn test_fault_uses_local_origin_without_peer() {
        let (app, _) = app(ScriptedTransport::new().fail("problem.get", "connection refused"));

        let response = app.oneshot(request(Method::GET)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], CSV_CONTENT_TYPE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            &body[..],
            b"jsonrpc;error.code;error.message;error.data;id\n2.0;1;connection refused;;1@127.0.0.1\n"
        );
    }

    #[tokio::test]
    async fn test_post_rejected_before_pipeline() {
        let (app, transport) = app(ScriptedTransport::new().respond("problem.get", json!([])));

        let response = app.oneshot(request(Method::POST)).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_table_has_zero_length() {
        let (app, _) = app(ScriptedTransport::new().respond("problem.get", json!([])));

        let response = app.oneshot(request(Method::GET)).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "0");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(ScriptedTransport::new());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
