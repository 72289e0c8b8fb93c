mod flavors;

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use custard_scraper::Aggregator;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, request_span, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    #[must_use]
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

/// Error responses in the shape the list client already handles.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not valid JSON.
    InvalidRequest { message: String },
    /// Valid JSON, but not `{"action":"scrape"}`.
    InvalidAction,
    /// The aggregate response could not be produced.
    ScrapeFailed {
        message: String,
        timestamp: DateTime<Utc>,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::InvalidRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid request",
                    message: Some(message),
                    status: None,
                    timestamp: None,
                },
            ),
            ApiError::InvalidAction => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid action",
                    message: None,
                    status: None,
                    timestamp: None,
                },
            ),
            ApiError::ScrapeFailed { message, timestamp } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Failed to scrape flavors",
                    message: Some(message),
                    status: Some("error"),
                    timestamp: Some(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/flavors",
            get(flavors::get_flavors).post(flavors::post_flavors),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    tracing::debug!(request_id = %req_id.0, "health check");
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn invalid_action_maps_to_bad_request_with_bare_error() {
        let response = ApiError::InvalidAction.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json, serde_json::json!({ "error": "Invalid action" }));
    }

    #[tokio::test]
    async fn scrape_failed_maps_to_internal_error_envelope() {
        use chrono::TimeZone;

        let response = ApiError::ScrapeFailed {
            message: "boom".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 18, 0, 0).unwrap(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"], "Failed to scrape flavors");
        assert_eq!(json["message"], "boom");
        assert_eq!(json["status"], "error");
        assert_eq!(json["timestamp"], "2026-01-05T18:00:00.000Z");
    }

    #[tokio::test]
    async fn health_is_ok_and_carries_request_id() {
        let app = build_app(AppState::new(Aggregator::new(
            vec![],
            Arc::new(custard_core::SystemClock::new(chrono_tz::America::Chicago)),
        )));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }
}
