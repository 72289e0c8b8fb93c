use axum::{
    body::Bytes,
    extract::{Extension, State},
    Json,
};
use serde_json::Value;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

const SCRAPE_ACTION: &str = "scrape";

/// `GET /api/flavors`: run every source and return the aggregate document.
pub(super) async fn get_flavors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Value>, ApiError> {
    scrape(&state, &req_id).await
}

/// `POST /api/flavors`: same as GET when the body is `{"action":"scrape"}`.
pub(super) async fn post_flavors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "malformed flavors request body");
        ApiError::InvalidRequest {
            message: e.to_string(),
        }
    })?;

    if request.get("action").and_then(Value::as_str) != Some(SCRAPE_ACTION) {
        tracing::warn!(request_id = %req_id.0, "rejected flavors request with unknown action");
        return Err(ApiError::InvalidAction);
    }

    scrape(&state, &req_id).await
}

async fn scrape(state: &AppState, req_id: &RequestId) -> Result<Json<Value>, ApiError> {
    let response = state.aggregator.run().await;
    tracing::info!(
        request_id = %req_id.0,
        total_locations = response.total_locations,
        "flavor aggregation complete"
    );

    serde_json::to_value(&response).map(Json).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "failed to build flavors response");
        ApiError::ScrapeFailed {
            message: e.to_string(),
            timestamp: state.aggregator.clock().now(),
        }
    })
}

#[cfg(test)]
#[path = "flavors_test.rs"]
mod tests;
