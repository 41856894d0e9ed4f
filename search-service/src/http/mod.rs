//! HTTP surface for the search service.
//!
//! One route family under `/system/search`: POST runs a search, GET answers
//! health probes. The handlers are thin; parsing, orchestration and
//! rendering are the only responsibilities here.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{debug, error};

use search_service_shared::SearchRequest;

use crate::errors::ServiceError;
use crate::orchestrator::SearchOrchestrator;

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/system/search", post(search).get(health))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "message": "search service is available" }))
}

async fn search(State(state): State<AppState>, Json(request): Json<SearchRequest>) -> Response {
    if request.query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Request must contain a \"query\"");
    }
    debug!(query = %request.query, "Incoming search request");

    match state
        .orchestrator
        .search(&request.query, request.collections.as_deref())
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(ServiceError::Query(rejected)) => {
            error_response(StatusCode::BAD_REQUEST, &rejected.to_string())
        }
        Err(error) => {
            error!(error = %error, "Search request failed");
            error_response(StatusCode::BAD_GATEWAY, "search backend unavailable")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
