use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod history;
pub mod recommend;
pub mod search;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", get(recommend::recommend))
        .route("/search", get(search::search))
        .route("/history", get(history::recent))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Fire-and-forget history write
///
/// The outcome (`Written | Dropped`) is handled inside the history service;
/// the request never waits on or learns about it.
pub(crate) fn spawn_history_write(state: &AppState, query: String, matched: Option<String>) {
    let history = state.history.clone();
    tokio::spawn(async move {
        history.record(&query, matched.as_deref()).await;
    });
}
