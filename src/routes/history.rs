use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::HistoryRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Handler for the search-history endpoint
///
/// Unlike the write path, a store failure here surfaces to the caller;
/// retrieving history is the whole point of the call.
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    if !(1..=500).contains(&params.limit) {
        return Err(AppError::InvalidInput(
            "limit must be between 1 and 500".to_string(),
        ));
    }

    let records = state.history.fetch_recent(params.limit).await?;
    Ok(Json(records))
}
