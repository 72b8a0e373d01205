use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::routes::spawn_history_write;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub title: String,
    #[serde(default = "default_n")]
    pub n: usize,
}

fn default_n() -> usize {
    10
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub matched_title: String,
    pub used_fuzzy_match: bool,
    /// Original query string, echoed only when the match was fuzzy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_query: Option<String>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub similarity: f32,
}

/// Handler for the recommendation endpoint
///
/// Resolves the query, ranks the whole catalog against the match, and
/// records the outcome to history without blocking the response.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<RecommendResponse>> {
    let Some(resolved) = state.resolver.resolve(&params.title) else {
        spawn_history_write(&state, params.title.clone(), None);
        return Err(AppError::NotFound("Movie not found".to_string()));
    };

    let matched = state.catalog.entry(resolved.index);
    let ranked = state.ranker.rank(resolved.index, params.n);

    let recommendations = ranked
        .iter()
        .map(|result| {
            let entry = state.catalog.entry(result.index);
            Recommendation {
                title: entry.primary_title.clone(),
                year: entry.start_year,
                genres: entry.genres.clone(),
                rating: entry.average_rating,
                similarity: result.score,
            }
        })
        .collect();

    tracing::info!(
        query = %params.title,
        matched = %matched.primary_title,
        fuzzy = resolved.used_fuzzy(),
        n = params.n,
        "Recommendations served"
    );

    spawn_history_write(
        &state,
        params.title.clone(),
        Some(matched.primary_title.clone()),
    );

    Ok(Json(RecommendResponse {
        matched_title: matched.primary_title.clone(),
        used_fuzzy_match: resolved.used_fuzzy(),
        searched_query: resolved.used_fuzzy().then(|| params.title.clone()),
        recommendations,
    }))
}
