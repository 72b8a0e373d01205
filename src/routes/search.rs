use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::CastMember;
use crate::routes::spawn_history_write;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub tconst: String,
    pub primary_title: String,
    pub start_year: Option<i32>,
    pub genres: Vec<String>,
    pub average_rating: Option<f64>,
    pub num_votes: i64,
    pub director_names: String,
    /// Absent when the relational store could not be consulted
    pub original_title: Option<String>,
    pub runtime_minutes: Option<i32>,
    /// Empty when enrichment degraded; billing order otherwise
    pub cast: Vec<CastMember>,
    pub used_fuzzy_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_query: Option<String>,
}

/// Handler for the movie search endpoint
///
/// Resolves the query to its best catalog match, then merges in
/// best-effort extended details from the relational store. A store outage
/// leaves those fields absent; it never fails the response.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let Some(resolved) = state.resolver.resolve(&params.title) else {
        spawn_history_write(&state, params.title.clone(), None);
        return Err(AppError::NotFound("Movie not found".to_string()));
    };

    let entry = state.catalog.entry(resolved.index).clone();
    let details = state.enrichment.enrich(&entry.tconst).await.into_details();

    tracing::info!(
        query = %params.title,
        matched = %entry.primary_title,
        fuzzy = resolved.used_fuzzy(),
        "Search served"
    );

    spawn_history_write(
        &state,
        params.title.clone(),
        Some(entry.primary_title.clone()),
    );

    Ok(Json(SearchResponse {
        tconst: entry.tconst,
        primary_title: entry.primary_title,
        start_year: entry.start_year,
        genres: entry.genres,
        average_rating: entry.average_rating,
        num_votes: entry.num_votes,
        director_names: entry.director_names,
        original_title: details.original_title,
        runtime_minutes: details.runtime_minutes,
        cast: details.cast,
        used_fuzzy_match: resolved.used_fuzzy(),
        searched_query: resolved.used_fuzzy().then(|| params.title.clone()),
    }))
}
