use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::CatalogStore;
use crate::services::{
    EnrichmentGateway, HistoryLog, SimilarityRanker, TitleResolver, WeightedRatioScorer,
};

/// Shared application state
///
/// The explicit context object built once at startup and injected into
/// every handler. The catalog side is immutable and lock-free; the
/// relational side holds only a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub resolver: Arc<TitleResolver>,
    pub ranker: Arc<SimilarityRanker>,
    pub enrichment: EnrichmentGateway,
    pub history: HistoryLog,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogStore>, pool: PgPool, fuzzy_threshold: f64) -> Self {
        Self {
            resolver: Arc::new(TitleResolver::new(
                catalog.clone(),
                Box::new(WeightedRatioScorer::default()),
                fuzzy_threshold,
            )),
            ranker: Arc::new(SimilarityRanker::new(catalog.clone())),
            enrichment: EnrichmentGateway::new(pool.clone()),
            history: HistoryLog::new(pool),
            catalog,
        }
    }
}
