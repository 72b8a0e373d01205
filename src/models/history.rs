use chrono::NaiveDateTime;
use serde::Serialize;

/// A persisted search-history row
///
/// Written once per search request and never updated or deleted here;
/// retention is an external concern.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct HistoryRecord {
    pub id: i32,
    pub search_query: String,
    /// Null when resolution failed at every stage
    pub matched_title: Option<String>,
    pub searched_at: NaiveDateTime,
}

/// Outcome of a fire-and-forget history write
///
/// A store failure becomes `Dropped` instead of an error so that logging
/// can never fail a search or recommendation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WriteOutcome {
    Written,
    Dropped,
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written)
    }
}
