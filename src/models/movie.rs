use serde::{Deserialize, Serialize};

/// A single movie record from the frozen catalog snapshot
///
/// Entries are immutable after load. An entry's position in the catalog
/// sequence doubles as its row index into the feature matrix, so the two
/// collections must never be reordered independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// IMDB title identifier (e.g., "tt1375666"), unique within the catalog
    pub tconst: String,
    pub primary_title: String,
    pub start_year: Option<i32>,
    pub genres: Vec<String>,
    pub average_rating: Option<f64>,
    pub num_votes: i64,
    pub director_names: String,
    /// Feature text (genres + directors + decade) the offline vectorizer
    /// consumed; carried opaquely, never rebuilt at request time
    pub soup: String,
}

/// Which resolution stage produced a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchStrategy {
    Exact,
    Substring,
    /// Approximate match; carries the scorer's confidence on a 0-100 scale
    Fuzzy { score: f64 },
}

/// Outcome of resolving a free-text query against the catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMatch {
    /// Index of the matched entry in the catalog sequence (and its
    /// feature-matrix row)
    pub index: usize,
    pub strategy: MatchStrategy,
}

impl ResolvedMatch {
    /// Whether the fuzzy stage produced this match
    ///
    /// Fuzzy results are approximate; callers must surface this to the end
    /// user along with the original query string.
    pub fn used_fuzzy(&self) -> bool {
        matches!(self.strategy, MatchStrategy::Fuzzy { .. })
    }
}

/// A catalog entry's similarity to a query entry
///
/// Scores are cosine similarities in [0, 1] for non-negative TF-IDF rows;
/// the query entry itself is forced to -1.0 so it can never appear in a
/// top-N selection. Scores are only comparable within one matrix snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityResult {
    pub index: usize,
    pub score: f32,
}
