use std::cmp::Ordering;
use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::models::SimilarityResult;

/// Sentinel similarity assigned to the query entry itself so it can never
/// appear in the top results, even on an exact score tie
pub const SELF_SENTINEL: f32 = -1.0;

/// Ranks catalog entries by content similarity to a query entry
///
/// Computes cosine similarity between the query's feature row and every
/// row of the frozen matrix, then returns the top N. The scan is
/// O(catalog size) and runs synchronously within the request.
pub struct SimilarityRanker {
    catalog: Arc<CatalogStore>,
}

impl SimilarityRanker {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Top `top_n` entries most similar to the entry at `index`
    ///
    /// Output is sorted by descending score and never contains the query
    /// entry; its length is `min(top_n, catalog_len - 1)`. Sub-ordering
    /// among equal scores follows the unstable sort and is not part of the
    /// contract.
    pub fn rank(&self, index: usize, top_n: usize) -> Vec<SimilarityResult> {
        let mut scores = self.catalog.matrix().similarities(index);
        scores[index] = SELF_SENTINEL;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_unstable_by(|&a, &b| {
            scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal)
        });

        order
            .into_iter()
            .filter(|&i| i != index)
            .take(top_n)
            .map(|i| SimilarityResult {
                index: i,
                score: scores[i],
            })
            .collect()
    }
}
