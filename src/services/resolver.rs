use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::models::{MatchStrategy, ResolvedMatch};
use crate::services::scorer::TitleScorer;

/// Resolves free-text queries to catalog entries
///
/// Three stages in strict priority order: case-insensitive equality,
/// case-insensitive substring containment, then fuzzy scoring over every
/// title. The first stage with any candidate wins. An unresolved query is a
/// normal outcome (`None`), not an error; the orchestrator records it to
/// history before signaling not-found.
pub struct TitleResolver {
    catalog: Arc<CatalogStore>,
    scorer: Box<dyn TitleScorer>,
    /// Minimum fuzzy confidence (0-100) to accept a match
    threshold: f64,
}

impl TitleResolver {
    pub fn new(catalog: Arc<CatalogStore>, scorer: Box<dyn TitleScorer>, threshold: f64) -> Self {
        Self {
            catalog,
            scorer,
            threshold,
        }
    }

    pub fn resolve(&self, query: &str) -> Option<ResolvedMatch> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let needle = query.to_lowercase();

        if let Some(index) = self.exact(&needle) {
            return Some(ResolvedMatch {
                index,
                strategy: MatchStrategy::Exact,
            });
        }

        if let Some(index) = self.substring(&needle) {
            return Some(ResolvedMatch {
                index,
                strategy: MatchStrategy::Substring,
            });
        }

        self.fuzzy(query)
    }

    /// Case-insensitive full-title equality; `needle` must be lowercased
    fn exact(&self, needle: &str) -> Option<usize> {
        self.most_voted(|title| title == needle)
    }

    /// Case-insensitive containment of the query within the title
    fn substring(&self, needle: &str) -> Option<usize> {
        self.most_voted(|title| title.contains(needle))
    }

    /// Among all entries whose lowercased title satisfies `matches`, picks
    /// the one with the most votes
    ///
    /// Sequels and re-releases share titles; the popularity prior decides,
    /// never alphabetical or insertion order. Exact and substring stages
    /// share this policy.
    fn most_voted<F>(&self, matches: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.catalog
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches(&entry.primary_title.to_lowercase()))
            .max_by_key(|(_, entry)| entry.num_votes)
            .map(|(index, _)| index)
    }

    /// Scores every title, accepts the best only at or above the threshold
    ///
    /// The winning title string is re-resolved through the exact stage so
    /// that entries sharing that title get the same vote-count tie-break.
    fn fuzzy(&self, query: &str) -> Option<ResolvedMatch> {
        let mut best: Option<(f64, &str)> = None;

        for entry in self.catalog.entries() {
            let score = self.scorer.score(query, &entry.primary_title);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, &entry.primary_title));
            }
        }

        let (score, title) = best?;
        if score < self.threshold {
            return None;
        }

        let index = self.exact(&title.to_lowercase())?;
        Some(ResolvedMatch {
            index,
            strategy: MatchStrategy::Fuzzy { score },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::matrix::{FeatureMatrix, SparseVector};
    use crate::models::CatalogEntry;
    use crate::services::scorer::WeightedRatioScorer;

    fn entry(tconst: &str, title: &str, votes: i64) -> CatalogEntry {
        CatalogEntry {
            tconst: tconst.to_string(),
            primary_title: title.to_string(),
            start_year: Some(2010),
            genres: vec!["Drama".to_string()],
            average_rating: Some(7.0),
            num_votes: votes,
            director_names: "Jane Doe".to_string(),
            soup: "drama jane doe 2010s".to_string(),
        }
    }

    fn resolver(entries: Vec<CatalogEntry>) -> TitleResolver {
        let rows = (0..entries.len())
            .map(|i| SparseVector::new(vec![i as u32], vec![1.0]))
            .collect();
        let matrix = FeatureMatrix::from_rows(entries.len().max(1), rows).unwrap();
        let catalog = Arc::new(CatalogStore::from_parts(entries, matrix).unwrap());
        TitleResolver::new(catalog, Box::new(WeightedRatioScorer::default()), 50.0)
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let resolver = resolver(vec![
            entry("tt1", "Inception", 2_000_000),
            entry("tt2", "Interstellar", 1_500_000),
        ]);

        let resolved = resolver.resolve("inception").unwrap();
        assert_eq!(resolved.index, 0);
        assert_eq!(resolved.strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_exact_wins_over_substring() {
        // "Alien" matches "Alien" exactly and "Aliens" by substring; the
        // exact stage must short-circuit even though "Aliens" has more votes
        let resolver = resolver(vec![
            entry("tt1", "Alien", 800_000),
            entry("tt2", "Aliens", 900_000),
        ]);

        let resolved = resolver.resolve("Alien").unwrap();
        assert_eq!(resolved.index, 0);
        assert_eq!(resolved.strategy, MatchStrategy::Exact);
    }

    #[test]
    fn test_substring_stage_matches_partial_title() {
        let resolver = resolver(vec![
            entry("tt1", "The Dark Knight", 2_500_000),
            entry("tt2", "Inception", 2_000_000),
        ]);

        let resolved = resolver.resolve("dark knight").unwrap();
        assert_eq!(resolved.index, 0);
        assert_eq!(resolved.strategy, MatchStrategy::Substring);
    }

    #[test]
    fn test_duplicate_titles_break_ties_by_votes() {
        let resolver = resolver(vec![
            entry("tt1", "Titanic", 100),
            entry("tt2", "Titanic", 5000),
            entry("tt3", "Titanic", 40),
        ]);

        let resolved = resolver.resolve("Titanic").unwrap();
        assert_eq!(resolved.index, 1);
    }

    #[test]
    fn test_substring_tie_break_also_uses_votes() {
        let resolver = resolver(vec![
            entry("tt1", "Batman Begins", 1_400_000),
            entry("tt2", "Batman Returns", 300_000),
        ]);

        let resolved = resolver.resolve("Batman").unwrap();
        assert_eq!(resolved.index, 0);
        assert_eq!(resolved.strategy, MatchStrategy::Substring);
    }

    #[test]
    fn test_fuzzy_recovers_misspelled_title() {
        let resolver = resolver(vec![
            entry("tt1", "Inception", 2_000_000),
            entry("tt2", "The Godfather", 1_800_000),
        ]);

        let resolved = resolver.resolve("Incepton").unwrap();
        assert_eq!(resolved.index, 0);
        assert!(resolved.used_fuzzy());
        match resolved.strategy {
            MatchStrategy::Fuzzy { score } => assert!(score >= 50.0),
            other => panic!("expected fuzzy, got {other:?}"),
        }
    }

    #[test]
    fn test_fuzzy_reresolve_applies_vote_tie_break() {
        // Both entries carry the fuzzy winner's title; the match must land
        // on the more popular one
        let resolver = resolver(vec![
            entry("tt1", "Inception", 100),
            entry("tt2", "Inception", 2_000_000),
        ]);

        let resolved = resolver.resolve("Incepton").unwrap();
        assert_eq!(resolved.index, 1);
        assert!(resolved.used_fuzzy());
    }

    #[test]
    fn test_noise_query_is_unresolved() {
        let resolver = resolver(vec![
            entry("tt1", "Inception", 2_000_000),
            entry("tt2", "The Godfather", 1_800_000),
        ]);

        assert!(resolver.resolve("qzxwvjkp").is_none());
    }

    #[test]
    fn test_blank_query_is_unresolved() {
        let resolver = resolver(vec![entry("tt1", "Inception", 2_000_000)]);
        assert!(resolver.resolve("   ").is_none());
    }
}
