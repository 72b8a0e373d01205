use strsim::{jaro_winkler, normalized_levenshtein};

/// Pluggable string-similarity strategy for the fuzzy resolution stage
///
/// Implementations return a confidence on a 0-100 scale; the resolver
/// compares it against the acceptance threshold without knowing which
/// algorithm produced it.
pub trait TitleScorer: Send + Sync {
    fn score(&self, query: &str, candidate: &str) -> f64;
}

/// Discount applied to the token-sorted comparison so a reordered match
/// never outranks an equally close in-order match
const TOKEN_SORT_DISCOUNT: f64 = 0.95;

/// Bonus when one normalized string contains the other
const CONTAINMENT_BONUS: f64 = 0.1;

/// Default scorer: a weighted blend of Jaro-Winkler and normalized
/// Levenshtein over normalized strings, taken at the better of the raw and
/// token-sorted orderings
#[derive(Debug, Clone)]
pub struct WeightedRatioScorer {
    /// Weight for Jaro-Winkler; the remainder goes to Levenshtein
    jaro_weight: f64,
}

impl Default for WeightedRatioScorer {
    fn default() -> Self {
        // Favor Jaro-Winkler slightly: it tolerates the transpositions and
        // shared prefixes typical of misspelled titles
        Self { jaro_weight: 0.6 }
    }
}

impl WeightedRatioScorer {
    fn blend(&self, a: &str, b: &str) -> f64 {
        let jaro = jaro_winkler(a, b);
        let lev = normalized_levenshtein(a, b);
        self.jaro_weight * jaro + (1.0 - self.jaro_weight) * lev
    }
}

impl TitleScorer for WeightedRatioScorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        let q = normalize(query);
        let c = normalize(candidate);

        if q.is_empty() || c.is_empty() {
            return 0.0;
        }
        if q == c {
            return 100.0;
        }

        let direct = self.blend(&q, &c);
        let token_sorted = self.blend(&sort_tokens(&q), &sort_tokens(&c)) * TOKEN_SORT_DISCOUNT;

        let containment = if q.contains(&c) || c.contains(&q) {
            CONTAINMENT_BONUS
        } else {
            0.0
        };

        (direct.max(token_sorted) + containment).min(1.0) * 100.0
    }
}

/// Lowercase, strip punctuation, collapse whitespace
fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_titles_score_100() {
        let scorer = WeightedRatioScorer::default();
        assert_eq!(scorer.score("Inception", "Inception"), 100.0);
        assert_eq!(scorer.score("the dark knight", "The Dark Knight"), 100.0);
        assert_eq!(scorer.score("Se7en!", "se7en"), 100.0);
    }

    #[test]
    fn test_misspelling_scores_above_threshold() {
        let scorer = WeightedRatioScorer::default();
        let score = scorer.score("Incepton", "Inception");
        assert!(score >= 50.0, "got {score}");
        assert!(score < 100.0, "got {score}");
    }

    #[test]
    fn test_reordered_tokens_score_high() {
        let scorer = WeightedRatioScorer::default();
        let score = scorer.score("Knight Dark The", "The Dark Knight");
        assert!(score >= 90.0, "got {score}");
    }

    #[test]
    fn test_noise_scores_below_threshold() {
        let scorer = WeightedRatioScorer::default();
        let score = scorer.score("qzxwvjkp", "The Dark Knight");
        assert!(score < 50.0, "got {score}");
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let scorer = WeightedRatioScorer::default();
        assert_eq!(scorer.score("", "Inception"), 0.0);
        assert_eq!(scorer.score("?!", "Inception"), 0.0);
    }
}
