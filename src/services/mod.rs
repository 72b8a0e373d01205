pub mod enrichment;
pub mod history;
pub mod ranker;
pub mod resolver;
pub mod scorer;

pub use enrichment::EnrichmentGateway;
pub use history::HistoryLog;
pub use ranker::SimilarityRanker;
pub use resolver::TitleResolver;
pub use scorer::{TitleScorer, WeightedRatioScorer};
