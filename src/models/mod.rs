pub mod enrichment;
pub mod history;
pub mod movie;

pub use enrichment::{CastMember, Enrichment, ExtendedDetails};
pub use history::{HistoryRecord, WriteOutcome};
pub use movie::{CatalogEntry, MatchStrategy, ResolvedMatch, SimilarityResult};
