use serde::{Deserialize, Serialize};

/// Supplementary fields fetched from the relational store
///
/// None of these exist in the frozen catalog snapshot; all are optional by
/// contract since enrichment is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedDetails {
    pub original_title: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub cast: Vec<CastMember>,
}

/// One cast/crew credit, ordered by the store's billing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub role: Option<String>,
    pub characters: Option<String>,
}

/// Outcome of an enrichment lookup
///
/// Store failures become `Degraded` rather than an error: the search
/// response must still succeed on catalog data alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    Enriched(ExtendedDetails),
    Degraded,
}

impl Enrichment {
    /// Whether the relational store could not be consulted
    pub fn is_degraded(&self) -> bool {
        matches!(self, Enrichment::Degraded)
    }

    /// Unwraps the details, substituting empty fields when degraded
    pub fn into_details(self) -> ExtendedDetails {
        match self {
            Enrichment::Enriched(details) => details,
            Enrichment::Degraded => ExtendedDetails::default(),
        }
    }
}
