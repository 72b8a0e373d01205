use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context};

use crate::catalog::matrix::{FeatureMatrix, MatrixArtifact};
use crate::models::CatalogEntry;

/// Immutable snapshot of the movie catalog and its aligned feature matrix
///
/// Loaded exactly once at process start from the frozen artifact pair and
/// shared read-only across all requests. The constructor is the only way to
/// pair entries with matrix rows, so entry `i` always owns matrix row `i`.
/// Any catalog change means producing a new artifact and restarting.
#[derive(Debug)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    matrix: FeatureMatrix,
}

impl CatalogStore {
    /// Loads the artifact pair from disk, failing fast on any defect
    ///
    /// The process must not serve if either file is missing or the row
    /// alignment does not hold.
    pub fn load(catalog_path: &Path, matrix_path: &Path) -> anyhow::Result<Self> {
        let catalog_file = File::open(catalog_path)
            .with_context(|| format!("opening catalog artifact {}", catalog_path.display()))?;
        let entries: Vec<CatalogEntry> = serde_json::from_reader(BufReader::new(catalog_file))
            .with_context(|| format!("decoding catalog artifact {}", catalog_path.display()))?;

        let matrix_file = File::open(matrix_path)
            .with_context(|| format!("opening matrix artifact {}", matrix_path.display()))?;
        let artifact: MatrixArtifact = serde_json::from_reader(BufReader::new(matrix_file))
            .with_context(|| format!("decoding matrix artifact {}", matrix_path.display()))?;
        let matrix = FeatureMatrix::from_artifact(artifact)?;

        Self::from_parts(entries, matrix)
    }

    /// Pairs an entry sequence with its feature matrix
    ///
    /// Enforces the two catalog invariants: entry count equals matrix row
    /// count, and identifiers are unique.
    pub fn from_parts(entries: Vec<CatalogEntry>, matrix: FeatureMatrix) -> anyhow::Result<Self> {
        ensure!(
            entries.len() == matrix.len(),
            "catalog has {} entries but matrix has {} rows",
            entries.len(),
            matrix.len()
        );

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            ensure!(
                seen.insert(entry.tconst.as_str()),
                "duplicate catalog identifier {}",
                entry.tconst
            );
        }

        Ok(Self { entries, matrix })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entry at a resolved index; resolver/ranker indices are always valid
    /// by construction
    pub fn entry(&self, index: usize) -> &CatalogEntry {
        &self.entries[index]
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
