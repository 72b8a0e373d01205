use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

/// One row of the TF-IDF matrix: (column, weight) pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Self {
        Self { indices, values }
    }

    /// Number of non-zero terms
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Dot product via merge join over the sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0_f32;
        let (mut i, mut j) = (0, 0);

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Euclidean (L2) norm
    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}

/// On-disk shape of the frozen matrix artifact
#[derive(Debug, Deserialize)]
pub struct MatrixArtifact {
    /// Vocabulary size from the offline vectorizer
    pub cols: usize,
    pub rows: Vec<SparseVector>,
}

/// The frozen TF-IDF matrix, one row per catalog entry
///
/// Row order matches the catalog entry order exactly; `CatalogStore`
/// enforces the count half of that invariant at load. Never mutated at
/// request time, so it is shared across requests without locking.
#[derive(Debug)]
pub struct FeatureMatrix {
    cols: usize,
    rows: Vec<SparseVector>,
    /// Precomputed row norms; the similarity scan divides by these on
    /// every request
    norms: Vec<f32>,
}

impl FeatureMatrix {
    /// Validates row shape and precomputes norms
    ///
    /// Rejects rows whose index lists are unsorted, duplicated, length
    /// mismatched against their values, or out of vocabulary bounds.
    pub fn from_rows(cols: usize, rows: Vec<SparseVector>) -> anyhow::Result<Self> {
        for (row_idx, row) in rows.iter().enumerate() {
            ensure!(
                row.indices.len() == row.values.len(),
                "matrix row {}: {} indices but {} values",
                row_idx,
                row.indices.len(),
                row.values.len()
            );

            for pair in row.indices.windows(2) {
                if pair[0] >= pair[1] {
                    bail!("matrix row {}: column indices not strictly ascending", row_idx);
                }
            }

            if let Some(&last) = row.indices.last() {
                ensure!(
                    (last as usize) < cols,
                    "matrix row {}: column {} out of bounds for {} terms",
                    row_idx,
                    last,
                    cols
                );
            }
        }

        let norms = rows.iter().map(SparseVector::norm).collect();

        Ok(Self { cols, rows, norms })
    }

    pub fn from_artifact(artifact: MatrixArtifact) -> anyhow::Result<Self> {
        Self::from_rows(artifact.cols, artifact.rows)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vocabulary size
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, index: usize) -> &SparseVector {
        &self.rows[index]
    }

    /// Cosine similarity between two rows; 0.0 when either row is all-zero
    pub fn cosine(&self, a: usize, b: usize) -> f32 {
        let denom = self.norms[a] * self.norms[b];
        if denom < f32::EPSILON {
            return 0.0;
        }
        self.rows[a].dot(&self.rows[b]) / denom
    }

    /// Cosine similarity of one row against every row, in row order
    ///
    /// O(rows x nnz); runs synchronously within a single request.
    pub fn similarities(&self, index: usize) -> Vec<f32> {
        (0..self.rows.len()).map(|j| self.cosine(index, j)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(u32, f32)]) -> SparseVector {
        SparseVector::new(
            pairs.iter().map(|&(i, _)| i).collect(),
            pairs.iter().map(|&(_, v)| v).collect(),
        )
    }

    #[test]
    fn test_dot_merges_sorted_indices() {
        let a = row(&[(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = row(&[(1, 4.0), (2, 5.0), (5, 6.0)]);
        assert_eq!(a.dot(&b), 2.0 * 5.0 + 3.0 * 6.0);
    }

    #[test]
    fn test_cosine_of_identical_rows_is_one() {
        let matrix = FeatureMatrix::from_rows(
            4,
            vec![row(&[(0, 0.5), (3, 1.5)]), row(&[(0, 0.5), (3, 1.5)])],
        )
        .unwrap();
        assert!((matrix.cosine(0, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_of_disjoint_rows_is_zero() {
        let matrix =
            FeatureMatrix::from_rows(4, vec![row(&[(0, 1.0)]), row(&[(1, 1.0)])]).unwrap();
        assert_eq!(matrix.cosine(0, 1), 0.0);
    }

    #[test]
    fn test_all_zero_row_has_zero_similarity() {
        let matrix =
            FeatureMatrix::from_rows(4, vec![row(&[(0, 1.0)]), SparseVector::default()]).unwrap();
        assert_eq!(matrix.cosine(0, 1), 0.0);
        assert_eq!(matrix.cosine(1, 1), 0.0);
    }

    #[test]
    fn test_rejects_unsorted_indices() {
        let bad = SparseVector::new(vec![3, 1], vec![1.0, 2.0]);
        assert!(FeatureMatrix::from_rows(4, vec![bad]).is_err());
    }

    #[test]
    fn test_rejects_out_of_bounds_column() {
        let bad = row(&[(9, 1.0)]);
        assert!(FeatureMatrix::from_rows(4, vec![bad]).is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let bad = SparseVector::new(vec![0, 1], vec![1.0]);
        assert!(FeatureMatrix::from_rows(4, vec![bad]).is_err());
    }

    #[test]
    fn test_similarities_covers_every_row() {
        let matrix = FeatureMatrix::from_rows(
            3,
            vec![
                row(&[(0, 1.0), (1, 1.0)]),
                row(&[(0, 1.0)]),
                row(&[(2, 1.0)]),
            ],
        )
        .unwrap();

        let sims = matrix.similarities(0);
        assert_eq!(sims.len(), 3);
        assert!((sims[0] - 1.0).abs() < 1e-6);
        assert!((sims[1] - (1.0 / 2.0_f32.sqrt())).abs() < 1e-6);
        assert_eq!(sims[2], 0.0);
    }
}
