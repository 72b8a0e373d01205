pub mod matrix;
pub mod store;

pub use matrix::{FeatureMatrix, MatrixArtifact, SparseVector};
pub use store::CatalogStore;
