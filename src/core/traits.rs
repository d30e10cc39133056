//! Core traits for the estimator

use crate::core::SparseVector;

/// Dataset abstraction for sequential training and batch scoring
pub trait Dataset: Send + Sync {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// All samples in file order
    fn samples(&self) -> &[SparseVector];

    /// Per-sample labels, if the source carried any.
    ///
    /// Labels are never used for training; scoring groups its summary by
    /// label so scores can be compared against a ground truth.
    fn labels(&self) -> Option<&[f64]>;

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
