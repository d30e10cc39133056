//! High-level API for training and scoring
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kcentroid::api::{summarize, Trainer};
//! use kcentroid::kernel::RBFKernel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Trainer::with_kernel(RBFKernel::new(0.5))
//!     .with_tolerance(0.01)
//!     .train_from_file("normal.libsvm")?;
//!
//! let scores = kcentroid::api::score_file(&model, "incoming.libsvm")?;
//! println!("{:?}", summarize(&scores));
//! # Ok(())
//! # }
//! ```

use crate::core::{Dataset, OneClassError, Result, SparseVector};
use crate::data::LibSVMDataset;
use crate::kernel::{Kernel, LinearKernel};
use crate::oneclass::{OneClass, DEFAULT_TOLERANCE};
use log::info;
use std::path::Path;

/// Builder for [`OneClass`] estimators over sparse samples
#[derive(Debug, Clone)]
pub struct Trainer<K = LinearKernel> {
    kernel: K,
    tolerance: f64,
}

impl Trainer<LinearKernel> {
    /// Linear kernel with default tolerance
    pub fn new() -> Self {
        Self::with_kernel(LinearKernel::new())
    }
}

impl Default for Trainer<LinearKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kernel<SparseVector>> Trainer<K> {
    /// Use a custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the ALD tolerance, validated when training starts
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Train on every sample of a dataset, in order
    pub fn train<D: Dataset>(self, dataset: &D) -> Result<OneClass<K>> {
        self.train_samples(dataset.samples())
    }

    /// Train on samples, in order
    pub fn train_samples(self, samples: &[SparseVector]) -> Result<OneClass<K>> {
        if samples.is_empty() {
            return Err(OneClassError::EmptyDataset);
        }

        let mut model = OneClass::with_tolerance(self.kernel, self.tolerance)?;
        model.train_batch(samples)?;

        info!(
            "Trained on {} samples, dictionary size {}",
            model.samples_seen(),
            model.dictionary_size()
        );
        Ok(model)
    }

    /// Train from LibSVM format file
    pub fn train_from_file<P: AsRef<Path>>(self, path: P) -> Result<OneClass<K>> {
        let dataset = LibSVMDataset::from_file(path)?;
        self.train(&dataset)
    }
}

/// Score every sample of a dataset
pub fn score_dataset<K, D>(model: &OneClass<K>, dataset: &D) -> Vec<f64>
where
    K: Kernel<SparseVector>,
    D: Dataset,
{
    model.score_batch(dataset.samples())
}

/// Score every sample of a LibSVM file
pub fn score_file<K, P>(model: &OneClass<K>, path: P) -> Result<Vec<f64>>
where
    K: Kernel<SparseVector>,
    P: AsRef<Path>,
{
    let dataset = LibSVMDataset::from_file(path)?;
    Ok(score_dataset(model, &dataset))
}

/// Descriptive statistics over a batch of scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summarize scores, `None` for an empty batch
pub fn summarize(scores: &[f64]) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    Some(ScoreSummary {
        count: scores.len(),
        min,
        max,
        mean,
    })
}

/// Summarize scores separately for every distinct label, in ascending
/// label order. `scores` and `labels` are paired by position.
pub fn summarize_by_label(scores: &[f64], labels: &[f64]) -> Vec<(f64, ScoreSummary)> {
    let mut distinct = labels.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();

    distinct
        .into_iter()
        .filter_map(|label| {
            let group: Vec<f64> = scores
                .iter()
                .zip(labels)
                .filter(|&(_, &l)| l == label)
                .map(|(&score, _)| score)
                .collect();
            summarize(&group).map(|summary| (label, summary))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::RBFKernel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_trainer_builder() {
        let trainer = Trainer::new().with_tolerance(0.05);
        assert_eq!(trainer.tolerance, 0.05);

        let default = Trainer::default();
        assert_eq!(default.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_train_samples_centroid() {
        let samples = vec![
            SparseVector::new(vec![0], vec![2.0]),
            SparseVector::new(vec![0], vec![4.0]),
        ];
        let model = Trainer::new().train_samples(&samples).unwrap();

        assert_eq!(model.dictionary_size(), 1);
        let centre = SparseVector::new(vec![0], vec![3.0]);
        assert_eq!(model.score(&centre), 0.0);
    }

    #[test]
    fn test_invalid_tolerance_surfaces_on_train() {
        let samples = vec![SparseVector::new(vec![0], vec![1.0])];
        let result = Trainer::new().with_tolerance(-1.0).train_samples(&samples);
        assert!(matches!(result, Err(OneClassError::InvalidParameter(_))));
    }

    #[test]
    fn test_empty_training_set() {
        let result = Trainer::new().train_samples(&[]);
        assert!(matches!(result, Err(OneClassError::EmptyDataset)));
    }

    #[test]
    fn test_file_workflow() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "1:1.0 2:1.0").expect("Failed to write");
        writeln!(temp_file, "1:1.1 2:0.9").expect("Failed to write");
        writeln!(temp_file, "1:0.9 2:1.1").expect("Failed to write");
        temp_file.flush().expect("Failed to flush");

        let model = Trainer::with_kernel(RBFKernel::new(0.5))
            .train_from_file(temp_file.path())
            .expect("Training should succeed");
        assert_eq!(model.samples_seen(), 3);

        let scores = score_file(&model, temp_file.path()).expect("Scoring should succeed");
        assert_eq!(scores.len(), 3);

        let far = SparseVector::new(vec![0, 1], vec![-5.0, -5.0]);
        let summary = summarize(&scores).unwrap();
        assert!(model.score(&far) > summary.max);
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&[]), None);

        let summary = summarize(&[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.mean, 2.0);
    }

    #[test]
    fn test_summarize_by_label() {
        let scores = [0.5, 4.0, 1.5, 6.0, 1.0];
        let labels = [1.0, -1.0, 1.0, -1.0, 1.0];

        let groups = summarize_by_label(&scores, &labels);
        assert_eq!(groups.len(), 2);

        let (label, outliers) = groups[0];
        assert_eq!(label, -1.0);
        assert_eq!(outliers.count, 2);
        assert_eq!(outliers.mean, 5.0);

        let (label, inliers) = groups[1];
        assert_eq!(label, 1.0);
        assert_eq!(inliers.count, 3);
        assert_eq!(inliers.min, 0.5);
        assert_eq!(inliers.max, 1.5);

        assert!(summarize_by_label(&[], &[]).is_empty());
    }
}
