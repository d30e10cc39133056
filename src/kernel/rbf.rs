//! RBF (Radial Basis Function) kernel implementation
//!
//! The RBF kernel is defined as: K(x, y) = exp(-γ * ||x - y||²)
//! where γ (gamma) is a hyperparameter that controls the kernel width.

use crate::kernel::{InnerProductSpace, Kernel};
use serde::{Deserialize, Serialize};

/// RBF (Radial Basis Function) kernel: K(x, y) = exp(-γ * ||x - y||²)
///
/// K(x, x) is always 1, so every sample lies on the unit sphere in feature
/// space and the first training call can never hit a degenerate kernel.
/// The gamma parameter controls how quickly similarity decays:
/// - High gamma: the dictionary grows quickly, fine-grained novelty scores
/// - Low gamma: few dictionary entries, smooth scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RBFKernel {
    gamma: f64,
}

impl RBFKernel {
    /// Create a new RBF kernel with specified gamma parameter
    ///
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 0.0, "Gamma must be positive, got: {}", gamma);
        Self { gamma }
    }

    /// Create RBF kernel with gamma = 1.0 / n_features
    pub fn with_auto_gamma(n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(1.0 / n_features as f64)
    }

    /// Create RBF kernel with gamma = 1.0
    pub fn unit_gamma() -> Self {
        Self::new(1.0)
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Default for RBFKernel {
    fn default() -> Self {
        Self::unit_gamma()
    }
}

impl<S: InnerProductSpace + ?Sized> Kernel<S> for RBFKernel {
    fn compute(&self, x: &S, y: &S) -> f64 {
        (-self.gamma * x.squared_distance(y)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SparseVector;

    #[test]
    fn test_rbf_kernel_creation() {
        assert_eq!(RBFKernel::new(0.5).gamma(), 0.5);
        assert_eq!(RBFKernel::with_auto_gamma(10).gamma(), 0.1);
        assert_eq!(RBFKernel::unit_gamma().gamma(), 1.0);
        assert_eq!(RBFKernel::default().gamma(), 1.0);
    }

    #[test]
    #[should_panic(expected = "Gamma must be positive")]
    fn test_rbf_kernel_invalid_gamma() {
        RBFKernel::new(-0.5);
    }

    #[test]
    #[should_panic(expected = "Number of features must be positive")]
    fn test_rbf_kernel_zero_features() {
        RBFKernel::with_auto_gamma(0);
    }

    #[test]
    fn test_rbf_kernel_identical_vectors() {
        let kernel = RBFKernel::new(1.0);
        let x = SparseVector::new(vec![0, 1, 2], vec![1.0, 2.0, 3.0]);
        assert!((kernel.compute(&x, &x) - 1.0).abs() < 1e-10);
        assert_eq!(kernel.compute(&7.5_f64, &7.5), 1.0);
    }

    #[test]
    fn test_rbf_kernel_orthogonal_vectors() {
        let kernel = RBFKernel::new(1.0);
        let x = SparseVector::new(vec![0, 2], vec![1.0, 1.0]);
        let y = SparseVector::new(vec![1, 3], vec![1.0, 1.0]);

        // ||x - y||² = 4 with no overlap
        let expected = (-4.0_f64).exp();
        assert!((kernel.compute(&x, &y) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rbf_kernel_scalars_decay_with_distance() {
        let kernel = RBFKernel::new(0.5);
        let k1 = kernel.compute(&0.0_f64, &1.0);
        let k2 = kernel.compute(&0.0_f64, &2.0);
        assert!(k1 > k2);
        assert!((k1 - (-0.5_f64).exp()).abs() < 1e-12);
        assert!((k2 - (-2.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_rbf_kernel_symmetry() {
        let kernel = RBFKernel::new(0.5);
        let x = vec![1.0_f64, 0.0, 2.0];
        let y = vec![1.0_f64, 2.0];
        assert_eq!(kernel.compute(&x, &y), kernel.compute(&y, &x));
    }

    #[test]
    fn test_rbf_kernel_numerical_stability() {
        let kernel = RBFKernel::new(1e-6);
        let result = kernel.compute(&1e6_f64, &-1e6);
        assert!(result.is_finite());
        assert!((0.0..=1.0).contains(&result));
    }
}
