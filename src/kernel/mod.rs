//! Kernel functions for the centroid estimator

pub mod linear;
pub mod polynomial;
pub mod rbf;
pub mod traits;

pub use self::linear::*;
pub use self::polynomial::*;
pub use self::rbf::*;
pub use self::traits::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime choice among the bundled kernels.
///
/// Persisted models carry their kernel, so a model trained with one kernel
/// type can be loaded without knowing it in advance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KernelType {
    Linear,
    Rbf(RBFKernel),
    Polynomial(PolynomialKernel),
}

impl Default for KernelType {
    fn default() -> Self {
        Self::Linear
    }
}

impl<S: InnerProductSpace + ?Sized> Kernel<S> for KernelType {
    fn compute(&self, x: &S, y: &S) -> f64 {
        match self {
            Self::Linear => LinearKernel.compute(x, y),
            Self::Rbf(k) => k.compute(x, y),
            Self::Polynomial(k) => k.compute(x, y),
        }
    }
}

impl From<LinearKernel> for KernelType {
    fn from(_: LinearKernel) -> Self {
        Self::Linear
    }
}

impl From<RBFKernel> for KernelType {
    fn from(k: RBFKernel) -> Self {
        Self::Rbf(k)
    }
}

impl From<PolynomialKernel> for KernelType {
    fn from(k: PolynomialKernel) -> Self {
        Self::Polynomial(k)
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Rbf(k) => write!(f, "rbf (gamma={})", k.gamma()),
            Self::Polynomial(k) => write!(
                f,
                "polynomial (degree={}, gamma={}, coef0={})",
                k.degree, k.gamma, k.coef0
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SparseVector;

    #[test]
    fn test_kernel_type_dispatch() {
        let x = SparseVector::new(vec![0], vec![1.0]);
        let y = SparseVector::new(vec![0], vec![3.0]);

        let linear: KernelType = LinearKernel::new().into();
        assert_eq!(linear.compute(&x, &y), 3.0);

        let rbf: KernelType = RBFKernel::new(0.25).into();
        assert!((rbf.compute(&x, &y) - (-1.0_f64).exp()).abs() < 1e-12);

        let poly: KernelType = PolynomialKernel::quadratic(1.0).into();
        assert_eq!(poly.compute(&x, &y), 16.0);
    }

    #[test]
    fn test_kernel_type_serde_tagging() {
        let rbf: KernelType = RBFKernel::new(0.5).into();
        let json = serde_json::to_string(&rbf).expect("serialize");
        assert_eq!(json, r#"{"type":"rbf","gamma":0.5}"#);

        let back: KernelType = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rbf);

        let linear: KernelType = serde_json::from_str(r#"{"type":"linear"}"#).expect("linear");
        assert_eq!(linear, KernelType::default());
    }

    #[test]
    fn test_kernel_type_display() {
        assert_eq!(KernelType::default().to_string(), "linear");
        let rbf: KernelType = RBFKernel::new(2.0).into();
        assert_eq!(rbf.to_string(), "rbf (gamma=2)");
    }
}
