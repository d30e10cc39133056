//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (γ * <x, y> + r)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - r (coef0): independent term in the polynomial
//! - d (degree): degree of the polynomial

use crate::kernel::{InnerProductSpace, Kernel};
use serde::{Deserialize, Serialize};

/// Polynomial kernel with configurable degree, gamma, and coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialKernel {
    /// Scaling factor for the dot product (default: 1.0)
    pub gamma: f64,
    /// Independent term in the polynomial (default: 1.0)
    pub coef0: f64,
    /// Degree of the polynomial (default: 3)
    pub degree: u32,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Examples
    /// ```
    /// use kcentroid::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(2, 1.0, 1.0);
    /// assert_eq!(quad_kernel.degree, 2);
    /// ```
    ///
    /// # Panics
    /// Panics if degree is zero or gamma is not positive
    pub fn new(degree: u32, gamma: f64, coef0: f64) -> Self {
        assert!(degree > 0, "Polynomial degree must be positive");
        assert!(gamma > 0.0, "Gamma must be positive");

        Self {
            gamma,
            coef0,
            degree,
        }
    }

    /// Creates a quadratic kernel: (γ * <x,y> + 1)²
    pub fn quadratic(gamma: f64) -> Self {
        Self::new(2, gamma, 1.0)
    }

    /// Creates a cubic kernel: (γ * <x,y> + 1)³
    pub fn cubic(gamma: f64) -> Self {
        Self::new(3, gamma, 1.0)
    }

    /// Creates a polynomial kernel with gamma = 1.0 / n_features
    pub fn auto(degree: u32, n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(degree, 1.0 / n_features as f64, 1.0)
    }
}

impl Default for PolynomialKernel {
    fn default() -> Self {
        Self::cubic(1.0)
    }
}

impl<S: InnerProductSpace + ?Sized> Kernel<S> for PolynomialKernel {
    fn compute(&self, x: &S, y: &S) -> f64 {
        let base = self.gamma * x.inner(y) + self.coef0;
        match i32::try_from(self.degree) {
            Ok(degree) => base.powi(degree),
            // Past i32::MAX powi cannot take the exponent; keep the sign of
            // odd powers by hand since powf of a negative base is NaN
            Err(_) => {
                let magnitude = base.abs().powf(f64::from(self.degree));
                if base < 0.0 && self.degree % 2 == 1 {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SparseVector;

    #[test]
    fn test_polynomial_kernel_creation() {
        let kernel = PolynomialKernel::new(3, 0.5, 2.0);
        assert_eq!(kernel.degree, 3);
        assert_eq!(kernel.gamma, 0.5);
        assert_eq!(kernel.coef0, 2.0);
    }

    #[test]
    fn test_named_constructors() {
        let quad = PolynomialKernel::quadratic(2.0);
        assert_eq!((quad.degree, quad.gamma, quad.coef0), (2, 2.0, 1.0));

        let cubic = PolynomialKernel::cubic(1.0);
        assert_eq!(cubic.degree, 3);
        assert_eq!(PolynomialKernel::default(), cubic);

        assert_eq!(PolynomialKernel::auto(2, 4).gamma, 0.25);
    }

    #[test]
    fn test_polynomial_kernel_computation() {
        let kernel = PolynomialKernel::quadratic(1.0);
        let x = SparseVector::new(vec![0, 1], vec![1.0, 2.0]);
        let y = SparseVector::new(vec![0, 1], vec![3.0, 4.0]);

        // (1*3 + 2*4 + 1)² = 144
        assert_eq!(kernel.compute(&x, &y), 144.0);
    }

    #[test]
    fn test_polynomial_kernel_scalars() {
        let kernel = PolynomialKernel::new(3, 0.5, 0.0);
        // (0.5 * 2 * 4)³ = 64
        assert_eq!(kernel.compute(&2.0_f64, &4.0), 64.0);
    }

    #[test]
    fn test_polynomial_kernel_negative_base() {
        let kernel = PolynomialKernel::new(3, 1.0, 0.0);
        let x: Vec<f64> = vec![1.0];
        let y: Vec<f64> = vec![-2.0];
        assert_eq!(kernel.compute(&x, &y), -8.0);
    }

    #[test]
    fn test_huge_degree_keeps_its_sign() {
        let x = [1.0_f64];
        let half = PolynomialKernel::new(u32::MAX, 0.5, 0.0);
        assert_eq!(half.compute(&x[..], &x[..]), 0.0);

        let one = PolynomialKernel::new(u32::MAX, 1.0, 0.0);
        assert_eq!(one.compute(&x[..], &x[..]), 1.0);

        let minus_one = PolynomialKernel::new(u32::MAX, 1.0, -2.0);
        assert_eq!(minus_one.compute(&x[..], &x[..]), -1.0);

        let even = PolynomialKernel::new(u32::MAX - 1, 1.0, -2.0);
        assert_eq!(even.compute(&x[..], &x[..]), 1.0);
    }

    #[test]
    #[should_panic(expected = "Polynomial degree must be positive")]
    fn test_invalid_degree() {
        PolynomialKernel::new(0, 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "Gamma must be positive")]
    fn test_invalid_gamma() {
        PolynomialKernel::new(2, 0.0, 1.0);
    }
}
