//! Kernel trait definition

use crate::core::SparseVector;
use ndarray::aview1;

/// Kernel function trait
///
/// A kernel function K(x, y) is assumed to be symmetric and positive
/// semi-definite (Mercer's condition). Neither property is checked.
///
/// The trait is generic over the sample type so that the same kernel value
/// can be used with scalars, dense slices or sparse vectors.
pub trait Kernel<S: ?Sized>: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &S, y: &S) -> f64;
}

/// Sample types that the bundled kernels can operate on.
///
/// Dense vectors of unequal length are treated as if the shorter one were
/// padded with zeros, matching the semantics of [`SparseVector`].
pub trait InnerProductSpace {
    /// Inner product <x, y>
    fn inner(&self, other: &Self) -> f64;

    /// Squared Euclidean distance ||x - y||²
    fn squared_distance(&self, other: &Self) -> f64;
}

impl InnerProductSpace for f64 {
    fn inner(&self, other: &Self) -> f64 {
        self * other
    }

    fn squared_distance(&self, other: &Self) -> f64 {
        (self - other) * (self - other)
    }
}

impl InnerProductSpace for [f64] {
    fn inner(&self, other: &Self) -> f64 {
        // Missing trailing entries are zero and contribute nothing
        let n = self.len().min(other.len());
        aview1(&self[..n]).dot(&aview1(&other[..n]))
    }

    fn squared_distance(&self, other: &Self) -> f64 {
        let n = self.len().min(other.len());
        let shared: f64 = self[..n]
            .iter()
            .zip(&other[..n])
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        let tail: f64 = self[n..]
            .iter()
            .chain(&other[n..])
            .map(|v| v * v)
            .sum();
        shared + tail
    }
}

impl InnerProductSpace for Vec<f64> {
    fn inner(&self, other: &Self) -> f64 {
        self.as_slice().inner(other.as_slice())
    }

    fn squared_distance(&self, other: &Self) -> f64 {
        self.as_slice().squared_distance(other.as_slice())
    }
}

impl InnerProductSpace for SparseVector {
    fn inner(&self, other: &Self) -> f64 {
        self.dot(other)
    }

    fn squared_distance(&self, other: &Self) -> f64 {
        SparseVector::squared_distance(self, other)
    }
}

/// Adapter that turns a plain function or closure into a [`Kernel`].
///
/// ```
/// use kcentroid::kernel::{FnKernel, Kernel};
///
/// let k = FnKernel::new(|a: &f64, b: &f64| a * b);
/// assert_eq!(k.compute(&2.0, &3.0), 6.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnKernel<F> {
    f: F,
}

impl<F> FnKernel<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<S: ?Sized, F> Kernel<S> for FnKernel<F>
where
    F: Fn(&S, &S) -> f64 + Send + Sync,
{
    fn compute(&self, x: &S, y: &S) -> f64 {
        (self.f)(x, y)
    }
}
