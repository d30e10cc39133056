//! Linear kernel implementation

use crate::kernel::{InnerProductSpace, Kernel};
use serde::{Deserialize, Serialize};

/// Linear kernel: K(x, y) = x^T * y
///
/// Its feature map is the identity, so the centroid tracked by the
/// estimator is the plain arithmetic mean of the inputs. That makes it the
/// kernel of choice for checking results by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearKernel;

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self
    }
}

impl<S: InnerProductSpace + ?Sized> Kernel<S> for LinearKernel {
    fn compute(&self, x: &S, y: &S) -> f64 {
        x.inner(y)
    }
}
