//! Online kernel centroid estimation for one-class novelty detection
//!
//! Tracks the center of mass of a sample stream in a kernel feature space
//! using a sparse dictionary selected by the approximate linear dependence
//! test of Engel et al., "The Kernel Recursive Least Squares Algorithm".

pub mod api;
pub mod core;
pub mod data;
pub mod kernel;
pub mod linalg;
pub mod oneclass;
pub mod persistence;

// Re-export main types for convenience
pub use crate::api::{ScoreSummary, Trainer};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{OneClassError, Result};
pub use crate::data::LibSVMDataset;
pub use crate::kernel::{Kernel, KernelType, LinearKernel, PolynomialKernel, RBFKernel};
pub use crate::oneclass::OneClass;
pub use crate::persistence::{decode, encode, ModelFile};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
