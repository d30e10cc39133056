//! Online estimation of the feature-space centroid of a sample stream
//!
//! The estimator keeps a sparse dictionary of retained samples and a weight
//! vector `alpha` such that `Σ alpha[i] * φ(dictionary[i])` approximates the
//! mean of `φ(x)` over every sample trained so far. A new sample only joins
//! the dictionary when it is not approximately linearly dependent (ALD) on
//! the current dictionary in feature space, which bounds memory growth.
//!
//! References: the sparsification follows the ALD test of Engel et al.,
//! "The Kernel Recursive Least Squares Algorithm"; the distance formula is
//! the usual kernel expansion of `||φ(x) - μ||`.

use crate::core::{OneClassError, Result, SparseVector};
use crate::kernel::Kernel;
use crate::linalg;
use log::{debug, log_enabled, trace, warn, Level};
use ndarray::{aview1, Array1, Array2};
use serde::{Deserialize, Serialize};

/// Default ALD threshold
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Radicands below `-NEGATIVE_RADICAND_WARN * scale` are reported before
/// being clamped, since they point at more than rounding noise.
const NEGATIVE_RADICAND_WARN: f64 = 1e-8;

/// Online kernel centroid estimator for one-class novelty detection.
///
/// `score` returns the distance in feature space between a query and the
/// running centroid; larger means more novel. Turning that into a decision
/// is left to the caller.
///
/// Field order is the persisted layout and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneClass<K, S = SparseVector> {
    kernel: K,
    dictionary: Vec<S>,
    alpha: Vec<f64>,
    k_inv: Array2<f64>,
    k: Array2<f64>,
    tolerance: f64,
    samples_seen: u64,
    bias: f64,

    // Working buffers for `train`, sized on demand and not part of the state
    #[serde(skip)]
    a: Array1<f64>,
    #[serde(skip)]
    k_vec: Array1<f64>,
}

impl<K, S> OneClass<K, S>
where
    K: Kernel<S>,
    S: Clone,
{
    /// Create an empty estimator with the default tolerance of 0.001
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            dictionary: Vec::new(),
            alpha: Vec::new(),
            k_inv: Array2::zeros((0, 0)),
            k: Array2::zeros((0, 0)),
            tolerance: DEFAULT_TOLERANCE,
            samples_seen: 0,
            bias: 0.0,
            a: Array1::zeros(0),
            k_vec: Array1::zeros(0),
        }
    }

    /// Create an empty estimator with an explicit tolerance
    pub fn with_tolerance(kernel: K, tolerance: f64) -> Result<Self> {
        let mut estimator = Self::new(kernel);
        estimator.set_tolerance(tolerance)?;
        Ok(estimator)
    }

    /// Change the ALD threshold.
    ///
    /// Smaller values grow a larger, more exact dictionary. Past decisions
    /// are not revisited. The tolerance must be finite and strictly
    /// positive, otherwise the growth branch could divide by zero.
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(OneClassError::InvalidParameter(format!(
                "Tolerance must be positive and finite, got: {tolerance}"
            )));
        }
        self.tolerance = tolerance;
        Ok(())
    }

    /// Return to the empty state, keeping kernel and tolerance
    pub fn clear(&mut self) {
        self.dictionary.clear();
        self.alpha.clear();
        self.k_inv = Array2::zeros((0, 0));
        self.k = Array2::zeros((0, 0));
        self.samples_seen = 0;
        self.bias = 0.0;
    }

    /// Fold one sample into the centroid estimate.
    ///
    /// On error the estimator is left exactly as it was.
    ///
    /// # Errors
    /// - [`OneClassError::DegenerateKernel`] if this is the first sample and
    ///   `k(x, x)` is zero or not finite
    /// - [`OneClassError::NumericalError`] if any kernel evaluation against
    ///   the dictionary is not finite
    pub fn train(&mut self, x: &S) -> Result<()> {
        let kx = self.kernel.compute(x, x);

        if self.alpha.is_empty() {
            if kx == 0.0 || !kx.is_finite() {
                return Err(OneClassError::DegenerateKernel(kx));
            }

            self.k_inv = Array2::from_elem((1, 1), 1.0 / kx);
            self.k = Array2::from_elem((1, 1), kx);
            self.alpha.push(1.0);
            self.dictionary.push(x.clone());
            debug!("Dictionary seeded with first sample, k(x,x)={kx}");
        } else {
            if !kx.is_finite() {
                return Err(OneClassError::NumericalError(format!(
                    "k(x, x) is not finite: {kx}"
                )));
            }

            self.k_vec = self
                .dictionary
                .iter()
                .map(|basis| self.kernel.compute(x, basis))
                .collect();
            if let Some(bad) = self.k_vec.iter().find(|v| !v.is_finite()) {
                return Err(OneClassError::NumericalError(format!(
                    "Kernel value against dictionary is not finite: {bad}"
                )));
            }

            // ALD test: squared error of projecting φ(x) onto the dictionary span
            self.a = self.k_inv.dot(&self.k_vec);
            let delta = kx - self.k_vec.dot(&self.a);

            let n = self.samples_seen as f64;
            let alpha_scale = n / (n + 1.0);

            if delta.abs() > self.tolerance {
                self.grow(x, kx, delta, alpha_scale);
            } else {
                let a_scale = 1.0 - alpha_scale;
                for (alpha, &a) in self.alpha.iter_mut().zip(self.a.iter()) {
                    *alpha = alpha_scale * *alpha + a_scale * a;
                }
                trace!("Sample folded into dictionary, delta={delta:.3e}");
            }
        }

        let alpha = aview1(&self.alpha);
        self.bias = alpha.dot(&self.k.dot(&alpha));
        self.samples_seen += 1;
        trace!(
            "Trained sample {}: dictionary_size={}, bias={:.6}",
            self.samples_seen,
            self.dictionary.len(),
            self.bias
        );

        Ok(())
    }

    /// Append `x` to the dictionary and extend `K` and `K_inv` by one
    /// row/column. `self.a` and `self.k_vec` must hold the projection
    /// coefficients and kernel column for `x`.
    fn grow(&mut self, x: &S, kx: f64, delta: f64, alpha_scale: f64) {
        self.dictionary.push(x.clone());

        // Schur-complement block inverse
        let top_left = &self.k_inv + &(linalg::outer(self.a.view(), self.a.view()) / delta);
        let border = self.a.mapv(|ai| -ai / delta);
        self.k_inv = linalg::bordered(top_left.view(), border.view(), 1.0 / delta);

        self.k = linalg::bordered(self.k.view(), self.k_vec.view(), kx);

        for alpha in &mut self.alpha {
            *alpha *= alpha_scale;
        }
        self.alpha.push(1.0 - alpha_scale);

        debug!(
            "Dictionary grew to {} entries, delta={:.6e}",
            self.dictionary.len(),
            delta
        );
        if log_enabled!(Level::Trace) {
            trace!("K_inv residual after growth: {:.3e}", self.inverse_residual());
        }
    }

    /// Train on every sample in order, stopping at the first error
    pub fn train_batch<'s, I>(&mut self, samples: I) -> Result<()>
    where
        I: IntoIterator<Item = &'s S>,
        S: 's,
    {
        for sample in samples {
            self.train(sample)?;
        }
        Ok(())
    }

    /// Feature-space distance between `x` and the current centroid.
    ///
    /// Always `>= 0`: a radicand pushed slightly below zero by rounding is
    /// clamped. Before any training this is `sqrt(k(x, x))`.
    pub fn score(&self, x: &S) -> f64 {
        let temp: f64 = self
            .alpha
            .iter()
            .zip(&self.dictionary)
            .map(|(&alpha, basis)| alpha * self.kernel.compute(basis, x))
            .sum();

        let kx = self.kernel.compute(x, x);
        let radicand = kx + self.bias - 2.0 * temp;

        if radicand < 0.0 {
            let scale = kx.abs() + self.bias.abs() + 1.0;
            if radicand < -NEGATIVE_RADICAND_WARN * scale {
                warn!("Clamping negative radicand {radicand:.3e} to zero");
            }
            return 0.0;
        }

        radicand.sqrt()
    }

    /// Score every sample
    pub fn score_batch(&self, samples: &[S]) -> Vec<f64> {
        samples.iter().map(|x| self.score(x)).collect()
    }

    /// Exchange the full state of two estimators
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Largest entry of `|K_inv · K - I|`, a measure of drift in the
    /// incrementally maintained inverse
    pub fn inverse_residual(&self) -> f64 {
        let identity = Array2::eye(self.k.nrows());
        linalg::max_abs_diff(&self.k_inv.dot(&self.k), &identity)
    }

    /// Largest entry of `|K - Gram(dictionary)|` with the Gram matrix
    /// recomputed from scratch
    pub fn gram_residual(&self) -> f64 {
        let d = self.dictionary.len();
        let gram = Array2::from_shape_fn((d, d), |(r, c)| {
            self.kernel.compute(&self.dictionary[r], &self.dictionary[c])
        });
        linalg::max_abs_diff(&self.k, &gram)
    }
}

impl<K, S> OneClass<K, S> {
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn dictionary_size(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn dictionary(&self) -> &[S] {
        &self.dictionary
    }

    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Gram matrix `K` of the dictionary
    pub fn kernel_matrix(&self) -> &Array2<f64> {
        &self.k
    }

    /// Incrementally maintained inverse of `K`
    pub fn inverse_kernel_matrix(&self) -> &Array2<f64> {
        &self.k_inv
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Squared feature-space norm of the centroid, `alphaᵀ K alpha`
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Check that all per-entry state agrees on the dictionary size and
    /// that the tolerance is usable. Used after deserialization.
    pub fn validate(&self) -> Result<()> {
        let d = self.dictionary.len();
        if self.alpha.len() != d {
            return Err(OneClassError::InvalidModel(format!(
                "alpha has {} entries, dictionary has {d}",
                self.alpha.len()
            )));
        }
        for (name, m) in [("K", &self.k), ("K_inv", &self.k_inv)] {
            if m.nrows() != d || m.ncols() != d {
                return Err(OneClassError::InvalidModel(format!(
                    "{name} is {}x{}, expected {d}x{d}",
                    m.nrows(),
                    m.ncols()
                )));
            }
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(OneClassError::InvalidModel(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if d > 0 && self.samples_seen < d as u64 {
            return Err(OneClassError::InvalidModel(format!(
                "{} samples seen cannot produce {d} dictionary entries",
                self.samples_seen
            )));
        }
        Ok(())
    }
}
