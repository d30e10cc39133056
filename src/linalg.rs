//! Dense matrix helpers on top of `ndarray`
//!
//! The Gram matrix and its inverse only ever grow by one bordered
//! row/column; everything else is plain `ndarray` arithmetic.

use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};

/// Grow an `n x n` block into a fresh `(n+1) x (n+1)` matrix.
///
/// The old block is copied into the top-left corner, `border` becomes both
/// the new last row and last column, and `corner` the new diagonal entry.
///
/// # Panics
/// Panics if `top_left` is not square or `border.len()` differs from its
/// size
pub fn bordered(top_left: ArrayView2<f64>, border: ArrayView1<f64>, corner: f64) -> Array2<f64> {
    let n = top_left.nrows();
    assert_eq!(top_left.ncols(), n, "Only square matrices can be bordered");
    assert_eq!(border.len(), n, "Border length must match matrix size");

    let mut grown = Array2::zeros((n + 1, n + 1));
    grown.slice_mut(s![..n, ..n]).assign(&top_left);
    grown.slice_mut(s![..n, n]).assign(&border);
    grown.slice_mut(s![n, ..n]).assign(&border);
    grown[(n, n)] = corner;
    grown
}

/// Outer product `a bᵀ`
pub fn outer(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Array2<f64> {
    a.insert_axis(Axis(1)).dot(&b.insert_axis(Axis(0)))
}

/// Largest absolute entry-wise difference, `inf` on shape mismatch
pub fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    if a.shape() != b.shape() {
        return f64::INFINITY;
    }
    (a - b).fold(0.0, |max, v| f64::max(max, v.abs()))
}
