//! Reference system solve.
//!
//! At the `n = M + 2` reference frequencies `ω_k` the approximation must hit
//! the desired value up to an alternating weighted ripple:
//!
//! ```text
//!   Σ_{m=0}^{M} a_m cos(mπω_k) + (−1)^k δ / w_k = d_k      k = 0..n
//! ```
//!
//! Nearly coincident reference frequencies make this system close to
//! singular, so it is regularised (`A + εI`) and solved as the damped
//! least-squares problem
//!
//! ```text
//!   ⎡ A + εI ⎤ x ≈ ⎡ d ⎤
//!   ⎣  √ε I  ⎦     ⎣ 0 ⎦
//! ```
use nalgebra::{DMatrix, DVector};
use ndarray::{s, Array1, Array2, ArrayView1};
use std::f64::consts::PI;

use crate::error::{DesignError, Result};

/// Relative size below which a singular value counts as zero.
const RANK_TOL: f64 = 1e-13;

/// Solve the regularised reference system.
///
/// `freqs`, `desired` and `weights` are the grid values at the reference
/// indices (all of length `m + 2`).  Returns `(a[0..=m], δ)`.
pub fn solve_reference_system(
    freqs: ArrayView1<f64>,
    desired: ArrayView1<f64>,
    weights: ArrayView1<f64>,
    m: usize,
    epsilon: f64,
) -> Result<(Array1<f64>, f64)> {
    let n = m + 2;
    if freqs.len() != n || desired.len() != n || weights.len() != n {
        return Err(DesignError::NumericalFailure(format!(
            "reference set has {} points, expected {n}",
            freqs.len()
        )));
    }

    let mut a = Array2::<f64>::zeros((2 * n, n));
    let mut rhs = Array1::<f64>::zeros(2 * n);
    for k in 0..n {
        for j in 0..=m {
            a[[k, j]] = (j as f64 * PI * freqs[k]).cos();
        }
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        a[[k, m + 1]] = sign / weights[k];
        a[[k, k]] += epsilon;
        rhs[k] = desired[k];
    }
    let damping = epsilon.sqrt();
    for k in 0..n {
        a[[n + k, k]] = damping;
    }

    let x = least_squares(a, rhs)?;
    let delta = x[m + 1];
    Ok((x.slice(s![..=m]).to_owned(), delta))
}

/// Minimise `‖A x − b‖₂` for a tall (`rows ≥ cols`) matrix via the SVD
/// of `A` (nalgebra, pure Rust).
///
/// Fails on non-finite input or when `A` is numerically rank deficient,
/// i.e. its smallest singular value is below `RANK_TOL` times the largest.
pub fn least_squares(a: Array2<f64>, b: Array1<f64>) -> Result<Array1<f64>> {
    let (rows, cols) = a.dim();
    if rows < cols || b.len() != rows {
        return Err(DesignError::NumericalFailure(format!(
            "least squares needs a tall system, got {rows}x{cols} with rhs {}",
            b.len()
        )));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(DesignError::NumericalFailure("system contains non-finite values".into()));
    }

    let m = DMatrix::from_fn(rows, cols, |i, j| a[[i, j]]);
    let rhs = DVector::from_iterator(rows, b.iter().copied());
    let svd = m.svd(true, true);

    let s_max = svd.singular_values.max();
    let s_min = svd.singular_values.min();
    if s_max == 0.0 {
        return Err(DesignError::NumericalFailure("system matrix is zero".into()));
    }
    if s_min <= RANK_TOL * s_max {
        return Err(DesignError::NumericalFailure(format!(
            "system is rank deficient (singular values {s_min:.3e} .. {s_max:.3e})"
        )));
    }

    let x = svd
        .solve(&rhs, RANK_TOL * s_max)
        .map_err(|e| DesignError::NumericalFailure(e.to_string()))?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(DesignError::NumericalFailure("solution is not finite".into()));
    }
    Ok(x.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn square_system_exact() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![3.0, 5.0];
        let x = least_squares(a, b).unwrap();
        approx::assert_abs_diff_eq!(x[0], 0.8, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn overdetermined_fits_line() {
        // y = 1 + 2t sampled without noise
        let a = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let b = array![1.0, 3.0, 5.0, 7.0];
        let x = least_squares(a, b).unwrap();
        approx::assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn inconsistent_system_gets_least_squares_fit() {
        // best constant through 1, 2, 6 is their mean
        let a = array![[1.0], [1.0], [1.0]];
        let b = array![1.0, 2.0, 6.0];
        let x = least_squares(a, b).unwrap();
        approx::assert_abs_diff_eq!(x[0], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn damped_rows_keep_singular_system_solvable() {
        // two identical rows: singular on its own, full rank once √ε·I is stacked
        let eps: f64 = 1e-6;
        let d = eps.sqrt();
        let a = array![[1.0 + eps, 1.0], [1.0, 1.0 + eps], [d, 0.0], [0.0, d]];
        let b = array![2.0, 2.0, 0.0, 0.0];
        let x = least_squares(a, b).unwrap();
        approx::assert_abs_diff_eq!(x[0], x[1], epsilon = 1e-9);
        approx::assert_abs_diff_eq!(x[0] + x[1], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn rank_deficient_is_reported() {
        let a = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let b = array![1.0, 2.0, 3.0];
        assert!(matches!(least_squares(a, b), Err(DesignError::NumericalFailure(_))));
    }

    #[test]
    fn non_finite_is_reported() {
        let a = array![[1.0, f64::NAN], [0.0, 1.0]];
        let b = array![1.0, 1.0];
        assert!(least_squares(a, b).is_err());
    }

    #[test]
    fn repeated_reference_frequency_solves() {
        // the same frequency twice, once on each side of the ripple
        let freqs = array![0.0, 0.3, 0.3, 1.0];
        let desired = array![1.0, 1.0, 0.0, 0.0];
        let weights = array![1.0, 1.0, 1.0, 1.0];
        let (a, delta) =
            solve_reference_system(freqs.view(), desired.view(), weights.view(), 2, 1e-6).unwrap();
        assert_eq!(a.len(), 3);
        assert!(delta.is_finite());
    }

    #[test]
    fn alternation_matches_delta() {
        // M = 1, fit a constant 0.5 at three points: a0 = 0.5, δ = 0
        let freqs = array![0.0, 0.5, 1.0];
        let desired = array![0.5, 0.5, 0.5];
        let weights = array![1.0, 1.0, 1.0];
        let (a, delta) =
            solve_reference_system(freqs.view(), desired.view(), weights.view(), 1, 1e-12).unwrap();
        approx::assert_abs_diff_eq!(a[0], 0.5, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(a[1], 0.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(delta, 0.0, epsilon = 1e-6);
    }
}
