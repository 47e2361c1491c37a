//! Cosine coefficients → symmetric (type-I linear-phase) taps.
//!
//!   h[M]     = a[0]
//!   h[M ± k] = a[k] / 2      k = 1..=M
use ndarray::ArrayView1;

/// Expand `a[0..=M]` into the `2M + 1` tap impulse response.
///
/// Symmetry is exact: both halves are written from the same value.
pub fn synthesize_taps(a: ArrayView1<f64>) -> Vec<f64> {
    if a.is_empty() {
        return vec![];
    }
    let m = a.len() - 1;
    let mut h = vec![0.0; 2 * m + 1];
    h[m] = a[0];
    for k in 1..=m {
        let v = a[k] / 2.0;
        h[m + k] = v;
        h[m - k] = v;
    }
    h
}
