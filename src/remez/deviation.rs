//! Weighted deviation of the cosine approximation over the whole grid.
//!
//! `E[k] = w_k · (d_k − Σ_{m=0}^{M} a_m cos(mπ f_k))`
use ndarray::{Array1, Array2};
use std::f64::consts::PI;

use crate::grid::Grid;

/// `(M + 1) × G` table of `cos(mπ f_k)`, built once per design call.
#[derive(Debug, Clone)]
pub struct CosineBasis {
    table: Array2<f64>,
}

impl CosineBasis {
    pub fn new(grid: &Grid, m: usize) -> Self {
        let freqs = grid.freqs();
        let table = Array2::from_shape_fn((m + 1, freqs.len()), |(j, k)| (j as f64 * PI * freqs[k]).cos());
        Self { table }
    }

    /// Number of coefficients the basis expects (`M + 1`).
    pub fn order(&self) -> usize {
        self.table.nrows()
    }

    /// Amplitude `Σ a_m cos(mπ f_k)` at every grid point.
    pub fn amplitude(&self, a: &Array1<f64>) -> Array1<f64> {
        self.table.t().dot(a)
    }
}

/// Weighted error curve of coefficients `a` over `grid`.
pub fn error_curve(a: &Array1<f64>, grid: &Grid, basis: &CosineBasis) -> Array1<f64> {
    let approx = basis.amplitude(a);
    (grid.desired() - &approx) * grid.weights()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build;
    use crate::normalize::NormalizedBand;
    use ndarray::array;

    fn one_band_grid() -> Grid {
        build(&[NormalizedBand { low: 0.0, high: 1.0 }], &[1.0], &[2.0], &[11], 0.0)
    }

    #[test]
    fn exact_fit_has_zero_error() {
        let grid = one_band_grid();
        let basis = CosineBasis::new(&grid, 3);
        let e = error_curve(&array![1.0, 0.0, 0.0, 0.0], &grid, &basis);
        assert!(e.iter().all(|v| v.abs() < 1e-15));
    }

    #[test]
    fn error_is_weighted() {
        let grid = one_band_grid();
        let basis = CosineBasis::new(&grid, 1);
        // A(f) = cos(πf): error at f = 0 is 2·(1 − 1), at f = 1 it is 2·(1 + 1)
        let e = error_curve(&array![0.0, 1.0], &grid, &basis);
        approx::assert_abs_diff_eq!(e[0], 0.0, epsilon = 1e-15);
        approx::assert_abs_diff_eq!(e[10], 4.0, epsilon = 1e-12);
        assert_eq!(basis.order(), 2);
    }
}
