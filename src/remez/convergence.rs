//! Convergence test of the exchange loop.
//!
//! A run has converged when, in the same iteration,
//!   • the newly selected extrema equal the current reference set, and
//!   • `| |δ| − |δ_prev| | / |δ| < tol`,
//! and at least `min_iterations` iterations have run.

/// Stopping rule for [`run_remez`](super::run_remez).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceChecker {
    pub tol: f64,
    pub min_iterations: usize,
}

impl Default for ConvergenceChecker {
    fn default() -> Self {
        Self { tol: 1e-4, min_iterations: 5 }
    }
}

impl ConvergenceChecker {
    /// `iteration` is 1-based.  `prev_delta` is `None` on the first
    /// iteration, which therefore never counts as ripple-stable.
    pub fn is_converged(
        &self,
        iteration: usize,
        reference: &[usize],
        candidates: &[usize],
        delta: f64,
        prev_delta: Option<f64>,
    ) -> bool {
        iteration >= self.min_iterations
            && reference == candidates
            && prev_delta.is_some_and(|p| self.ripple_stable(delta, p))
    }

    /// Relative change of the ripple magnitude is below `tol`.  A zero or
    /// non-finite ripple is never stable.
    pub fn ripple_stable(&self, delta: f64, prev_delta: f64) -> bool {
        let change = (delta.abs() - prev_delta.abs()).abs() / delta.abs();
        change < self.tol
    }
}
