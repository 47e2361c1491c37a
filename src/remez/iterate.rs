//! The Remez exchange loop.
//!
//! ```text
//!   reference ─► solve (a, δ) ─► error curve ─► select extrema ─┐
//!       ▲                                                        │
//!       └──────────── adopt new extrema (unless converged) ◄────┘
//! ```
use ndarray::{Array1, Axis};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use super::convergence::ConvergenceChecker;
use super::deviation::{error_curve, CosineBasis};
use super::extrema::select_extrema;
use super::solve::solve_reference_system;
use crate::config::RemezParams;
use crate::error::{DesignError, Result};
use crate::filter::taps::synthesize_taps;
use crate::grid::Grid;
use crate::normalize::{normalize_bands, FilterSpec};
use crate::reference::{initial_reference, resolve_collisions};

/// Outcome of one exchange loop, in cosine-coefficient space.
#[derive(Debug, Clone, PartialEq)]
pub struct RemezRun {
    /// `a[0..=M]` of the last solve.
    pub coefficients: Array1<f64>,
    /// Signed ripple of the last solve.
    pub delta: f64,
    pub converged: bool,
    /// δ of every iteration that ran, in order.
    pub delta_history: Vec<f64>,
}

impl RemezRun {
    pub fn iterations(&self) -> usize {
        self.delta_history.len()
    }
}

/// A designed filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RemezDesign {
    /// Symmetric impulse response, `numtaps` long.
    pub taps: Vec<f64>,
    /// Cosine coefficients the taps were expanded from.
    pub coefficients: Vec<f64>,
    /// Signed ripple δ; `|δ|` is the weighted equiripple error.
    pub ripple: f64,
    /// Whether the exchange settled.  A `false` design is still usable but
    /// carries no optimality guarantee.
    pub converged: bool,
    pub delta_history: Vec<f64>,
    pub iterations: usize,
}

impl From<RemezRun> for RemezDesign {
    fn from(run: RemezRun) -> Self {
        let taps = synthesize_taps(run.coefficients.view());
        let iterations = run.iterations();
        Self {
            taps,
            coefficients: run.coefficients.to_vec(),
            ripple: run.delta,
            converged: run.converged,
            delta_history: run.delta_history,
            iterations,
        }
    }
}

/// Design a filter with a single exchange run.
///
/// Normalises the bands, builds the grid, seeds the reference set with
/// Chebyshev nodes and runs [`run_remez`].  Non-convergence is reported in
/// the result, not as an error.
///
/// # Errors
///
/// * [`DesignError::InvalidSpec`] for an unusable spec or `max_iterations == 0`.
/// * [`DesignError::GridTooSmall`] if the grid has fewer than `M + 2` points.
/// * [`DesignError::NumericalFailure`] if a regularised solve fails.
pub fn remez_taps(spec: &FilterSpec, params: &RemezParams) -> Result<RemezDesign> {
    spec.validate()?;
    let bands = normalize_bands(&spec.bands, spec.fs)?;
    let m = spec.half_order();
    let grid = Grid::for_design(&bands, &spec.desired(), &spec.weights(), m, params)?;

    let required = m + 2;
    if grid.len() < required {
        return Err(DesignError::GridTooSmall { points: grid.len(), required });
    }
    debug!(numtaps = spec.numtaps, m, grid_points = grid.len(), epsilon = params.epsilon, "starting exchange");

    let mut reference = initial_reference(grid.len(), required);
    if params.dedup_initial_reference {
        reference = resolve_collisions(&reference, grid.len());
    }

    run_remez(&grid, reference, m, params).map(RemezDesign::from)
}

/// Run the exchange loop on a prepared grid from `reference` (`M + 2`
/// indices).
///
/// Stops as soon as the convergence rule holds, after `max_iterations`, or
/// when `params.time_budget` runs out; the last two return the latest
/// coefficients with `converged = false`.
pub fn run_remez(grid: &Grid, reference: Vec<usize>, m: usize, params: &RemezParams) -> Result<RemezRun> {
    if params.max_iterations == 0 {
        return Err(DesignError::InvalidSpec("max_iterations must be at least 1".into()));
    }
    let required = m + 2;
    if reference.len() != required || reference.iter().any(|&i| i >= grid.len()) {
        return Err(DesignError::InvalidSpec(format!(
            "reference set must hold {required} indices below {}",
            grid.len()
        )));
    }

    let deadline = params.time_budget.map(|budget| Instant::now() + budget);
    let checker = ConvergenceChecker { tol: params.convergence_tol, min_iterations: params.min_iterations };
    let basis = CosineBasis::new(grid, m);

    let mut reference = reference;
    let mut prev_delta: Option<f64> = None;
    let mut delta_history = Vec::with_capacity(params.max_iterations);
    let mut latest: Option<(Array1<f64>, f64)> = None;

    for iteration in 1..=params.max_iterations {
        if iteration > 1 && deadline.is_some_and(|d| Instant::now() >= d) {
            warn!(iteration, "time budget exhausted, stopping exchange");
            break;
        }

        let (a, delta) = solve_reference_system(
            grid.freqs().select(Axis(0), &reference).view(),
            grid.desired().select(Axis(0), &reference).view(),
            grid.weights().select(Axis(0), &reference).view(),
            m,
            params.epsilon,
        )?;
        delta_history.push(delta);

        let error = error_curve(&a, grid, &basis);
        let candidates = select_extrema(error.view(), required);
        let converged = checker.is_converged(iteration, &reference, &candidates, delta, prev_delta);
        trace!(iteration, delta, same_reference = reference == candidates, "exchange step");

        if converged {
            info!(iteration, ripple = delta.abs(), "exchange converged");
            return Ok(RemezRun { coefficients: a, delta, converged: true, delta_history });
        }

        latest = Some((a, delta));
        reference = candidates;
        prev_delta = Some(delta);
    }

    // At least one iteration always runs, so `latest` is set here.
    let (coefficients, delta) = latest
        .ok_or_else(|| DesignError::NumericalFailure("exchange produced no iterations".into()))?;
    debug!(iterations = delta_history.len(), ripple = delta.abs(), "exchange stopped without converging");
    Ok(RemezRun { coefficients, delta, converged: false, delta_history })
}
