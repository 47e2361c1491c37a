//! Design parameters.
//!
//! [`RemezParams`] holds every tunable of a single Remez exchange run and
//! [`AdaptiveSchedule`] the starting point and length of the retry schedule
//! used by [`design_adaptive`](crate::design_adaptive).  All fields have
//! defaults that design typical lowpass/bandpass filters in one stage.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{DesignError, Result};

/// Largest core grid a design may request.
pub const MAX_GRID_POINTS: usize = 1 << 24;

/// Parameters of one Remez exchange run.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use equiripple::RemezParams;
///
/// let params = RemezParams {
///     epsilon:        1e-5,  // stronger regularisation
///     max_iterations: 200,
///     ..RemezParams::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemezParams {
    /// Tikhonov regularisation added to the reference system.
    ///
    /// `ε·I` is added to the system matrix and `√ε·I` is stacked below it
    /// before the least-squares solve, which keeps nearly coincident
    /// reference frequencies solvable.
    ///
    /// Default: `1e-6`.
    pub epsilon: f64,

    /// Grid density multiplier.
    ///
    /// The grid holds `max(200, grid_density × (M + 1))` core points, split
    /// across bands in proportion to their bandwidth.
    ///
    /// Default: `20`.
    pub grid_density: usize,

    /// Width of the guard skirt on each side of a band, as a fraction of the
    /// band's own width.
    ///
    /// Default: `0.001`.
    pub edge_margin: f64,

    /// Upper bound on exchange iterations.
    ///
    /// Default: `100`.
    pub max_iterations: usize,

    /// Smallest number of core grid points any band receives.
    ///
    /// Default: `10`.
    pub min_points_per_band: usize,

    /// Relative ripple change below which δ counts as stable.
    ///
    /// Default: `1e-4`.
    pub convergence_tol: f64,

    /// First (1-based) iteration at which convergence may be declared.
    ///
    /// Default: `5`.
    pub min_iterations: usize,

    /// Move colliding initial reference indices to the nearest free slot.
    ///
    /// Collisions only happen on very small grids.  Off by default, which
    /// hands the raw Chebyshev-node mapping to the first solve.
    pub dedup_initial_reference: bool,

    /// Wall-clock budget for the run, checked once per iteration.
    ///
    /// When exceeded the loop stops and the current result is returned with
    /// `converged = false`.
    ///
    /// Default: `None` (unbounded).
    pub time_budget: Option<Duration>,
}

impl Default for RemezParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            grid_density: 20,
            edge_margin: 0.001,
            max_iterations: 100,
            min_points_per_band: 10,
            convergence_tol: 1e-4,
            min_iterations: 5,
            dedup_initial_reference: false,
            time_budget: None,
        }
    }
}

impl RemezParams {
    /// Total number of core grid points for a half-order `m`.
    ///
    /// ```
    /// use equiripple::RemezParams;
    /// let params = RemezParams::default();
    /// assert_eq!(params.grid_points(50), Ok(1020));  // 20 × 51
    /// assert_eq!(params.grid_points(4), Ok(200));    // floor of 200
    /// ```
    ///
    /// # Errors
    ///
    /// [`DesignError::InvalidSpec`] if `grid_density × (m + 1)` overflows or
    /// exceeds [`MAX_GRID_POINTS`].
    pub fn grid_points(&self, m: usize) -> Result<usize> {
        self.grid_density
            .checked_mul(m + 1)
            .filter(|&n| n <= MAX_GRID_POINTS)
            .map(|n| n.max(200))
            .ok_or_else(|| {
                DesignError::InvalidSpec(format!(
                    "grid_density {} is too large for {} coefficients (limit {MAX_GRID_POINTS} points)",
                    self.grid_density,
                    m + 1
                ))
            })
    }
}

/// Escalation schedule of the adaptive designer.
///
/// Stage `i` (0-based) runs with `epsilon = initial_epsilon × 10^i` and
/// `edge_margin = min(0.015, initial_edge_margin × 1.5^i)`; the grid
/// density never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveSchedule {
    /// Regularisation of the first stage.  Default: `1e-6`.
    pub initial_epsilon: f64,
    /// Grid density of every stage.  Default: `20`.
    pub initial_grid_density: usize,
    /// Edge margin of the first stage.  Default: `0.001`.
    pub initial_edge_margin: f64,
    /// Number of stages before giving up.  Default: `5`.
    pub max_stages: usize,
    /// Exchange iterations per stage.  Default: `100`.
    pub max_iterations: usize,
    /// Wall-clock budget shared by all stages.  Default: `None`.
    pub time_budget: Option<Duration>,
}

/// Ceiling of the edge margin escalation.
pub const MAX_EDGE_MARGIN: f64 = 0.015;

impl Default for AdaptiveSchedule {
    fn default() -> Self {
        Self {
            initial_epsilon: 1e-6,
            initial_grid_density: 20,
            initial_edge_margin: 0.001,
            max_stages: 5,
            max_iterations: 100,
            time_budget: None,
        }
    }
}

impl AdaptiveSchedule {
    /// Parameters of the first stage.
    pub fn first_stage(&self) -> RemezParams {
        RemezParams {
            epsilon: self.initial_epsilon,
            grid_density: self.initial_grid_density,
            edge_margin: self.initial_edge_margin,
            max_iterations: self.max_iterations,
            ..RemezParams::default()
        }
    }

    /// Parameters of stage `stage` (0-based), applying the escalation rule
    /// `stage` times to the first stage.
    ///
    /// ```
    /// use equiripple::AdaptiveSchedule;
    /// let p = AdaptiveSchedule::default().stage_params(2);
    /// assert!((p.epsilon - 1e-4).abs() < 1e-18);
    /// assert!((p.edge_margin - 0.00225).abs() < 1e-12);
    /// ```
    pub fn stage_params(&self, stage: usize) -> RemezParams {
        (0..stage).fold(self.first_stage(), |p, _| escalate(&p))
    }
}

/// One escalation step: ten times the regularisation, 1.5× the edge margin
/// (capped at [`MAX_EDGE_MARGIN`]), same grid density.
pub fn escalate(params: &RemezParams) -> RemezParams {
    RemezParams {
        epsilon: params.epsilon * 10.0,
        edge_margin: (params.edge_margin * 1.5).min(MAX_EDGE_MARGIN),
        ..params.clone()
    }
}
