//! Adaptive retry around the exchange loop.
//!
//! A stage that does not converge, or whose regularised solve fails, is
//! retried with ten times the regularisation and a 1.5× wider guard skirt
//! (see [`AdaptiveSchedule`]).  After the last stage the latest usable
//! design is returned even if it never converged; check
//! [`RemezDesign::converged`] when a guarantee is needed.
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{escalate, AdaptiveSchedule, RemezParams};
use crate::error::{DesignError, Result};
use crate::normalize::FilterSpec;
use crate::remez::{remez_taps, RemezDesign};

/// Result of [`design_adaptive`].
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveDesign {
    /// The design that was returned: the converged one, or the last usable
    /// attempt.
    pub design: RemezDesign,
    /// 1-based number of the stage that produced `design`.
    pub stage: usize,
    /// Number of stages that ran in total.
    pub stages_run: usize,
    /// Parameters of the stage that produced `design`.
    pub params: RemezParams,
}

impl AdaptiveDesign {
    pub fn converged(&self) -> bool {
        self.design.converged
    }

    pub fn taps(&self) -> &[f64] {
        &self.design.taps
    }

    /// How many times the parameters were escalated before `design` was
    /// produced.
    pub fn escalations(&self) -> usize {
        self.stage - 1
    }
}

/// Design with the default single-run designer as the stage.
///
/// # Errors
///
/// Invalid specifications and undersized grids are returned at once.  A
/// numerical failure is returned only if no stage produced a design.
pub fn design_adaptive(spec: &FilterSpec, schedule: &AdaptiveSchedule) -> Result<AdaptiveDesign> {
    design_adaptive_with(spec, schedule, remez_taps)
}

/// Run the escalation schedule with a caller-supplied stage.
///
/// `stage` receives the spec and the parameters of the current stage and
/// returns a design; only [`DesignError::NumericalFailure`] is treated as a
/// retryable stage failure.
pub fn design_adaptive_with<F>(
    spec: &FilterSpec,
    schedule: &AdaptiveSchedule,
    mut stage: F,
) -> Result<AdaptiveDesign>
where
    F: FnMut(&FilterSpec, &RemezParams) -> Result<RemezDesign>,
{
    spec.validate()?;
    if schedule.max_stages == 0 {
        return Err(DesignError::InvalidSpec("max_stages must be at least 1".into()));
    }
    let deadline = schedule.time_budget.map(|budget| Instant::now() + budget);

    let mut params = schedule.first_stage();
    let mut best: Option<AdaptiveDesign> = None;
    let mut last_error: Option<DesignError> = None;
    let mut stages_run = 0;

    for index in 0..schedule.max_stages {
        let number = index + 1;
        if let Some(d) = deadline {
            let now = Instant::now();
            if index > 0 && now >= d {
                warn!(stage = number, "time budget exhausted, no further stages");
                break;
            }
            params.time_budget = Some(d.saturating_duration_since(now));
        }

        stages_run = number;
        match stage(spec, &params) {
            Ok(design) if design.converged => {
                info!(stage = number, epsilon = params.epsilon, iterations = design.iterations, "design converged");
                return Ok(AdaptiveDesign { design, stage: number, stages_run: number, params });
            }
            Ok(design) => {
                warn!(
                    stage = number,
                    epsilon = params.epsilon,
                    edge_margin = params.edge_margin,
                    "stage did not converge, escalating"
                );
                best = Some(AdaptiveDesign { design, stage: number, stages_run: number, params: params.clone() });
            }
            Err(err @ DesignError::NumericalFailure(_)) => {
                warn!(stage = number, epsilon = params.epsilon, error = %err, "stage failed, escalating");
                last_error = Some(err);
            }
            Err(err) => return Err(err),
        }

        params = escalate(&params);
    }

    match (best, last_error) {
        (Some(design), _) => {
            warn!(stages_run, stage = design.stage, "returning non-converged design");
            Ok(AdaptiveDesign { stages_run, ..design })
        }
        (None, Some(err)) => Err(err),
        (None, None) => Err(DesignError::NumericalFailure("no stage ran".into())),
    }
}
