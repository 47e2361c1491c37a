//! Non-uniform frequency grid for the Chebyshev approximation.
//!
//! Each band gets a share of the total points proportional to its width,
//! laid out uniformly from edge to edge.  A short "skirt" of extra points is
//! added just outside both edges, carrying the band's own desired value and
//! weight, so the optimiser also penalises error right next to the band and
//! the transition sharpens:
//!
//! ```text
//!   skirt        core (P points)          skirt
//!  |·····|·  ·  ·  ·  ·  ·  ·  ·  ·  ·|·····|
//!  low-m low                       high  high+m
//! ```
use ndarray::Array1;

use crate::config::RemezParams;
use crate::error::Result;
use crate::normalize::NormalizedBand;

/// Fraction of a band's core points used for each skirt.
const SKIRT_FRACTION: f64 = 0.22;

/// Discretised frequency axis with per-point desired value and weight.
///
/// Frequencies are normalised (`1` = Nyquist), strictly increasing and
/// unique.  A grid is built once per design call and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    freqs: Array1<f64>,
    desired: Array1<f64>,
    weights: Array1<f64>,
}

impl Grid {
    /// Allocate and build the grid for a half-order `m` design.
    ///
    /// Fails only when the requested grid size is unusable (see
    /// [`RemezParams::grid_points`]).
    pub fn for_design(
        bands: &[NormalizedBand],
        desired: &[f64],
        weights: &[f64],
        m: usize,
        params: &RemezParams,
    ) -> Result<Grid> {
        let points = allocate_points(bands, params.grid_points(m)?, params.min_points_per_band);
        Ok(build(bands, desired, weights, &points, params.edge_margin))
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn freqs(&self) -> &Array1<f64> {
        &self.freqs
    }

    pub fn desired(&self) -> &Array1<f64> {
        &self.desired
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }
}

/// Split `total` grid points across `bands` in proportion to bandwidth.
///
/// Every band receives `max(min_per_band, round(total · bw / Σbw))`; the
/// first band absorbs the rounding remainder so the counts always sum to
/// `total`.  If the remainder would drive the first band negative it is
/// clamped at zero and the rest is taken from the following bands.
pub fn allocate_points(bands: &[NormalizedBand], total: usize, min_per_band: usize) -> Vec<usize> {
    if bands.is_empty() {
        return vec![];
    }
    let total_bw: f64 = bands.iter().map(NormalizedBand::width).sum();
    let mut pts: Vec<i64> = bands
        .iter()
        .map(|b| {
            let share = (total as f64 * b.width() / total_bw).round() as i64;
            share.max(min_per_band as i64)
        })
        .collect();

    let remainder = total as i64 - pts.iter().sum::<i64>();
    pts[0] += remainder;

    // Remainder larger than the first band: spill over to the next ones.
    let mut deficit = (-pts[0]).max(0);
    pts[0] = pts[0].max(0);
    for p in pts.iter_mut().skip(1) {
        if deficit == 0 {
            break;
        }
        let take = deficit.min(*p);
        *p -= take;
        deficit -= take;
    }

    pts.into_iter().map(|p| p as usize).collect()
}

/// Lay out core and skirt points for every band, drop repeated frequencies
/// (first occurrence wins) and sort ascending.
pub fn build(
    bands: &[NormalizedBand],
    desired: &[f64],
    weights: &[f64],
    points_per_band: &[usize],
    edge_margin: f64,
) -> Grid {
    let mut points: Vec<(f64, f64, f64)> = Vec::new();

    for (((band, &d), &w), &p) in bands.iter().zip(desired).zip(weights).zip(points_per_band) {
        let margin = edge_margin * band.width();
        let n_edge = ((SKIRT_FRACTION * p as f64).round() as usize).max(2);

        let left = linspace((band.low - margin).max(0.0), band.low, n_edge);
        let core = linspace(band.low, band.high, p);
        let right = linspace(band.high, (band.high + margin).min(1.0), n_edge);

        points.extend(left.chain(core).chain(right).map(|f| (f, d, w)));
    }

    // Stable sort keeps insertion order among equal frequencies, so the
    // dedup below retains the first occurrence.
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points.dedup_by(|next, kept| next.0 == kept.0);

    let freqs = points.iter().map(|p| p.0).collect();
    let desired = points.iter().map(|p| p.1).collect();
    let weights = points.iter().map(|p| p.2).collect();
    Grid { freqs, desired, weights }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.  The last
/// value is exactly `stop`.
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (stop - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| if n > 1 && i == n - 1 { stop } else { start + step * i as f64 })
}
