//! Band specification and Nyquist normalisation.
//!
//! `normalize_bands` maps Hz-domain band edges onto `[0, 1]`, where `1` is
//! the Nyquist frequency `fs / 2`:
//!   low_norm  = low_hz  / (fs / 2)
//!   high_norm = high_hz / (fs / 2)
use serde::{Deserialize, Serialize};

use crate::error::{DesignError, Result};

/// One band of a piecewise-constant amplitude specification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower edge in Hz.
    pub low_hz: f64,
    /// Upper edge in Hz.
    pub high_hz: f64,
    /// Desired amplitude across the band (typically 0 or 1).
    pub desired: f64,
    /// Relative weight; larger weight tightens this band's ripple.
    pub weight: f64,
}

impl Band {
    pub fn new(low_hz: f64, high_hz: f64, desired: f64, weight: f64) -> Self {
        Self { low_hz, high_hz, desired, weight }
    }
}

/// A complete filter request: tap count, sampling rate and bands.
///
/// Bands are expected in ascending, non-overlapping order.  This is not
/// checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Number of taps, `2M + 1` (must be odd).
    pub numtaps: usize,
    /// Sampling rate in Hz.
    pub fs: f64,
    pub bands: Vec<Band>,
}

impl FilterSpec {
    /// Assemble a spec from parallel lists, the way `remez`-style APIs take
    /// them: `bands[i] = (low_hz, high_hz)` with `desired[i]` and `weights[i]`.
    ///
    /// ```
    /// use equiripple::FilterSpec;
    /// let spec = FilterSpec::from_lists(
    ///     101, 4096.0,
    ///     &[(0.0, 500.0), (600.0, 2048.0)],
    ///     &[1.0, 0.0],
    ///     &[1.0, 10.0],
    /// ).unwrap();
    /// assert_eq!(spec.half_order(), 50);
    /// ```
    pub fn from_lists(
        numtaps: usize,
        fs: f64,
        bands: &[(f64, f64)],
        desired: &[f64],
        weights: &[f64],
    ) -> Result<Self> {
        if desired.len() != bands.len() || weights.len() != bands.len() {
            return Err(DesignError::InvalidSpec(format!(
                "{} bands but {} desired values and {} weights",
                bands.len(),
                desired.len(),
                weights.len()
            )));
        }
        let bands = bands
            .iter()
            .zip(desired)
            .zip(weights)
            .map(|((&(lo, hi), &d), &w)| Band::new(lo, hi, d, w))
            .collect();
        let spec = Self { numtaps, fs, bands };
        spec.validate()?;
        Ok(spec)
    }

    /// Half order `M = (numtaps - 1) / 2`.
    pub fn half_order(&self) -> usize {
        self.numtaps.saturating_sub(1) / 2
    }

    /// Check everything the designer relies on.  Nothing is computed for an
    /// invalid spec.
    pub fn validate(&self) -> Result<()> {
        if self.numtaps == 0 || self.numtaps % 2 == 0 {
            return Err(DesignError::InvalidSpec(format!(
                "numtaps must be odd and positive, got {}",
                self.numtaps
            )));
        }
        normalize_bands(&self.bands, self.fs)?;
        for (i, b) in self.bands.iter().enumerate() {
            if !b.desired.is_finite() {
                return Err(DesignError::InvalidSpec(format!("band {i}: desired amplitude is not finite")));
            }
            if !(b.weight.is_finite() && b.weight > 0.0) {
                return Err(DesignError::InvalidSpec(format!(
                    "band {i}: weight must be positive, got {}",
                    b.weight
                )));
            }
        }
        Ok(())
    }

    pub fn desired(&self) -> Vec<f64> {
        self.bands.iter().map(|b| b.desired).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.bands.iter().map(|b| b.weight).collect()
    }
}

/// Band edges normalised to the Nyquist frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBand {
    pub low: f64,
    pub high: f64,
}

impl NormalizedBand {
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Divide every band edge by `fs / 2`.
///
/// Fails if `fs` is not a positive finite number, if a band is inverted or
/// empty (`low >= high`), or if an edge lies outside `[0, fs / 2]`.
pub fn normalize_bands(bands: &[Band], fs: f64) -> Result<Vec<NormalizedBand>> {
    if !(fs.is_finite() && fs > 0.0) {
        return Err(DesignError::InvalidSpec(format!("sampling rate must be positive, got {fs}")));
    }
    if bands.is_empty() {
        return Err(DesignError::InvalidSpec("no bands given".into()));
    }
    let nyq = fs / 2.0;
    bands
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if !(b.low_hz < b.high_hz) {
                return Err(DesignError::InvalidSpec(format!(
                    "band {i}: low edge {} Hz is not below high edge {} Hz",
                    b.low_hz, b.high_hz
                )));
            }
            if b.low_hz < 0.0 || b.high_hz > nyq {
                return Err(DesignError::InvalidSpec(format!(
                    "band {i}: [{}, {}] Hz lies outside [0, {nyq}] Hz",
                    b.low_hz, b.high_hz
                )));
            }
            Ok(NormalizedBand { low: b.low_hz / nyq, high: b.high_hz / nyq })
        })
        .collect()
}
