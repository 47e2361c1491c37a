//! Frequency response of a symmetric tap array.
//!
//! `amplitude_response` evaluates the real zero-phase amplitude
//!   A(f) = h[M] + 2 Σ_{k=1}^{M} h[M+k] cos(kπ f)
//! exactly at arbitrary normalised frequencies (`1` = Nyquist).
//!
//! `magnitude_response_db` is the usual FFT view: zero-pad to `nfft`,
//! transform, keep the one-sided half and convert to dB.
use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

use crate::error::{DesignError, Result};

/// Floor of the dB conversion, so exact zeros do not become `-inf`.
const DB_FLOOR: f64 = -300.0;

/// Zero-phase amplitude of odd-length symmetric taps at normalised
/// frequencies `freqs`.
pub fn amplitude_response(taps: &[f64], freqs: &[f64]) -> Vec<f64> {
    if taps.is_empty() {
        return vec![0.0; freqs.len()];
    }
    let m = (taps.len() - 1) / 2;
    freqs
        .iter()
        .map(|&f| {
            (1..=m).fold(taps[m], |acc, k| acc + 2.0 * taps[m + k] * (k as f64 * PI * f).cos())
        })
        .collect()
}

/// One-sided magnitude response in dB.
///
/// Returns `(freqs_hz, magnitude_db)`, both `nfft / 2 + 1` long, with
/// `freqs_hz[i] = i · fs / nfft`.
pub fn magnitude_response_db(taps: &[f64], fs: f64, nfft: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    if !(fs.is_finite() && fs > 0.0) {
        return Err(DesignError::InvalidSpec(format!("sampling rate must be positive, got {fs}")));
    }
    if nfft == 0 || nfft < taps.len() {
        return Err(DesignError::InvalidSpec(format!(
            "nfft = {nfft} is shorter than the {} taps",
            taps.len()
        )));
    }

    let mut buf: Vec<Complex<f64>> = taps
        .iter()
        .map(|&v| Complex { re: v, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(nfft)
        .collect();
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    planner.plan_fft_forward(nfft).process(&mut buf);

    let n_half = nfft / 2 + 1;
    let freqs = (0..n_half).map(|i| i as f64 * fs / nfft as f64).collect();
    let db = buf[..n_half]
        .iter()
        .map(|c| (20.0 * c.norm().log10()).max(DB_FLOOR))
        .collect();
    Ok((freqs, db))
}
