/// Shared helpers for design tests.
use equiripple::{amplitude_response, FilterSpec};

/// 101-tap lowpass at 4096 Hz, stopband weighted 10×.
#[allow(unused)]
pub fn lowpass_spec() -> FilterSpec {
    FilterSpec::from_lists(101, 4096.0, &[(0.0, 500.0), (600.0, 2048.0)], &[1.0, 0.0], &[1.0, 10.0])
        .expect("valid lowpass spec")
}

/// 101-tap bandpass at 4096 Hz, stopbands weighted 10×.
#[allow(unused)]
pub fn bandpass_spec() -> FilterSpec {
    FilterSpec::from_lists(
        101,
        4096.0,
        &[(0.0, 520.0), (600.0, 1420.0), (1500.0, 2048.0)],
        &[0.0, 1.0, 0.0],
        &[10.0, 1.0, 10.0],
    )
    .expect("valid bandpass spec")
}

#[allow(unused)]
/// `n` evenly spaced normalised frequencies covering `[lo_hz, hi_hz]`.
pub fn band_freqs(lo_hz: f64, hi_hz: f64, fs: f64, n: usize) -> Vec<f64> {
    let nyq = fs / 2.0;
    (0..n)
        .map(|i| (lo_hz + (hi_hz - lo_hz) * i as f64 / (n - 1) as f64) / nyq)
        .collect()
}

#[allow(unused)]
/// Largest `|A(f) − desired|` over `[lo_hz, hi_hz]`, sampled densely.
pub fn max_band_deviation(taps: &[f64], fs: f64, lo_hz: f64, hi_hz: f64, desired: f64) -> f64 {
    let freqs = band_freqs(lo_hz, hi_hz, fs, 4001);
    amplitude_response(taps, &freqs)
        .iter()
        .map(|a| (a - desired).abs())
        .fold(0.0_f64, f64::max)
}

#[allow(unused)]
/// Exact mirror symmetry `h[k] == h[N−1−k]`.
pub fn assert_symmetric(taps: &[f64]) {
    let n = taps.len();
    for k in 0..n / 2 {
        assert!(taps[k] == taps[n - 1 - k], "h[{k}]={} ≠ h[{}]={}", taps[k], n - 1 - k, taps[n - 1 - k]);
    }
}

#[allow(unused)]
/// Route `tracing` output to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
