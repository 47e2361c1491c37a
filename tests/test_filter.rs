mod common;
use common::{assert_symmetric, bandpass_spec, init_tracing, lowpass_spec, max_band_deviation};
use equiripple::{design_adaptive, magnitude_response_db, remez_taps, AdaptiveSchedule, RemezParams};

// ── Lowpass ──────────────────────────────────────────────────────────────────

#[test]
fn lowpass_converges_within_iteration_limit() {
    init_tracing();
    let d = remez_taps(&lowpass_spec(), &RemezParams::default()).unwrap();
    assert!(d.converged, "no convergence after {} iterations", d.iterations);
    assert!(d.iterations <= 100);
    assert!(d.iterations >= 5, "converged at iteration {}", d.iterations);
    assert_eq!(d.delta_history.len(), d.iterations);
}

#[test]
fn lowpass_taps_symmetric() {
    let out = design_adaptive(&lowpass_spec(), &AdaptiveSchedule::default()).unwrap();
    assert_eq!(out.taps().len(), 101);
    assert_symmetric(out.taps());
}

#[test]
fn lowpass_ripple_within_reported_delta() {
    let out = design_adaptive(&lowpass_spec(), &AdaptiveSchedule::default()).unwrap();
    assert!(out.converged());
    let delta = out.design.ripple.abs();
    assert!(delta > 0.0 && delta < 0.1, "|δ| = {delta}");

    let pass = max_band_deviation(out.taps(), 4096.0, 0.0, 500.0, 1.0);
    assert!(pass <= 1.2 * delta, "passband deviation {pass:.3e} > |δ| = {delta:.3e}");

    // stopband weight 10 → deviation bound |δ| / 10
    let stop = max_band_deviation(out.taps(), 4096.0, 600.0, 2048.0, 0.0);
    assert!(stop <= 1.2 * delta / 10.0, "stopband deviation {stop:.3e} > |δ|/10 = {:.3e}", delta / 10.0);
}

#[test]
fn lowpass_stopband_attenuation_near_bound() {
    let out = design_adaptive(&lowpass_spec(), &AdaptiveSchedule::default()).unwrap();
    let bound_db = 20.0 * (out.design.ripple.abs() / 10.0).log10();

    let (freqs, db) = magnitude_response_db(out.taps(), 4096.0, 8192).unwrap();
    let worst = freqs
        .iter()
        .zip(&db)
        .filter(|&(&f, _)| f >= 600.0)
        .map(|(_, &d)| d)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(worst <= bound_db + 3.0, "stopband peak {worst:.1} dB vs bound {bound_db:.1} dB");
    assert!(worst < -40.0, "stopband peak {worst:.1} dB");

    // DC gain ≈ 1
    assert!(db[0].abs() < 0.5, "DC gain {:.3} dB", db[0]);
}

#[test]
fn design_is_deterministic() {
    let a = remez_taps(&lowpass_spec(), &RemezParams::default()).unwrap();
    let b = remez_taps(&lowpass_spec(), &RemezParams::default()).unwrap();
    assert_eq!(a.taps, b.taps);
    assert_eq!(a.delta_history, b.delta_history);
    assert_eq!(a.converged, b.converged);
}

#[test]
fn no_convergence_before_fifth_iteration() {
    let params = RemezParams { max_iterations: 4, ..RemezParams::default() };
    let d = remez_taps(&lowpass_spec(), &params).unwrap();
    assert!(!d.converged);
    assert_eq!(d.iterations, 4);
    // a non-converged run still yields a full, symmetric filter
    assert_eq!(d.taps.len(), 101);
    assert_symmetric(&d.taps);
}

// ── Bandpass ─────────────────────────────────────────────────────────────────

#[test]
fn bandpass_converges() {
    let out = design_adaptive(&bandpass_spec(), &AdaptiveSchedule::default()).unwrap();
    assert!(out.converged(), "bandpass did not converge in {} stages", out.stages_run);
    assert_symmetric(out.taps());
}

#[test]
fn bandpass_centre_tap_dominates() {
    let out = design_adaptive(&bandpass_spec(), &AdaptiveSchedule::default()).unwrap();
    let h = out.taps();
    let centre = h[50].abs();
    for (k, v) in h.iter().enumerate() {
        if k != 50 {
            assert!(v.abs() < centre, "|h[{k}]| = {} >= centre {centre}", v.abs());
        }
    }
    // zero-phase amplitude: ≈ 1 mid-passband, ≈ 0 at DC and Nyquist
    let a = equiripple::amplitude_response(h, &[0.0, 1000.0 / 2048.0, 1.0]);
    assert!((a[1] - 1.0).abs() < 0.1, "passband amplitude {}", a[1]);
    assert!(a[0].abs() < 0.05 && a[2].abs() < 0.05, "stopband amplitudes {a:?}");
}
