//! # equiripple: Parks-McClellan FIR design in pure Rust
//!
//! `equiripple` designs type-I linear-phase FIR filters that minimise the
//! maximum weighted deviation from a piecewise-constant amplitude
//! specification (the Remez exchange / Parks-McClellan method).  Everything
//! happens in cosine-polynomial space on a discretised frequency grid; no
//! FFT is involved in the design itself.
//!
//! _No BLAS, no LAPACK: the per-iteration least-squares solve is a small
//! SVD from [nalgebra](https://crates.io/crates/nalgebra); everything else
//! runs on [ndarray](https://crates.io/crates/ndarray) arrays._
//!
//! ## Pipeline overview
//!
//! ```text
//! FilterSpec (numtaps, fs, bands in Hz)
//!   │
//!   ├─ normalize::normalize_bands()   Hz → [0, 1] (1 = Nyquist)
//!   ├─ grid::allocate_points()        bandwidth-proportional point counts
//!   ├─ grid::build()                  core points + guard skirts, dedup, sort
//!   ├─ reference::initial_reference() M+2 Chebyshev-node indices
//!   │
//!   ├─ remez::run_remez()  ┌─ solve_reference_system()   (a, δ)
//!   │                      ├─ error_curve()              E over the grid
//!   │                      ├─ select_extrema()           next reference
//!   │                      └─ ConvergenceChecker         stop?
//!   │
//!   └─ filter::synthesize_taps()      a[0..=M] → h[0..2M]
//!
//! adaptive::design_adaptive()  reruns the whole chain with escalated ε and
//!                              edge margin until a stage converges.
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use equiripple::{design_adaptive, AdaptiveSchedule, FilterSpec};
//!
//! // 101-tap lowpass at 4096 Hz: pass 0–500 Hz, stop 600–2048 Hz,
//! // stopband weighted 10× tighter than the passband.
//! let spec = FilterSpec::from_lists(
//!     101, 4096.0,
//!     &[(0.0, 500.0), (600.0, 2048.0)],
//!     &[1.0, 0.0],
//!     &[1.0, 10.0],
//! ).unwrap();
//!
//! let out = design_adaptive(&spec, &AdaptiveSchedule::default()).unwrap();
//! assert!(out.converged());
//! println!("|δ| = {:.3e} after {} iterations", out.design.ripple.abs(), out.design.iterations);
//! ```
//!
//! ## Single run
//!
//! [`remez_taps`] runs one exchange loop with explicit [`RemezParams`] and
//! reports non-convergence through [`RemezDesign::converged`] instead of
//! retrying:
//!
//! ```no_run
//! use equiripple::{remez_taps, FilterSpec, RemezParams};
//!
//! let spec = FilterSpec::from_lists(
//!     101, 4096.0,
//!     &[(0.0, 520.0), (600.0, 1420.0), (1500.0, 2048.0)],
//!     &[0.0, 1.0, 0.0],
//!     &[10.0, 1.0, 10.0],
//! ).unwrap();
//! let params = RemezParams { max_iterations: 50, ..RemezParams::default() };
//! let design = remez_taps(&spec, &params).unwrap();
//! println!("converged = {}, δ history = {:?}", design.converged, design.delta_history);
//! ```
//!
//! ## Logging
//!
//! Progress is reported through [`tracing`] (`debug` per design call,
//! `trace` per iteration, `warn` on escalation).  Install any subscriber to
//! see it; the library never installs one.

pub mod adaptive;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod normalize;
pub mod reference;
pub mod remez;

// ── Crate-root re-exports ─────────────────────────────────────────────────
//
// Everything a downstream user is likely to need is available directly as
// `equiripple::Foo` without having to know the internal module layout.

// adaptive
pub use adaptive::{design_adaptive, design_adaptive_with, AdaptiveDesign};

// config
pub use config::{AdaptiveSchedule, RemezParams, MAX_GRID_POINTS};

// error
pub use error::{DesignError, Result};

// filter: taps + response inspection
pub use filter::{amplitude_response, magnitude_response_db, synthesize_taps};

// grid
pub use grid::{allocate_points, Grid};

// normalize
pub use normalize::{normalize_bands, Band, FilterSpec, NormalizedBand};

// reference
pub use reference::{initial_reference, resolve_collisions};

// remez: the exchange loop and its parts
pub use remez::{
    error_curve, remez_taps, run_remez, select_extrema, solve_reference_system,
    ConvergenceChecker, CosineBasis, RemezDesign, RemezRun,
};
