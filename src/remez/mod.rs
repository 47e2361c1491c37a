//! Remez exchange on a fixed frequency grid.
//!
//! - [`solve`]: regularised reference system, damped least squares.
//! - [`deviation`]: weighted error curve over the grid.
//! - [`extrema`]: alternating extremum selection with fallback padding.
//! - [`convergence`]: reference + ripple stability rule.
//! - [`iterate`]: the exchange loop and the single-run designer.

pub mod convergence;
pub mod deviation;
pub mod extrema;
pub mod iterate;
pub mod solve;

pub use convergence::ConvergenceChecker;
pub use deviation::{error_curve, CosineBasis};
pub use extrema::select_extrema;
pub use iterate::{remez_taps, run_remez, RemezDesign, RemezRun};
pub use solve::{least_squares, solve_reference_system};
