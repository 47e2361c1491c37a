//! Linear-phase tap synthesis and response inspection.
//!
//! - [`taps`]: cosine coefficients → symmetric type-I impulse response.
//! - [`response`]: zero-phase amplitude and FFT magnitude of a tap array,
//!   for checking a design; the designer itself never calls it.

pub mod response;
pub mod taps;

pub use response::{amplitude_response, magnitude_response_db};
pub use taps::synthesize_taps;
