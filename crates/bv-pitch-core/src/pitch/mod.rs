//! Three-Tap Pitch Predictor Quantization
//!
//! Given a pitch lag and the signal history, selects the codebook entry whose
//! taps best predict the current frame from the samples one pitch period
//! back, and reports the residual energy those taps leave.
//!
//! # Architecture
//!
//! Data flows strictly forward through three steps:
//! - `correlation`: history + lag → nine correlation statistics
//! - `search`: statistics + codebook → winning index
//! - `synthesis`: winning row → taps, and taps + history → residual energy
//!
//! `quantizer` ties the steps together and owns argument validation.
//!
//! # Reference
//!
//! Follows the floating-point pitch tap quantizer of the BroadVoice16
//! encoder (`pitchtapquan`).

pub mod correlation;
pub mod quantizer;
pub mod search;
pub mod synthesis;

#[cfg(test)]
mod tests;

pub use correlation::{build_correlation_vector, CorrelationVector};
pub use quantizer::{quantize_pitch_taps, PitchTapQuantizer};
pub use search::{search_codebook, CodebookMatch};
pub use synthesis::{residual_energy, scale_taps};
