//! # BV-Pitch-Core: Three-Tap Pitch Predictor Quantizer
//!
//! This library implements the pitch tap vector quantizer of a
//! BroadVoice-style predictive speech encoder. For one candidate pitch lag
//! it picks the codebook entry whose three predictor taps best remove the
//! periodic component of the current frame, and reports the residual energy
//! left behind.
//!
//! ## Features
//!
//! - **Sliding correlation statistics**: nine statistics per lag from one
//!   scan of the delayed segment
//! - **Codebook search**: single inner product per entry, lowest index wins ties
//! - **Direct residual**: energy recomputed by filtering, independent of the
//!   search shortcut
//! - **Stateless**: every call is a pure function of its inputs
//!
//! ## Usage
//!
//! ```rust
//! use bv_pitch_core::{PitchCodebook, PitchQuantizerConfig, PitchTapQuantizer};
//!
//! // Load the codec's published table here; a toy table stands in
//! let codebook = PitchCodebook::from_taps(&[
//!     [0.0, 0.0, 0.0],
//!     [0.0, 0.5, 0.0],
//!     [0.25, 0.5, 0.25],
//!     [0.0, 1.0, 0.0],
//! ])?;
//!
//! let config = PitchQuantizerConfig::bv16();
//! let quantizer = PitchTapQuantizer::new(config, &codebook)?;
//!
//! // look-back samples followed by the current frame
//! let history: Vec<f64> = (0..config.history_len())
//!     .map(|n| ((n % 57) as f64 - 28.0) * 100.0)
//!     .collect();
//!
//! let result = quantizer.quantize(&history, 57)?;
//! assert!(result.index < quantizer.codebook().len());
//! assert!(result.residual_energy >= 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: evaluate several lag candidates on the rayon thread pool
//!   (enabled by default)

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codebook;
pub mod error;
pub mod pitch;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use codebook::{PitchCodebook, ScoringRule};
pub use error::{PitchError, Result};
pub use pitch::{quantize_pitch_taps, CorrelationVector, PitchTapQuantizer};
pub use types::{PitchQuantizerConfig, PitchTapQuantization, TAP_SCALE};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// Installs a `tracing` subscriber honouring `RUST_LOG` if the application
/// has not installed one. Safe to call multiple times.
///
/// # Errors
///
/// Currently never fails.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    tracing::info!(
        "BV-Pitch-Core v{} initialized (parallel: {})",
        VERSION,
        cfg!(feature = "parallel")
    );

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        parallel: cfg!(feature = "parallel"),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Whether lag candidates are evaluated in parallel
    pub parallel: bool,
}
