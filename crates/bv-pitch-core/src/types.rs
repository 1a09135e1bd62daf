//! Core types for the pitch tap quantizer
//!
//! This module defines the frame geometry shared by every step of the
//! quantizer and the result handed back to the encoder.

use crate::error::{PitchError, Result};
use std::fmt;

/// Number of pitch predictor taps
pub const PITCH_TAPS: usize = 3;

/// Number of correlation statistics scored against each codebook row
pub const CORRELATION_ORDER: usize = 9;

/// Factor applied to a codebook row's first three coefficients to obtain taps
///
/// Codebook rows store taps pre-multiplied by two.
pub const TAP_SCALE: f64 = 0.5;

/// BV16 frame length in samples (5 ms at 8 kHz)
pub const BV16_FRAME_LENGTH: usize = 40;
/// BV16 minimum pitch lag
pub const BV16_MIN_LAG: usize = 10;
/// BV16 maximum pitch lag
pub const BV16_MAX_LAG: usize = 137;

/// BV32 frame length in samples (5 ms at 16 kHz)
pub const BV32_FRAME_LENGTH: usize = 80;
/// BV32 minimum pitch lag
pub const BV32_MIN_LAG: usize = 10;
/// BV32 maximum pitch lag
pub const BV32_MAX_LAG: usize = 265;

/// Frame geometry for the pitch tap quantizer
///
/// The history buffer passed to the quantizer is laid out as
/// `look_back()` past samples followed by `frame_length` samples of the
/// current frame:
///
/// ```text
/// |<------ look_back = max_lag + 1 ------>|<-- frame_length -->|
/// 0                                   look_back          history_len
/// ```
///
/// The three predictor taps act on delays `lag - 1`, `lag` and `lag + 1`,
/// so the largest lag reads the very first history sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchQuantizerConfig {
    /// Samples per frame
    pub frame_length: usize,
    /// Smallest accepted pitch lag
    pub min_lag: usize,
    /// Largest accepted pitch lag
    pub max_lag: usize,
}

impl PitchQuantizerConfig {
    /// Create a configuration from explicit geometry
    pub fn new(frame_length: usize, min_lag: usize, max_lag: usize) -> Self {
        Self {
            frame_length,
            min_lag,
            max_lag,
        }
    }

    /// BroadVoice16 narrowband geometry
    pub fn bv16() -> Self {
        Self::new(BV16_FRAME_LENGTH, BV16_MIN_LAG, BV16_MAX_LAG)
    }

    /// BroadVoice32 wideband geometry
    pub fn bv32() -> Self {
        Self::new(BV32_FRAME_LENGTH, BV32_MIN_LAG, BV32_MAX_LAG)
    }

    /// Set frame length
    pub fn with_frame_length(mut self, frame_length: usize) -> Self {
        self.frame_length = frame_length;
        self
    }

    /// Set accepted lag range (inclusive)
    pub fn with_lag_range(mut self, min_lag: usize, max_lag: usize) -> Self {
        self.min_lag = min_lag;
        self.max_lag = max_lag;
        self
    }

    /// Number of past samples preceding the current frame
    pub fn look_back(&self) -> usize {
        self.max_lag + 1
    }

    /// Total history buffer length
    pub fn history_len(&self) -> usize {
        self.look_back() + self.frame_length
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::InvalidConfig`] if the frame is empty, if the
    /// shortest predictor delay (`min_lag - 1`) would not point into the past,
    /// if the lag range is empty, or if the history length overflows `usize`.
    pub fn validate(&self) -> Result<()> {
        if self.frame_length == 0 {
            return Err(PitchError::invalid_config("Frame length must be positive"));
        }

        if self.min_lag < 2 {
            return Err(PitchError::invalid_config(format!(
                "Minimum lag {} too small: the lag - 1 tap needs a lag of at least 2",
                self.min_lag
            )));
        }

        if self.min_lag > self.max_lag {
            return Err(PitchError::invalid_config(format!(
                "Empty lag range: {}..={}",
                self.min_lag, self.max_lag
            )));
        }

        // look_back() and history_len() must not overflow
        let fits = self
            .max_lag
            .checked_add(1)
            .and_then(|look_back| look_back.checked_add(self.frame_length));
        if fits.is_none() {
            return Err(PitchError::invalid_config(format!(
                "History of {} + 1 + {} samples is not addressable",
                self.max_lag, self.frame_length
            )));
        }

        Ok(())
    }
}

impl Default for PitchQuantizerConfig {
    fn default() -> Self {
        Self::bv16()
    }
}

impl fmt::Display for PitchQuantizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame={} lags={}..={}",
            self.frame_length, self.min_lag, self.max_lag
        )
    }
}

/// Outcome of quantizing the pitch taps for one lag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchTapQuantization {
    /// Lag the taps were quantized for
    pub lag: usize,
    /// Winning codebook index, the value that is transmitted
    pub index: usize,
    /// Predictor taps for delays `lag - 1`, `lag` and `lag + 1`
    pub taps: [f64; PITCH_TAPS],
    /// Sum of squared prediction errors over the frame using `taps`
    pub residual_energy: f64,
}
