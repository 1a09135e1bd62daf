//! Tap Synthesis and Residual Evaluation
//!
//! The residual is recomputed by filtering the frame with the chosen taps
//! rather than derived from the correlation vector, so drift in the sliding
//! sums never reaches the energy reported to the encoder.

use crate::codebook::CodebookRow;
use crate::error::Result;
use crate::types::{PitchQuantizerConfig, PITCH_TAPS, TAP_SCALE};
use crate::utils::validation::{validate_history, validate_lag};

/// Taps encoded by a codebook row
pub fn scale_taps(row: &CodebookRow) -> [f64; PITCH_TAPS] {
    [row[0] * TAP_SCALE, row[1] * TAP_SCALE, row[2] * TAP_SCALE]
}

/// Sum of squared errors of the three-tap predictor over the current frame
///
/// `e[n] = x[n] - b0 * x[n - lag + 1] - b1 * x[n - lag] - b2 * x[n - lag - 1]`
///
/// # Errors
///
/// Fails if `history` does not match the configured geometry or `lag` lies
/// outside the configured range.
pub fn residual_energy(
    history: &[f64],
    config: &PitchQuantizerConfig,
    lag: usize,
    taps: &[f64; PITCH_TAPS],
) -> Result<f64> {
    validate_history(history, config)?;
    validate_lag(lag, config)?;
    Ok(compute_residual_energy(history, config, lag, taps))
}

pub(crate) fn compute_residual_energy(
    history: &[f64],
    config: &PitchQuantizerConfig,
    lag: usize,
    taps: &[f64; PITCH_TAPS],
) -> f64 {
    let frame_start = config.look_back();
    let [b0, b1, b2] = *taps;

    let mut energy = 0.0;
    for n in frame_start..frame_start + config.frame_length {
        // n + 1 - lag is the lag - 1 delay; the other two taps sit behind it
        let d = n + 1 - lag;
        let error = history[n] - b0 * history[d] - b1 * history[d - 1] - b2 * history[d - 2];
        energy += error * error;
    }

    energy
}
