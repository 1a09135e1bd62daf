//! Input validation utilities for pitch quantizer calls

use crate::error::{PitchError, Result};
use crate::types::PitchQuantizerConfig;

/// Validate a history buffer against the configured geometry
///
/// The configuration is validated first; the buffer must then hold exactly
/// `config.history_len()` finite samples.
pub fn validate_history(history: &[f64], config: &PitchQuantizerConfig) -> Result<()> {
    config.validate()?;

    let expected = config.history_len();
    if history.len() != expected {
        return Err(PitchError::HistoryLength {
            expected,
            actual: history.len(),
        });
    }

    if let Some(index) = history.iter().position(|sample| !sample.is_finite()) {
        return Err(PitchError::NonFiniteSample { index });
    }

    Ok(())
}

/// Validate a pitch lag against the configured range
pub fn validate_lag(lag: usize, config: &PitchQuantizerConfig) -> Result<()> {
    if lag < config.min_lag || lag > config.max_lag {
        return Err(PitchError::LagOutOfRange {
            lag,
            min: config.min_lag,
            max: config.max_lag,
        });
    }

    Ok(())
}
