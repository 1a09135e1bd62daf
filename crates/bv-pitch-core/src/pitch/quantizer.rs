//! Pitch Tap Quantizer
//!
//! Runs the three steps for one lag: correlation statistics, codebook
//! search, tap synthesis with residual evaluation. The quantizer holds no
//! mutable state; one instance can serve any number of threads.

use crate::codebook::PitchCodebook;
use crate::error::{PitchError, Result};
use crate::pitch::correlation::compute_correlation_vector;
use crate::pitch::search::search_codebook;
use crate::pitch::synthesis::{compute_residual_energy, scale_taps};
use crate::types::{PitchQuantizerConfig, PitchTapQuantization};
use crate::utils::validation::{validate_history, validate_lag};
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Three-tap pitch predictor quantizer
#[derive(Debug, Clone, Copy)]
pub struct PitchTapQuantizer<'cb> {
    config: PitchQuantizerConfig,
    codebook: &'cb PitchCodebook,
}

impl<'cb> PitchTapQuantizer<'cb> {
    /// Create a quantizer searching `codebook`
    ///
    /// The codebook must be the table the decoder uses; the transmitted
    /// index has no meaning without it.
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::InvalidConfig`] if `config` does not validate and
    /// [`PitchError::InvalidCodebook`] if the codebook is empty.
    pub fn new(config: PitchQuantizerConfig, codebook: &'cb PitchCodebook) -> Result<Self> {
        config.validate()?;
        if codebook.is_empty() {
            return Err(PitchError::invalid_codebook("codebook has no entries"));
        }

        debug!(
            "Created pitch tap quantizer: {}, {} codebook entries ({:?})",
            config,
            codebook.len(),
            codebook.scoring_rule()
        );

        Ok(Self { config, codebook })
    }

    /// Frame geometry
    pub fn config(&self) -> &PitchQuantizerConfig {
        &self.config
    }

    /// Codebook being searched
    pub fn codebook(&self) -> &'cb PitchCodebook {
        self.codebook
    }

    /// Quantize the pitch taps for one lag
    ///
    /// `history` holds `config.look_back()` past samples followed by the
    /// current frame and must be exactly `config.history_len()` long.
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::HistoryLength`], [`PitchError::NonFiniteSample`]
    /// or [`PitchError::LagOutOfRange`] on a contract violation. Nothing is
    /// computed in that case.
    pub fn quantize(&self, history: &[f64], lag: usize) -> Result<PitchTapQuantization> {
        self.check_history(history)?;
        self.check_lag(lag)?;
        Ok(self.quantize_checked(history, lag))
    }

    /// Quantize the pitch taps for several lag candidates
    ///
    /// Results come back in the order of `lags`. Every lag is validated
    /// before any work starts, so a single bad lag fails the whole call.
    /// With the `parallel` feature the candidates are evaluated on the rayon
    /// thread pool.
    ///
    /// # Errors
    ///
    /// Same as [`quantize`](Self::quantize).
    pub fn quantize_candidates(
        &self,
        history: &[f64],
        lags: &[usize],
    ) -> Result<Vec<PitchTapQuantization>> {
        self.check_history(history)?;
        for &lag in lags {
            self.check_lag(lag)?;
        }

        #[cfg(feature = "parallel")]
        let results = lags
            .par_iter()
            .map(|&lag| self.quantize_checked(history, lag))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = lags
            .iter()
            .map(|&lag| self.quantize_checked(history, lag))
            .collect();

        Ok(results)
    }

    fn quantize_checked(&self, history: &[f64], lag: usize) -> PitchTapQuantization {
        let correlation = compute_correlation_vector(history, &self.config, lag);
        let best = search_codebook(&correlation, self.codebook);

        // Validated codebooks are never empty, so the scan always lands on a row
        let row = &self.codebook.rows()[best.index];
        let taps = scale_taps(row);
        let residual_energy = compute_residual_energy(history, &self.config, lag, &taps);

        trace!(
            "Pitch taps for lag {}: index={} taps={:?} residual={:.3}",
            lag,
            best.index,
            taps,
            residual_energy
        );

        PitchTapQuantization {
            lag,
            index: best.index,
            taps,
            residual_energy,
        }
    }

    fn check_history(&self, history: &[f64]) -> Result<()> {
        validate_history(history, &self.config).map_err(|e| {
            warn!("Rejected pitch quantizer history: {}", e);
            e
        })
    }

    fn check_lag(&self, lag: usize) -> Result<()> {
        validate_lag(lag, &self.config).map_err(|e| {
            warn!("Rejected pitch quantizer lag: {}", e);
            e
        })
    }
}

/// Quantize the pitch taps for one lag with an explicit configuration and
/// codebook
///
/// # Errors
///
/// Same as [`PitchTapQuantizer::new`] and
/// [`PitchTapQuantizer::quantize`].
pub fn quantize_pitch_taps(
    history: &[f64],
    lag: usize,
    config: &PitchQuantizerConfig,
    codebook: &PitchCodebook,
) -> Result<PitchTapQuantization> {
    PitchTapQuantizer::new(*config, codebook)?.quantize(history, lag)
}
