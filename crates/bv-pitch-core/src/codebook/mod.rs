//! Pitch Predictor Codebook
//!
//! A codebook is an immutable table of correlation-space rows together with
//! the rule used to rank those rows during the search. Rows use the layout
//! of the BroadVoice `pp9cb` table. For a row built from taps
//! `(b0, b1, b2)`:
//!
//! ```text
//! [2*b0, 2*b1, 2*b2, -2*b0*b1, -2*b1*b2, -2*b0*b2, -b0^2, -b1^2, -b2^2]
//! ```
//!
//! Scored against the correlation vector, such a row gives
//! `frame_energy - residual_energy(b)`, which is why the search can rank rows
//! with a single inner product. That equivalence holds only for rows that
//! keep this structure. A table whose quadratic terms were edited or
//! re-trained independently of its taps must be searched with
//! [`ScoringRule::ResidualEnergy`].
//!
//! No table ships with this crate. The transmitted index is only meaningful
//! to a decoder holding the same table, so the encoder loads the published
//! codec table itself:
//! - verbatim ([`PitchCodebook::from_rows`], [`PitchCodebook::from_flat`])
//! - from plain tap triples ([`PitchCodebook::from_taps`])

use crate::error::{PitchError, Result};
use crate::types::{CORRELATION_ORDER, PITCH_TAPS};
use std::borrow::Cow;
use tracing::debug;

/// One codebook row in correlation space
pub type CodebookRow = [f64; CORRELATION_ORDER];

/// How codebook rows are ranked against a correlation vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRule {
    /// Inner product of the row with the correlation vector
    ///
    /// Only equivalent to minimising the residual for rows whose quadratic
    /// terms are derived from their taps.
    #[default]
    CorrelationInnerProduct,
    /// Quadratic form of the row's taps against the correlation statistics
    ///
    /// Uses only the first three coefficients of each row and ranks by the
    /// actual residual energy reduction.
    ResidualEnergy,
}

/// Immutable pitch predictor codebook
#[derive(Debug, Clone, PartialEq)]
pub struct PitchCodebook {
    rows: Cow<'static, [CodebookRow]>,
    scoring: ScoringRule,
}

/// Expand a tap triple into its correlation-space row
pub fn expand_taps(taps: [f64; PITCH_TAPS]) -> CodebookRow {
    let [b0, b1, b2] = taps;
    [
        2.0 * b0,
        2.0 * b1,
        2.0 * b2,
        -2.0 * b0 * b1,
        -2.0 * b1 * b2,
        -2.0 * b0 * b2,
        -b0 * b0,
        -b1 * b1,
        -b2 * b2,
    ]
}

impl PitchCodebook {
    /// Wrap a static table of rows without copying
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::InvalidCodebook`] if the table is empty or holds
    /// a non-finite coefficient.
    pub fn from_rows(rows: &'static [CodebookRow]) -> Result<Self> {
        validate_rows(rows)?;
        debug!("Loaded static pitch codebook with {} entries", rows.len());

        Ok(Self {
            rows: Cow::Borrowed(rows),
            scoring: ScoringRule::CorrelationInnerProduct,
        })
    }

    /// Wrap a flat `size * 9` table, as laid out in C reference sources
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::InvalidCodebook`] if the length is not a
    /// multiple of nine, the table is empty, or a coefficient is not finite.
    pub fn from_flat(values: &'static [f64]) -> Result<Self> {
        let rows: &'static [CodebookRow] = bytemuck::try_cast_slice(values).map_err(|e| {
            PitchError::invalid_codebook(format!(
                "flat table of {} values is not a whole number of {}-coefficient rows ({})",
                values.len(),
                CORRELATION_ORDER,
                e
            ))
        })?;

        Self::from_rows(rows)
    }

    /// Build a codebook from plain tap triples
    ///
    /// Each triple is expanded with [`expand_taps`], so the inner-product
    /// search stays exact for the resulting table.
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::InvalidCodebook`] if no taps are given or a tap
    /// is not finite.
    pub fn from_taps(taps: &[[f64; PITCH_TAPS]]) -> Result<Self> {
        let rows: Vec<CodebookRow> = taps.iter().copied().map(expand_taps).collect();
        validate_rows(&rows)?;
        debug!("Expanded pitch codebook from {} tap triples", rows.len());

        Ok(Self {
            rows: Cow::Owned(rows),
            scoring: ScoringRule::CorrelationInnerProduct,
        })
    }

    /// Set the scoring rule used by the search
    pub fn with_scoring_rule(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    /// Scoring rule used by the search
    pub fn scoring_rule(&self) -> ScoringRule {
        self.scoring
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the codebook has no entries (never true for a validated one)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in index order
    pub fn rows(&self) -> &[CodebookRow] {
        &self.rows
    }

    /// Row at `index`
    pub fn row(&self, index: usize) -> Option<&CodebookRow> {
        self.rows.get(index)
    }

    /// Bits needed to transmit an index: `ceil(log2(len))`
    pub fn index_bits(&self) -> u32 {
        match self.rows.len() {
            0 | 1 => 0,
            n => usize::BITS - (n - 1).leading_zeros(),
        }
    }
}

fn validate_rows(rows: &[CodebookRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(PitchError::invalid_codebook("codebook has no entries"));
    }

    for (index, row) in rows.iter().enumerate() {
        if let Some(position) = row.iter().position(|c| !c.is_finite()) {
            return Err(PitchError::invalid_codebook(format!(
                "entry {} has a non-finite coefficient at position {}",
                index, position
            )));
        }
    }

    Ok(())
}
