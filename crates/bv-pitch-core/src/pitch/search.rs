//! Codebook Search
//!
//! Scans every codebook row left to right and keeps the first row with the
//! strictly greatest score. The selected index is transmitted, so the scan
//! order and the tie-break (lowest index wins) are part of the bitstream
//! definition.

use crate::codebook::{CodebookRow, PitchCodebook, ScoringRule};
use crate::pitch::correlation::CorrelationVector;
use crate::types::TAP_SCALE;

/// Starting score for the scan; any finite row score beats it
pub const INITIAL_BEST_SCORE: f64 = -1.0e30;

/// Winning codebook entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodebookMatch {
    /// Index of the winning row
    pub index: usize,
    /// Score of the winning row under the codebook's scoring rule
    pub score: f64,
}

/// Find the best codebook entry for a correlation vector
pub fn search_codebook(correlation: &CorrelationVector, codebook: &PitchCodebook) -> CodebookMatch {
    let scoring = codebook.scoring_rule();
    let mut best = CodebookMatch {
        index: 0,
        score: INITIAL_BEST_SCORE,
    };

    for (index, row) in codebook.rows().iter().enumerate() {
        let score = score_row(correlation, row, scoring);
        if score > best.score {
            best = CodebookMatch { index, score };
        }
    }

    best
}

/// Score one row under `scoring`
pub fn score_row(correlation: &CorrelationVector, row: &CodebookRow, scoring: ScoringRule) -> f64 {
    match scoring {
        ScoringRule::CorrelationInnerProduct => correlation.dot(row),
        ScoringRule::ResidualEnergy => residual_reduction(correlation, row),
    }
}

/// Residual energy removed by the row's taps: `2 b'c - b'R b`
///
/// `c` are the frame cross-correlations and `R` the 3x3 lagged correlation
/// matrix. Only the first three row coefficients are used.
pub fn residual_reduction(correlation: &CorrelationVector, row: &CodebookRow) -> f64 {
    let b = [row[0] * TAP_SCALE, row[1] * TAP_SCALE, row[2] * TAP_SCALE];
    let c = correlation.frame_cross();
    let [r00, r11, r22] = correlation.lagged_energy();
    let [r01, r12, r02] = correlation.lagged_cross();

    let linear = 2.0 * (b[0] * c[0] + b[1] * c[1] + b[2] * c[2]);
    let quadratic = b[0] * b[0] * r00
        + b[1] * b[1] * r11
        + b[2] * b[2] * r22
        + 2.0 * (b[0] * b[1] * r01 + b[1] * b[2] * r12 + b[0] * b[2] * r02);

    linear - quadratic
}
