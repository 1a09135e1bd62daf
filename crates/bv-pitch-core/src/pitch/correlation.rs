//! Correlation Statistics
//!
//! Builds the nine statistics a codebook row is scored against. With `x` the
//! current frame and `y0`, `y1`, `y2` the frame-length segments delayed by
//! `lag - 1`, `lag` and `lag + 1`:
//!
//! | pos | statistic  |
//! |-----|------------|
//! | 0   | `<x, y0>`  |
//! | 1   | `<x, y1>`  |
//! | 2   | `<x, y2>`  |
//! | 3   | `<y1, y0>` |
//! | 4   | `<y2, y1>` |
//! | 5   | `<y2, y0>` |
//! | 6   | `<y0, y0>` |
//! | 7   | `<y1, y1>` |
//! | 8   | `<y2, y2>` |
//!
//! Positions 0..=2 are direct inner products. The six lagged statistics come
//! from a single scan of the `y2` window: `y1` and `y0` are the same window
//! shifted forward by one and two samples, so their sums follow from the
//! `y2` sums by adding the entering sample products and subtracting the
//! leaving ones.

use crate::codebook::CodebookRow;
use crate::error::Result;
use crate::types::{PitchQuantizerConfig, CORRELATION_ORDER, PITCH_TAPS};
use crate::utils::validation::{validate_history, validate_lag};

/// The nine correlation statistics for one lag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationVector([f64; CORRELATION_ORDER]);

impl CorrelationVector {
    /// Wrap raw statistics laid out as documented at module level
    pub fn new(values: [f64; CORRELATION_ORDER]) -> Self {
        Self(values)
    }

    /// Raw statistics
    pub fn as_array(&self) -> &[f64; CORRELATION_ORDER] {
        &self.0
    }

    /// Cross-correlations of the frame with `y0`, `y1`, `y2`
    pub fn frame_cross(&self) -> [f64; PITCH_TAPS] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Energies of `y0`, `y1`, `y2`
    pub fn lagged_energy(&self) -> [f64; PITCH_TAPS] {
        [self.0[6], self.0[7], self.0[8]]
    }

    /// Cross-correlations `<y0, y1>`, `<y1, y2>`, `<y0, y2>`
    pub fn lagged_cross(&self) -> [f64; PITCH_TAPS] {
        [self.0[3], self.0[4], self.0[5]]
    }

    /// Inner product with a codebook row, accumulated in position order
    pub fn dot(&self, row: &CodebookRow) -> f64 {
        let mut sum = 0.0;
        for (c, p) in row.iter().zip(self.0.iter()) {
            sum += c * p;
        }
        sum
    }
}

/// Build the correlation vector for `lag`
///
/// # Errors
///
/// Fails if `history` does not match the configured geometry or `lag` lies
/// outside the configured range.
pub fn build_correlation_vector(
    history: &[f64],
    config: &PitchQuantizerConfig,
    lag: usize,
) -> Result<CorrelationVector> {
    validate_history(history, config)?;
    validate_lag(lag, config)?;
    Ok(compute_correlation_vector(history, config, lag))
}

/// Build the correlation vector for a history and lag already validated
/// against `config`.
pub(crate) fn compute_correlation_vector(
    history: &[f64],
    config: &PitchQuantizerConfig,
    lag: usize,
) -> CorrelationVector {
    let frame_start = config.look_back();
    let len = config.frame_length;
    let frame = &history[frame_start..frame_start + len];

    let mut p = [0.0; CORRELATION_ORDER];

    // Direct cross-correlations, delays lag - 1, lag, lag + 1
    for (tap, slot) in p[..PITCH_TAPS].iter_mut().enumerate() {
        let start = frame_start + 1 - lag - tap;
        *slot = inner_product(frame, &history[start..start + len]);
    }

    // One pass over the y2 window for <y2,y2>, <y2,y1>, <y2,y0>
    let base = frame_start - lag - 1;
    let mut energy_y2 = 0.0;
    let mut cross_y2_y1 = 0.0;
    let mut cross_y2_y0 = 0.0;
    for n in base..base + len {
        let s0 = history[n];
        energy_y2 += s0 * s0;
        cross_y2_y1 += s0 * history[n + 1];
        cross_y2_y0 += s0 * history[n + 2];
    }

    // Slide forward: y1 drops history[base] and gains history[base + len],
    // y0 additionally drops history[base + 1] and gains history[base + len + 1].
    let leaving = history[base];
    let leaving_next = history[base + 1];
    let entering = history[base + len];
    let entering_next = history[base + len + 1];

    let energy_y1 = energy_y2 + entering * entering - leaving * leaving;
    let cross_y1_y0 = cross_y2_y1 + entering * entering_next - leaving * leaving_next;
    let energy_y0 = energy_y1 + entering_next * entering_next - leaving_next * leaving_next;

    p[3] = cross_y1_y0;
    p[4] = cross_y2_y1;
    p[5] = cross_y2_y0;
    p[6] = energy_y0;
    p[7] = energy_y1;
    p[8] = energy_y2;

    CorrelationVector(p)
}

fn inner_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
