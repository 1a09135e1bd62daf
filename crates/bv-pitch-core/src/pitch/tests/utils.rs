//! Test utilities for the pitch tap quantizer
//!
//! Signal generators and brute-force reference computations that share no
//! code with the implementation under test.

use crate::codebook::{CodebookRow, PitchCodebook};
use crate::types::{PitchQuantizerConfig, CORRELATION_ORDER, PITCH_TAPS};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Entry of [`SYNTHETIC_ROWS`] holding taps (0, 1, 0)
pub const UNIT_GAIN_ENTRY: usize = 25;

/// 32-entry table in `pp9cb` layout built from tap triples
///
/// Entry 0 is the all-zero predictor. The remaining entries sweep gains on
/// single-tap, two-tap and symmetric three-tap shapes.
pub static SYNTHETIC_ROWS: [CodebookRow; 32] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, -0.09, 0.0],
    [0.15, 0.45, 0.0, -0.03375, 0.0, 0.0, -0.005625, -0.050625, 0.0],
    [0.0, 0.45, 0.15, 0.0, -0.03375, 0.0, 0.0, -0.050625, -0.005625],
    [0.3, 0.3, 0.0, -0.045, 0.0, 0.0, -0.0225, -0.0225, 0.0],
    [0.0, 0.3, 0.3, 0.0, -0.045, 0.0, 0.0, -0.0225, -0.0225],
    [0.075, 0.45, 0.075, -0.016875, -0.016875, -0.0028125, -0.00140625, -0.050625, -0.00140625],
    [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.25, 0.0],
    [0.25, 0.75, 0.0, -0.09375, 0.0, 0.0, -0.015625, -0.140625, 0.0],
    [0.0, 0.75, 0.25, 0.0, -0.09375, 0.0, 0.0, -0.140625, -0.015625],
    [0.5, 0.5, 0.0, -0.125, 0.0, 0.0, -0.0625, -0.0625, 0.0],
    [0.0, 0.5, 0.5, 0.0, -0.125, 0.0, 0.0, -0.0625, -0.0625],
    [0.125, 0.75, 0.125, -0.046875, -0.046875, -0.0078125, -0.00390625, -0.140625, -0.00390625],
    [0.0, 1.4, 0.0, 0.0, 0.0, 0.0, 0.0, -0.49, 0.0],
    [0.35, 1.05, 0.0, -0.18375, 0.0, 0.0, -0.030625, -0.275625, 0.0],
    [0.0, 1.05, 0.35, 0.0, -0.18375, 0.0, 0.0, -0.275625, -0.030625],
    [0.7, 0.7, 0.0, -0.245, 0.0, 0.0, -0.1225, -0.1225, 0.0],
    [0.0, 0.7, 0.7, 0.0, -0.245, 0.0, 0.0, -0.1225, -0.1225],
    [0.175, 1.05, 0.175, -0.091875, -0.091875, -0.0153125, -0.00765625, -0.275625, -0.00765625],
    [0.0, 1.7, 0.0, 0.0, 0.0, 0.0, 0.0, -0.7225, 0.0],
    [0.425, 1.275, 0.0, -0.2709375, 0.0, 0.0, -0.04515625, -0.40640625, 0.0],
    [0.0, 1.275, 0.425, 0.0, -0.2709375, 0.0, 0.0, -0.40640625, -0.04515625],
    [0.85, 0.85, 0.0, -0.36125, 0.0, 0.0, -0.180625, -0.180625, 0.0],
    [0.0, 0.85, 0.85, 0.0, -0.36125, 0.0, 0.0, -0.180625, -0.180625],
    [0.2125, 1.275, 0.2125, -0.13546875, -0.13546875, -0.022578125, -0.0112890625, -0.40640625, -0.0112890625],
    [0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0],
    [0.5, 1.5, 0.0, -0.375, 0.0, 0.0, -0.0625, -0.5625, 0.0],
    [0.0, 1.5, 0.5, 0.0, -0.375, 0.0, 0.0, -0.5625, -0.0625],
    [1.0, 1.0, 0.0, -0.5, 0.0, 0.0, -0.25, -0.25, 0.0],
    [0.0, 1.0, 1.0, 0.0, -0.5, 0.0, 0.0, -0.25, -0.25],
    [0.25, 1.5, 0.25, -0.1875, -0.1875, -0.03125, -0.015625, -0.5625, -0.015625],
    [-0.2, 2.2, -0.2, 0.22, 0.22, -0.02, -0.01, -1.21, -0.01],
];

/// Codebook over [`SYNTHETIC_ROWS`]
pub fn synthetic_codebook() -> PitchCodebook {
    PitchCodebook::from_rows(&SYNTHETIC_ROWS).unwrap()
}

/// Uniform random history in `[-amplitude, amplitude]`
pub fn random_history(config: &PitchQuantizerConfig, seed: u64, amplitude: f64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..config.history_len())
        .map(|_| rng.gen_range(-amplitude..=amplitude))
        .collect()
}

/// History that repeats a random pattern of length `period` exactly
pub fn periodic_history(config: &PitchQuantizerConfig, period: usize, seed: u64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let pattern: Vec<f64> = (0..period)
        .map(|_| rng.gen_range(-8000.0..=8000.0))
        .collect();
    (0..config.history_len())
        .map(|n| pattern[n % period])
        .collect()
}

/// Sample at time `n` of the current frame delayed by `delay`
fn delayed(history: &[f64], config: &PitchQuantizerConfig, n: usize, delay: usize) -> f64 {
    history[config.look_back() + n - delay]
}

/// The nine statistics computed with independent nested sums
pub fn brute_force_correlation(
    history: &[f64],
    config: &PitchQuantizerConfig,
    lag: usize,
) -> [f64; CORRELATION_ORDER] {
    let delays = [lag - 1, lag, lag + 1];
    // (first, second) delay pairs; `None` stands for the undelayed frame
    let pairs: [(Option<usize>, usize); CORRELATION_ORDER] = [
        (None, delays[0]),
        (None, delays[1]),
        (None, delays[2]),
        (Some(delays[1]), delays[0]),
        (Some(delays[2]), delays[1]),
        (Some(delays[2]), delays[0]),
        (Some(delays[0]), delays[0]),
        (Some(delays[1]), delays[1]),
        (Some(delays[2]), delays[2]),
    ];

    let mut out = [0.0; CORRELATION_ORDER];
    for (slot, (first, second)) in out.iter_mut().zip(pairs.iter()) {
        let mut sum = 0.0;
        for n in 0..config.frame_length {
            let a = delayed(history, config, n, first.unwrap_or(0));
            let b = delayed(history, config, n, *second);
            sum += a * b;
        }
        *slot = sum;
    }
    out
}

/// Residual energy of `taps` by explicit filtering
pub fn brute_force_residual(
    history: &[f64],
    config: &PitchQuantizerConfig,
    lag: usize,
    taps: &[f64; PITCH_TAPS],
) -> f64 {
    (0..config.frame_length)
        .map(|n| {
            let prediction: f64 = (0..PITCH_TAPS)
                .map(|k| taps[k] * delayed(history, config, n, lag - 1 + k))
                .sum();
            let error = delayed(history, config, n, 0) - prediction;
            error * error
        })
        .sum()
}

/// Energy of the current frame
pub fn frame_energy(history: &[f64], config: &PitchQuantizerConfig) -> f64 {
    history[config.look_back()..]
        .iter()
        .map(|x| x * x)
        .sum()
}

/// Assert two statistics agree to a tolerance relative to `scale`
pub fn assert_close(actual: f64, expected: f64, scale: f64, context: &str) {
    let tolerance = 1e-9 * scale.max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: {} vs {} (tolerance {})",
        context,
        actual,
        expected,
        tolerance
    );
}
