//! Error handling for the pitch tap quantizer
//!
//! Every error defined here is a contract violation by the caller: a lag
//! outside the configured range, a history buffer of the wrong length, or a
//! malformed configuration or codebook. None of them is recoverable by
//! retrying the same call.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for pitch quantizer operations
pub type Result<T> = std::result::Result<T, PitchError>;

/// Error type for pitch quantizer operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PitchError {
    /// Pitch lag outside the configured range
    #[error("Pitch lag out of range: {lag} (supported: {min}..={max})")]
    LagOutOfRange { lag: usize, min: usize, max: usize },

    /// History buffer does not match the configured geometry
    #[error("Invalid history length: expected {expected} samples, got {actual}")]
    HistoryLength { expected: usize, actual: usize },

    /// NaN or infinite sample in the history buffer
    #[error("Non-finite sample at history index {index}")]
    NonFiniteSample { index: usize },

    /// Invalid quantizer configuration
    #[error("Invalid quantizer configuration: {details}")]
    InvalidConfig { details: String },

    /// Malformed codebook table
    #[error("Invalid codebook: {details}")]
    InvalidCodebook { details: String },
}

impl PitchError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new invalid codebook error
    pub fn invalid_codebook(details: impl Into<String>) -> Self {
        Self::InvalidCodebook {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Contract violations must be fixed by the caller, so this is always
    /// `false`.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::LagOutOfRange { .. }
            | Self::HistoryLength { .. }
            | Self::NonFiniteSample { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidCodebook { .. } => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. } | Self::InvalidCodebook { .. } => {
                ErrorCategory::Configuration
            }
            Self::LagOutOfRange { .. } | Self::HistoryLength { .. } => ErrorCategory::Contract,
            Self::NonFiniteSample { .. } => ErrorCategory::Input,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and codebook errors
    Configuration,
    /// Call arguments violating the lag or buffer contract
    Contract,
    /// Sample values the quantizer cannot process
    Input,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Contract => write!(f, "Contract"),
            Self::Input => write!(f, "Input"),
        }
    }
}
