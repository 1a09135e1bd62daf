//! Utility functions shared by the quantizer steps

pub mod validation;

pub use validation::{validate_history, validate_lag};
