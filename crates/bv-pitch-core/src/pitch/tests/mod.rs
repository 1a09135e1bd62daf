//! Pitch Tap Quantizer Test Modules
//!
//! This module organizes the test suite for the pitch tap quantizer.

pub mod utils;
