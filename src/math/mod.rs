//! Mathematical utilities for the generator

/// Deterministic linear congruential generator
pub mod random;
