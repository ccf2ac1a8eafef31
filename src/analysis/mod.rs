//! Statistics and post-validation of stage outputs

/// Per-stage statistics records
pub mod statistics;
/// Invariant checks and validation reports
pub mod validation;
