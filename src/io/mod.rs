//! Error handling, configuration and the binary's input/output surfaces

/// Command-line interface and batch driver
pub mod cli;
/// Generation constants, defaults and configuration loading
pub mod configuration;
/// Error taxonomy and result alias
pub mod error;
/// PNG export of finished maps
pub mod image;
/// Tracing subscriber initialisation
pub mod logging;
/// Batch progress display
pub mod progress;
/// JSON statistics report
pub mod report;
