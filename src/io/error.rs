//! Error taxonomy for generation and its binary-side I/O
//!
//! Invariant violations found by post-validation are deliberately absent:
//! they never abort a stage and are reported through
//! [`crate::analysis::validation::ValidationReport`] instead.

use crate::spatial::position::Position;
use std::path::PathBuf;
use thiserror::Error;

/// Broad category of a [`GenerationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any grid mutation
    Configuration,
    /// Not enough suitable tiles to satisfy a request
    ResourceExhaustion,
    /// The carve loop could not continue
    Generation,
    /// Filesystem or encoding failure outside the core
    Io,
}

/// Main error type for all generation operations
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A configuration value violates a hard constraint
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Fewer FLOOR tiles than requested biome centers
    #[error("Not enough FLOOR tiles for biome centers. Need {needed}, found {found}")]
    InsufficientFloorTiles {
        /// Total centers requested across all biomes
        needed: usize,
        /// FLOOR tiles available
        found: usize,
    },

    /// Key pool ran dry before every key was placed
    #[error("Could only place {placed}/{requested} keys")]
    InsufficientKeyTiles {
        /// Keys placed before running out
        placed: usize,
        /// Keys requested
        requested: usize,
    },

    /// Single-section carving reached a cell with no legal move
    #[error("No valid moves at {position} with {floor_count}/{target} floor tiles carved")]
    NoValidMoves {
        /// Miner position when it got stuck
        position: Position,
        /// Floor tiles carved so far
        floor_count: usize,
        /// Floor target for the section
        target: usize,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration '{}': {source}", path.display())]
    ConfigParse {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Stats report could not be encoded
    #[error("Failed to encode report for '{}': {source}", path.display())]
    ReportExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to save a rendered map
    #[error("Failed to export image to '{}': {source}", path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        #[source]
        source: image::ImageError,
    },
}

impl GenerationError {
    /// Category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::Configuration,
            Self::InsufficientFloorTiles { .. } | Self::InsufficientKeyTiles { .. } => {
                ErrorKind::ResourceExhaustion
            }
            Self::NoValidMoves { .. } => ErrorKind::Generation,
            Self::FileSystem { .. }
            | Self::ConfigParse { .. }
            | Self::ReportExport { .. }
            | Self::ImageExport { .. } => ErrorKind::Io,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for `path`
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> GenerationError {
    GenerationError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
