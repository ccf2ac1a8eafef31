//! Spatial data structures
//!
//! This module contains:
//! - Positions and compass directions
//! - The tile grid shared by every stage
//! - Section partitioning for the carver

/// Tile model and grid storage
pub mod grid;
/// Coordinates and directions
pub mod position;
/// Rectangular carving sections
pub mod section;

pub use grid::{Grid, Tile, TileType};
pub use position::Position;
