//! Floor tiles bucketed by cardinal connectivity degree

use crate::spatial::grid::{Grid, TileType};
use crate::spatial::position::{CARDINAL_DIRECTIONS, Position};

/// Highest possible degree
pub const MAX_DEGREE: usize = 4;

/// FLOOR positions grouped by how many cardinal FLOOR neighbours they have
///
/// Degree 1 tiles are dead ends, degree 4 tiles are open hubs. Isolated
/// floors (degree 0) belong to no bucket. Each bucket is in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityMap {
    buckets: [Vec<Position>; MAX_DEGREE],
}

impl ConnectivityMap {
    /// Scan every FLOOR tile of `grid`
    pub fn analyze(grid: &Grid) -> Self {
        let mut map = Self::default();
        for (position, tile) in grid.iter() {
            if tile.kind != TileType::Floor {
                continue;
            }
            let degree = position
                .neighbors(&CARDINAL_DIRECTIONS)
                .filter(|&neighbor| grid.is(neighbor, TileType::Floor))
                .count();
            if let Some(bucket) = degree.checked_sub(1).and_then(|i| map.buckets.get_mut(i)) {
                bucket.push(position);
            }
        }
        map
    }

    /// Positions with exactly `degree` floor neighbours; empty outside `1..=4`
    pub fn get(&self, degree: usize) -> &[Position] {
        degree
            .checked_sub(1)
            .and_then(|i| self.buckets.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total positions across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Whether `position` is in the bucket for `degree`
    pub fn contains(&self, degree: usize, position: Position) -> bool {
        self.get(degree).contains(&position)
    }
}
