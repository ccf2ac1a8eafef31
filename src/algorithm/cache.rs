use crate::spatial::position::Position;
use bitvec::prelude::*;
use serde::Serialize;

/// Memoised breakability flags for the carving loop
///
/// Both layers are monotone: a wall that cannot be broken never becomes
/// breakable again (floors are never filled back in and the border never
/// moves), and a floor whose walls were all unbreakable stays exhausted.
/// The cache therefore only ever skips work, never changes a decision.
#[derive(Debug, Clone)]
pub struct BreakabilityCache {
    width: usize,
    height: usize,
    /// Target cells known to be unbreakable
    cant_break: BitVec,
    /// Floor cells known to have no breakable neighbour
    no_further_break: BitVec,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Legality checks answered from the cache
    pub hits: usize,
    /// Legality checks that had to be computed
    pub misses: usize,
    /// Cells flagged as unbreakable
    pub unbreakable_marked: usize,
    /// Floor cells flagged as exhausted
    pub exhausted_marked: usize,
}

impl BreakabilityCache {
    /// Create an empty cache for a `width` x `height` grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cant_break: bitvec![0; width * height],
            no_further_break: bitvec![0; width * height],
            stats: CacheStats::default(),
        }
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Whether `pos` is recorded as an unbreakable target
    pub fn is_unbreakable(&self, pos: Position) -> bool {
        self.offset(pos)
            .and_then(|offset| self.cant_break.get(offset).as_deref().copied())
            .unwrap_or(false)
    }

    /// Record `pos` as an unbreakable target
    pub fn mark_unbreakable(&mut self, pos: Position) {
        if let Some(offset) = self.offset(pos)
            && !self.cant_break.replace(offset, true)
        {
            self.stats.unbreakable_marked += 1;
        }
    }

    /// Whether the floor at `pos` is recorded as having no breakable neighbour
    pub fn is_exhausted(&self, pos: Position) -> bool {
        self.offset(pos)
            .and_then(|offset| self.no_further_break.get(offset).as_deref().copied())
            .unwrap_or(false)
    }

    /// Record the floor at `pos` as having no breakable neighbour
    pub fn mark_exhausted(&mut self, pos: Position) {
        if let Some(offset) = self.offset(pos)
            && !self.no_further_break.replace(offset, true)
        {
            self.stats.exhausted_marked += 1;
        }
    }

    /// Retrieve a cached refusal or compute legality and remember refusals
    ///
    /// The closure runs only when neither the target nor the miner's cell is
    /// already flagged.
    pub fn check_or_compute<F>(&mut self, miner: Position, target: Position, compute_fn: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if self.is_unbreakable(target) || self.is_exhausted(miner) {
            self.stats.hits += 1;
            return false;
        }

        self.stats.misses += 1;
        let breakable = compute_fn();
        if !breakable {
            self.mark_unbreakable(target);
        }
        breakable
    }
}
