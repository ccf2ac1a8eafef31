//! Seeded linear congruential generator shared by every generation stage
//!
//! The exact stream is part of the output contract: identical seeds and
//! identical call order must reproduce identical maps on every platform, so
//! all arithmetic is fixed-width integer math rather than floating point.

use rand::{RngCore, SeedableRng};

/// LCG multiplier
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
/// LCG increment
pub const LCG_INCREMENT: u64 = 12_345;
/// LCG modulus (2^31)
pub const LCG_MODULUS: u64 = 1 << 31;

const MODULUS_MASK: u64 = LCG_MODULUS - 1;

/// Deterministic pseudo-random stream
///
/// One instance is created per stage from the stage seed and passed by
/// mutable reference through every helper that draws from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a generator whose first draw advances from `seed`
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    pub const fn state(&self) -> u64 {
        self.state
    }

    // Wrapping is exact here: 2^31 divides 2^64, so reducing the wrapped
    // product modulo 2^31 gives the true residue even for huge seeds.
    const fn advance(&mut self) -> u64 {
        self.state = LCG_MULTIPLIER
            .wrapping_mul(self.state)
            .wrapping_add(LCG_INCREMENT)
            & MODULUS_MASK;
        self.state
    }

    /// Next value in `[0, 1)`
    pub fn next(&mut self) -> f64 {
        self.advance() as f64 / LCG_MODULUS as f64
    }

    /// Next integer in `[min, max)`
    ///
    /// Computed as `floor(next() * (max - min)) + min`. When `max <= min`
    /// the draw is still consumed and `min` is returned.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min).max(0) as f64;
        (self.next() * span).floor() as i64 + min
    }

    /// Next index in `[0, bound)`, equivalent to `next_int(0, bound)`
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next() * bound as f64).floor() as usize
    }

    /// Pick one element uniformly, or `None` for an empty slice
    ///
    /// No draw is consumed when the slice is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_index(items.len());
        items.get(index)
    }

    /// In-place Fisher-Yates shuffle, walking from the last index down
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

// Only 31 bits of state exist; they are placed in the high end of the word so
// consumers reading the top bits see the full stream.
impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        (self.advance() as u32) << 1
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            for (slot, byte) in chunk.iter_mut().zip(bytes) {
                *slot = byte;
            }
        }
    }
}

impl SeedableRng for SeededRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
