//! RNG module - shape selection
//!
//! Shapes are drawn uniformly with a weak anti-repeat: a draw equal to the
//! previously spawned shape is resampled once. This is not a 7-bag.
//!
//! The generator is a small LCG so identical seeds replay identical games.

use crate::types::BlockType;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seed 0 maps to a fixed non-zero state.
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Uses the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

fn draw_shape(rng: &mut SimpleRng) -> BlockType {
    BlockType::ALL[rng.next_range(BlockType::ALL.len() as u32) as usize]
}

/// Pick the next shape, resampling once if it repeats `last`
pub fn next_shape(rng: &mut SimpleRng, last: Option<BlockType>) -> BlockType {
    let first = draw_shape(rng);
    if Some(first) == last {
        draw_shape(rng)
    } else {
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn every_shape_appears() {
        let mut rng = SimpleRng::new(12345);
        let mut seen = [false; 7];
        let mut last = None;
        for _ in 0..500 {
            let kind = next_shape(&mut rng, last);
            let idx = BlockType::ALL.iter().position(|k| *k == kind).unwrap();
            seen[idx] = true;
            last = Some(kind);
        }
        assert!(seen.iter().all(|s| *s), "{:?}", seen);
    }

    #[test]
    fn repeats_are_rarer_than_uniform() {
        let mut rng = SimpleRng::new(99);
        let mut last = None;
        let mut repeats = 0;
        let n = 7000;
        for _ in 0..n {
            let kind = next_shape(&mut rng, last);
            if Some(kind) == last {
                repeats += 1;
            }
            last = Some(kind);
        }
        // Uniform would repeat ~1/7 of the time; one resample makes it ~1/49.
        assert!(repeats < n / 14, "repeats = {repeats}");
    }
}
