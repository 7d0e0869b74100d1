//! RNG module - uniform shape draws
//!
//! Every draw picks one of the seven kinds uniformly and independently. There is
//! no bag and no anti-repeat rule, so the same kind may come up any number of
//! times in a row.
//!
//! The generator is a small seeded LCG so games are reproducible from a seed.

use crate::types::ShapeId;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point of the multiply step.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a value in `[0, max)`
    ///
    /// Uses the high bits, which have a much longer period than the low bits of an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }
}

/// Independent uniform draws over the seven shape kinds
#[derive(Debug, Clone)]
pub struct UniformShapes {
    rng: SimpleRng,
}

impl UniformShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn draw(&mut self) -> ShapeId {
        let idx = self.rng.next_range(ShapeId::ALL.len() as u32) as usize;
        ShapeId::ALL[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_does_not_stick() {
        let mut rng = SimpleRng::new(0);
        let first = rng.next_u32();
        assert_ne!(first, rng.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_draws_cover_all_kinds() {
        let mut shapes = UniformShapes::new(42);
        let mut counts = [0u32; 7];
        for _ in 0..7_000 {
            counts[shapes.draw().index()] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            // Expect ~1000 each; allow wide slack.
            assert!(count > 700 && count < 1300, "kind {} drawn {} times", i, count);
        }
    }

    #[test]
    fn test_repeats_are_allowed() {
        let mut shapes = UniformShapes::new(3);
        let draws: Vec<ShapeId> = (0..200).map(|_| shapes.draw()).collect();
        assert!(draws.windows(2).any(|w| w[0] == w[1]));
    }
}
