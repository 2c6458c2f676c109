//! A small, seedable, pseudorandom number generator.
//!
//! The permuted congruential generator PCG32 (XSH-RR variant), see <https://www.pcg-random.org/>.
//!
//! Randomness is only used to break ties in decisions, and the generator is always seeded, so solves are reproducible.

use rand::SeedableRng;
use rand_core::{RngCore, impls};

/// The multiplier of the underlying linear congruential generator.
const MULTIPLIER: u64 = 6364136223846793005;

/// The (odd) increment of the underlying linear congruential generator.
const INCREMENT: u64 = 1442695040888963407;

/// State of the generator.
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rotation = (old_state >> 59) as u32;
        xorshifted.rotate_right(rotation)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut generator = Self { state: 0 };
        generator.next_u32();
        generator.state = generator.state.wrapping_add(u64::from_le_bytes(seed));
        generator.next_u32();
        generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = MinimalPCG32::from_seed(73_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(73_u64.to_le_bytes());

        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut a = MinimalPCG32::from_seed(2_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(3_u64.to_le_bytes());

        let a_values = (0..8).map(|_| a.next_u32()).collect::<Vec<_>>();
        let b_values = (0..8).map(|_| b.next_u32()).collect::<Vec<_>>();
        assert_ne!(a_values, b_values);
    }

    #[test]
    fn bytes_are_filled() {
        let mut generator = MinimalPCG32::from_seed(0_u64.to_le_bytes());
        let mut bytes = [0_u8; 37];
        generator.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|byte| *byte != 0));
    }
}
