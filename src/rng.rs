//! Seeded linear-congruential sequence generator.
//!
//! Every random decision in a battle flows through one `SeededRng` passed by
//! reference. Two generators built from the same seed and driven with the
//! same calls produce the same values forever.

use crate::common::BattleError;
use crate::config::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use rand::{RngCore, SeedableRng};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    seed: u64,
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            state: seed % LCG_MODULUS,
        }
    }

    /// Seed this generator was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw recurrence state, always below the modulus.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            % LCG_MODULUS;
        self.state
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / LCG_MODULUS as f64
    }

    /// Integer in `[min, max]`, both inclusive. A reversed range yields `min`.
    pub fn next_int(&mut self, min: usize, max: usize) -> usize {
        let r = self.next_f64();
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        // r < 1.0 keeps the product strictly below span
        min + (r * span) as usize
    }

    pub fn next_bool(&mut self) -> bool {
        self.next_f64() < 0.5
    }

    /// `true` with probability `p`.
    pub fn next_chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniformly picks one element of `items`.
    pub fn next_choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, BattleError> {
        if items.is_empty() {
            return Err(BattleError::InvalidArgument(
                "cannot choose from an empty list",
            ));
        }
        let idx = self.next_int(0, items.len() - 1);
        Ok(&items[idx])
    }

    /// Rewind to the state right after construction.
    pub fn reset(&mut self) {
        self.state = self.seed % LCG_MODULUS;
    }
}

impl RngCore for SeededRng {
    // The low bits of an LCG have short periods, so only the top half of
    // each step is used.
    fn next_u32(&mut self) -> u32 {
        let hi = (self.step() >> 16) as u32;
        let lo = (self.step() >> 16) as u32;
        (hi << 16) | lo
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
