//! Random fixture data (owners, amounts, currencies)
//!
//! Each caller owns its generator; seed it to make a test reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const CURRENCIES: [&str; 2] = ["EUR", "USD"];

pub struct RandomGen {
    rng: StdRng,
}

impl RandomGen {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Integer in `[min, max)`
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..max)
    }

    pub fn string(&mut self, n: usize) -> String {
        (0..n)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }

    pub fn owner(&mut self) -> String {
        self.string(6)
    }

    /// Amount in `[0, 1000)` minor units
    pub fn money(&mut self) -> i64 {
        self.int(0, 1000)
    }

    pub fn currency(&mut self) -> String {
        CURRENCIES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CURRENCIES[0])
            .to_string()
    }
}

impl Default for RandomGen {
    fn default() -> Self {
        Self::new()
    }
}
