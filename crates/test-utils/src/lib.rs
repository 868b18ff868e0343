//! Shared test helpers: randomized values and batch fixtures.

use std::cell::Cell;

use arbitrary::{Arbitrary, Unstructured};
use rand::{
    rngs::{OsRng, StdRng},
    RngCore, SeedableRng,
};

pub mod batch;

/// Size of the byte pool values are drawn from.
const POOL_LEN: usize = 1 << 20;

/// Draws `Arbitrary` values one after another from a single random byte pool.
pub struct ArbitraryGenerator {
    pool: Vec<u8>,
    cursor: Cell<usize>,
}

impl Default for ArbitraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitraryGenerator {
    pub fn new() -> Self {
        Self::from_rng(&mut OsRng, POOL_LEN)
    }

    /// Same seed, same sequence of values. Handy when a randomized test needs
    /// to be replayed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed), POOL_LEN)
    }

    pub fn from_rng(rng: &mut impl RngCore, len: usize) -> Self {
        let mut pool = vec![0; len];
        rng.fill_bytes(&mut pool);
        Self {
            pool,
            cursor: Cell::new(0),
        }
    }

    /// Bytes not consumed yet. Once it hits zero values come out as their
    /// `arbitrary` defaults.
    pub fn remaining(&self) -> usize {
        self.pool.len() - self.cursor.get()
    }

    pub fn generate<'a, T: Arbitrary<'a>>(&'a self) -> T {
        let start = self.cursor.get();
        let mut u = Unstructured::new(&self.pool[start..]);
        let before = u.len();
        let value = T::arbitrary(&mut u).expect("arbitrary value from byte pool");
        self.cursor.set(start + before - u.len());
        value
    }
}
