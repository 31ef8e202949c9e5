//! Deterministic pseudo-random stream for reproducible simulations
//!
//! `SeededRng` is a 32-bit linear congruential generator. Every derived
//! helper (ranges, picks, chunk partitions) is defined in terms of draws from
//! the same stream, so two generators built from the same seed and driven
//! through the same calls produce identical results.
//!
//! # Examples
//!
//! ```
//! use seeded_rng::SeededRng;
//!
//! let mut a = SeededRng::new(42);
//! let mut b = SeededRng::new(42);
//!
//! assert_eq!(a.next_f64(), b.next_f64());
//! assert_eq!(a.range(5.0, 10.0), b.range(5.0, 10.0));
//! ```

pub mod chunks;
mod error;


pub use chunks::{ChunkCount, ChunkRequest};
pub use error::ChunkError;

use rand::{Rng, RngCore, SeedableRng};

/// LCG multiplier (Numerical Recipes)
const MULTIPLIER: u32 = 1_664_525;
/// LCG increment (Numerical Recipes)
const INCREMENT: u32 = 1_013_904_223;
/// 2^32, maps the 32-bit state into [0, 1)
const STATE_RANGE: f64 = 4_294_967_296.0;

/// Upper bound (exclusive) for seeds picked by [`SeededRng::from_entropy_seed`]
pub const ENTROPY_SEED_LIMIT: u32 = 1_000_000;

/// Seedable, resettable random stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    initial_seed: u32,
    state: u32,
}

impl SeededRng {
    /// Creates a generator whose stream starts at `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            initial_seed: seed,
            state: seed,
        }
    }

    /// Creates a generator with a seed taken from the thread RNG
    ///
    /// The seed lies in `[0, 1_000_000)` so it stays short enough to share
    /// and type back in to replay a run.
    pub fn from_entropy_seed() -> Self {
        Self::new(rand::rng().random_range(0..ENTROPY_SEED_LIMIT))
    }

    /// Seed the generator was constructed with
    pub fn seed(&self) -> u32 {
        self.initial_seed
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    fn advance(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Draws a value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.advance()) / STATE_RANGE
    }

    /// Draws a value in [min, max) using one draw
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Draws a value in [-value, value) using one draw
    pub fn signed_range(&mut self, value: f64) -> f64 {
        self.next_f64() * (value * 2.0) - value
    }

    /// Picks an element uniformly using one draw
    ///
    /// The draw is consumed even when `items` is empty, so the stream stays
    /// aligned regardless of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use seeded_rng::SeededRng;
    ///
    /// let mut rng = SeededRng::new(7);
    /// let colors = ["red", "green", "blue"];
    /// assert!(rng.pick(&colors).is_some());
    ///
    /// let empty: [u8; 0] = [];
    /// assert!(rng.pick(&empty).is_none());
    /// ```
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let index = (self.next_f64() * items.len() as f64).floor() as usize;
        items.get(index)
    }

    /// Rewinds the stream to the construction seed
    pub fn reset(&mut self) {
        self.state = self.initial_seed;
    }

    /// Restarts the stream from `seed`
    ///
    /// [`reset`](Self::reset) still rewinds to the construction seed.
    pub fn set_seed(&mut self, seed: u32) -> &mut Self {
        self.state = seed;
        self
    }

    /// Partitions the unit interval into random proportions
    ///
    /// See [`chunks::partition`] for the algorithm.
    ///
    /// # Examples
    ///
    /// ```
    /// use seeded_rng::{ChunkRequest, SeededRng};
    ///
    /// let mut rng = SeededRng::new(1);
    /// let parts = rng.chunks(&ChunkRequest::exact(5, 0.1)).unwrap();
    ///
    /// assert_eq!(parts.len(), 5);
    /// assert!(parts.iter().all(|&p| p >= 0.1 - 1e-9));
    /// assert!((parts.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    /// ```
    pub fn chunks(&mut self, request: &ChunkRequest) -> Result<Vec<f64>, ChunkError> {
        chunks::partition(self, request)
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy_seed()
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.advance());
        let low = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
