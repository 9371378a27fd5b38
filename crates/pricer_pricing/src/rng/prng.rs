//! Pseudo-random number generator wrapper for Monte Carlo simulations.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// SplitMix64 finaliser: a bijective avalanche mix of a 64-bit word.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Monte Carlo simulation random number generator.
///
/// Wraps [`StdRng`] with the seed it was initialised from, so that every
/// simulation can report the seed needed to reproduce it.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// assert_eq!(rng.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Creates a generator initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator for sub-stream `stream` of `seed`.
    ///
    /// Parallel workers each take their own stream index; the mapping from
    /// `(seed, stream)` to the generated sequence is fixed, independent of the
    /// thread that consumes it.
    #[inline]
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::from_seed(splitmix64(seed ^ splitmix64(stream)))
    }

    /// Draws a fresh seed from operating-system entropy.
    pub fn entropy_seed() -> u64 {
        OsRng.next_u64()
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate (Ziggurat via
    /// `rand_distr::StandardNormal`).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.gen_normal();
        }
    }
}
