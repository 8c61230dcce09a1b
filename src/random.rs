//! Random number abstraction for auto color selection.

use nanorand::{Rng, WyRand};

/// Seed used when none is configured.
///
/// With a fixed seed the color sequence is identical after every reset.
/// Supply a seed from a hardware entropy source to vary it.
pub const DEFAULT_SEED: u64 = 0x5eed_c01a_b1e5_0001;

/// Trait for abstracting the random number source.
pub trait RandomSource {
    /// Returns a uniformly distributed value in `0..bound`.
    ///
    /// Returns 0 when `bound` is 0.
    fn next_below(&mut self, bound: u8) -> u8;
}

impl RandomSource for WyRand {
    fn next_below(&mut self, bound: u8) -> u8 {
        if bound == 0 {
            return 0;
        }
        self.generate_range(0..bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u8) -> u8 {
        (**self).next_below(bound)
    }
}

/// Creates the default generator from `seed`.
#[inline]
pub fn seeded(seed: u64) -> WyRand {
    WyRand::new_seed(seed)
}
