//! Random number generation utilities
//!
//! [`OsRng`] reads the operating system source, [`RngWrapper`] adapts any
//! `rand_core` CSPRNG, and [`TestRng`] is a reproducible stream for tests.
//! Failures are reported, never papered over with a weaker source.

use crate::error::{Error, Result};
use crate::hash::{Xof256, SHAKE256_RATE};
use crate::traits::SecureRandom;
use core::fmt;
use rand_core::{CryptoRng, RngCore};

/// Operating system randomness via `getrandom`
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRng;

#[cfg(feature = "std")]
impl OsRng {
    /// Handle to the system source
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "std")]
impl SecureRandom for OsRng {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::getrandom(dest).map_err(|err| {
            tracing::error!(code = err.code().get(), "system random source failed");
            Error::RandomnessSourceFailure
        })
    }
}

/// Wrapper for any RngCore + CryptoRng
pub struct RngWrapper<R: RngCore + CryptoRng> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RngWrapper<R> {
    /// Create a new RNG wrapper
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> SecureRandom for RngWrapper<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng.try_fill_bytes(dest).map_err(|_| {
            tracing::error!("wrapped random source failed");
            Error::RandomnessSourceFailure
        })
    }
}

impl<R: RngCore + CryptoRng> fmt::Debug for RngWrapper<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RngWrapper")
            .field("rng", &"<RNG>")
            .finish()
    }
}

/// Deterministic RNG for testing: the SHAKE256 stream of a 64-bit seed.
///
/// Never use this for real keys.
pub struct TestRng {
    xof: Xof256,
    block: [u8; SHAKE256_RATE],
    pos: usize,
}

impl TestRng {
    /// Create a new test RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            xof: Xof256::new(&[b"cypher-pqc test rng", &seed.to_le_bytes()]),
            block: [0u8; SHAKE256_RATE],
            pos: SHAKE256_RATE,
        }
    }
}

impl SecureRandom for TestRng {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        for byte in dest {
            if self.pos == SHAKE256_RATE {
                self.xof.squeeze_block(&mut self.block);
                self.pos = 0;
            }
            *byte = self.block[self.pos];
            self.pos += 1;
        }
        Ok(())
    }
}

impl fmt::Debug for TestRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRng").field("pos", &self.pos).finish()
    }
}

/// Random source that always fails, for exercising error paths
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRng;

impl SecureRandom for FailingRng {
    fn fill_bytes(&mut self, _dest: &mut [u8]) -> Result<()> {
        Err(Error::RandomnessSourceFailure)
    }
}
