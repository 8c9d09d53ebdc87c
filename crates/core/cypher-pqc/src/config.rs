//! Compile-time configuration
//!
//! Everything here is fixed when the crate is built. Signing mode follows the
//! `deterministic-signing` Cargo feature; the loop bounds are constants so that
//! every rejection loop has a known worst case.

/// How ML-DSA derives the per-signature randomness `rnd`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    /// `rnd` is drawn from the caller's secure random source
    Hedged,
    /// `rnd` is 32 zero bytes, so equal inputs give equal signatures
    Deterministic,
}

/// Signing mode selected for this build
#[cfg(not(feature = "deterministic-signing"))]
pub const SIGNING_MODE: SigningMode = SigningMode::Hedged;

/// Signing mode selected for this build
#[cfg(feature = "deterministic-signing")]
pub const SIGNING_MODE: SigningMode = SigningMode::Deterministic;

/// Maximum ML-DSA signing iterations before giving up.
///
/// FIPS 204 Appendix C: with at least 814 iterations the failure rate for
/// every parameter set is below 2^-256. 821 keeps mask nonces `κ·l + i`
/// inside `u16` for all parameter sets.
pub const MAX_SIGNING_ATTEMPTS: u16 = 821;

/// SHAKE128 blocks ML-KEM `SampleNTT` may draw for one polynomial.
///
/// Three blocks suffice with probability above 1 - 2^-40.
pub const KYBER_UNIFORM_MAX_BLOCKS: usize = 32;

/// SHAKE128 blocks ML-DSA `RejNTTPoly` may draw for one polynomial.
pub const DILITHIUM_UNIFORM_MAX_BLOCKS: usize = 32;

/// SHAKE256 blocks ML-DSA `RejBoundedPoly` may draw for one polynomial.
pub const DILITHIUM_ETA_MAX_BLOCKS: usize = 16;

/// SHAKE256 blocks `SampleInBall` may draw for one challenge.
pub const CHALLENGE_MAX_BLOCKS: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_nonces_fit_u16() {
        // Largest l is 7 (ML-DSA-87)
        let max_nonce = u32::from(MAX_SIGNING_ATTEMPTS) * 7 + 6;
        assert!(max_nonce <= u32::from(u16::MAX));
    }

    #[cfg(not(feature = "deterministic-signing"))]
    #[test]
    fn test_default_mode_is_hedged() {
        assert_eq!(SIGNING_MODE, SigningMode::Hedged);
    }
}
