//! Dilithium5 implementation (NIST Level 5)
//!
//! ML-DSA-87, 8 x 7 matrix, eta = 2, gamma2 = (q-1)/32.

use crate::{
    dilithium::{self, DilithiumPublicKey, DilithiumSecretKey, DilithiumSignature},
    error::Result,
    params::dilithium::dilithium5::*,
    traits::{SecureRandom, Signature},
};

/// Dilithium5 implementation struct
#[derive(Debug, Clone, Copy, Default)]
pub struct Dilithium5;

impl Signature for Dilithium5 {
    type PublicKey = DilithiumPublicKey<K>;
    type SecretKey = DilithiumSecretKey<K>;
    type Sig = DilithiumSignature<K>;

    const PUBLIC_KEY_SIZE: usize = PUBLIC_KEY_SIZE;
    const SECRET_KEY_SIZE: usize = SECRET_KEY_SIZE;
    const SIGNATURE_SIZE: usize = SIGNATURE_SIZE;

    fn generate_keypair<R: SecureRandom>(rng: &mut R) -> Result<(Self::PublicKey, Self::SecretKey)> {
        dilithium::generate_keypair::<K, L, R>(rng)
    }

    fn sign_with_context<R: SecureRandom>(
        secret_key: &Self::SecretKey,
        message: &[u8],
        context: &[u8],
        rng: &mut R,
    ) -> Result<Self::Sig> {
        dilithium::sign::<K, L, R>(secret_key, message, context, rng)
    }

    fn verify_with_context(
        public_key: &Self::PublicKey,
        message: &[u8],
        context: &[u8],
        signature: &Self::Sig,
    ) -> bool {
        dilithium::verify::<K, L>(public_key, message, context, signature)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl crate::traits::SeededSignature for Dilithium5 {
    fn keypair_from_seed(seed: &[u8; 32]) -> Result<(Self::PublicKey, Self::SecretKey)> {
        dilithium::keypair_derand::<K, L>(seed)
    }

    fn sign_derand(
        secret_key: &Self::SecretKey,
        message: &[u8],
        context: &[u8],
        rnd: &[u8; 32],
    ) -> Result<Self::Sig> {
        dilithium::sign_derand::<K, L>(secret_key, message, context, rnd)
    }
}
