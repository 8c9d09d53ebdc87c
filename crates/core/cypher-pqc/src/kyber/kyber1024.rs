//! Kyber1024 implementation (NIST Level 5)
//!
//! ML-KEM-1024: rank 4, ciphertext compression (du, dv) = (11, 5).

use crate::{
    error::Result,
    kyber::{self, Ciphertext, PublicKey, SecretKey, SharedSecret},
    params::kyber::kyber1024::*,
    traits::{Kem, SecureRandom},
};

/// Kyber1024 implementation struct
#[derive(Debug, Clone, Copy, Default)]
pub struct Kyber1024;

impl Kem for Kyber1024 {
    type PublicKey = PublicKey<K>;
    type SecretKey = SecretKey<K>;
    type Ciphertext = Ciphertext<K>;
    type SharedSecret = SharedSecret;

    const PUBLIC_KEY_SIZE: usize = PUBLIC_KEY_SIZE;
    const SECRET_KEY_SIZE: usize = SECRET_KEY_SIZE;
    const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
    const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;

    fn generate_keypair<R: SecureRandom>(rng: &mut R) -> Result<(Self::PublicKey, Self::SecretKey)> {
        kyber::generate_keypair::<K, R>(rng)
    }

    fn encapsulate<R: SecureRandom>(
        public_key: &Self::PublicKey,
        rng: &mut R,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
        kyber::encapsulate::<K, R>(public_key, rng)
    }

    fn decapsulate(secret_key: &Self::SecretKey, ciphertext: &Self::Ciphertext) -> Self::SharedSecret {
        kyber::decapsulate::<K>(secret_key, ciphertext)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl crate::traits::SeededKem for Kyber1024 {
    fn keypair_from_seed(seed: &[u8; 64]) -> Result<(Self::PublicKey, Self::SecretKey)> {
        kyber::keypair_derand::<K>(seed)
    }

    fn encapsulate_derand(
        public_key: &Self::PublicKey,
        coins: &[u8; 32],
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
        kyber::encapsulate_derand::<K>(public_key, coins)
    }
}
