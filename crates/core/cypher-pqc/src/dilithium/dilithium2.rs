//! Dilithium2 implementation (NIST Level 2)
//!
//! ML-DSA-44, the smallest set: 4 x 4 matrix, eta = 2, gamma2 = (q-1)/88.

use crate::{
    dilithium::{self, DilithiumPublicKey, DilithiumSecretKey, DilithiumSignature},
    error::Result,
    params::dilithium::dilithium2::*,
    traits::{SecureRandom, Signature},
};

/// Dilithium2 implementation struct
#[derive(Debug, Clone, Copy, Default)]
pub struct Dilithium2;

impl Signature for Dilithium2 {
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
impl crate::traits::SeededSignature for Dilithium2 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::TestRng;
    use crate::traits::SeededSignature;

    #[test]
    fn test_dilithium2_sizes() {
        let mut rng = TestRng::new(44);
        let (pk, sk) = Dilithium2::generate_keypair(&mut rng).unwrap();
        let sig = Dilithium2::sign(&sk, b"size check", &mut rng).unwrap();
        assert_eq!(pk.as_bytes().len(), 1312);
        assert_eq!(sk.as_bytes().len(), 2560);
        assert_eq!(sig.as_bytes().len(), 2420);
        assert!(Dilithium2::verify(&pk, b"size check", &sig));
    }

    #[test]
    fn test_dilithium2_wrong_key() {
        let (pk, _) = Dilithium2::keypair_from_seed(&[1u8; 32]).unwrap();
        let (_, other) = Dilithium2::keypair_from_seed(&[2u8; 32]).unwrap();
        let sig = Dilithium2::sign_derand(&other, b"m", b"", &[0u8; 32]).unwrap();
        assert!(!Dilithium2::verify(&pk, b"m", &sig));
    }
}
