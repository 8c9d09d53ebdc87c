//! Kyber768 implementation (NIST Level 3)
//!
//! ML-KEM-768, the recommended default: rank 3, eta1 = eta2 = 2,
//! ciphertext compression (du, dv) = (10, 4).

use crate::{
    error::Result,
    kyber::{self, Ciphertext, PublicKey, SecretKey, SharedSecret},
    params::kyber::kyber768::*,
    traits::{Kem, SecureRandom},
};

/// Kyber768 implementation struct
#[derive(Debug, Clone, Copy, Default)]
pub struct Kyber768;

impl Kem for Kyber768 {
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
impl crate::traits::SeededKem for Kyber768 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::TestRng;
    use crate::traits::{SeededKem, Serializable};

    #[test]
    fn test_kyber768_sizes() {
        let mut rng = TestRng::new(768);
        let (pk, sk) = Kyber768::generate_keypair(&mut rng).unwrap();
        assert_eq!(pk.as_bytes().len(), 1184);
        assert_eq!(sk.as_bytes().len(), 2400);

        let (ct, ss) = Kyber768::encapsulate(&pk, &mut rng).unwrap();
        assert_eq!(ct.as_bytes().len(), 1088);
        assert_eq!(ss.as_bytes().len(), 32);
    }

    #[test]
    fn test_kyber768_round_trip() {
        let mut rng = TestRng::new(42);
        for _ in 0..5 {
            let (pk, sk) = Kyber768::generate_keypair(&mut rng).unwrap();
            let (ct, ss) = Kyber768::encapsulate(&pk, &mut rng).unwrap();
            assert_eq!(Kyber768::decapsulate(&sk, &ct), ss);
        }
    }

    #[test]
    fn test_kyber768_seeded_is_deterministic() {
        let seed = [0x24u8; 64];
        let (pk1, sk1) = Kyber768::keypair_from_seed(&seed).unwrap();
        let (pk2, sk2) = Kyber768::keypair_from_seed(&seed).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1.to_bytes(), sk2.to_bytes());

        let (ct1, ss1) = Kyber768::encapsulate_derand(&pk1, &[1u8; 32]).unwrap();
        let (ct2, ss2) = Kyber768::encapsulate_derand(&pk1, &[1u8; 32]).unwrap();
        assert_eq!(ct1, ct2);
        assert_eq!(ss1, ss2);
    }

    #[test]
    fn test_kyber768_wrong_key_disagrees() {
        let mut rng = TestRng::new(7);
        let (pk, _) = Kyber768::generate_keypair(&mut rng).unwrap();
        let (_, other_sk) = Kyber768::generate_keypair(&mut rng).unwrap();
        let (ct, ss) = Kyber768::encapsulate(&pk, &mut rng).unwrap();
        assert_ne!(Kyber768::decapsulate(&other_sk, &ct), ss);
    }
}
