//! Kyber512 implementation (NIST Level 1)
//!
//! ML-KEM-512: rank 2 with the wider secret noise eta1 = 3.

use crate::{
    error::Result,
    kyber::{self, Ciphertext, PublicKey, SecretKey, SharedSecret},
    params::kyber::kyber512::*,
    traits::{Kem, SecureRandom},
};

/// Kyber512 implementation struct
#[derive(Debug, Clone, Copy, Default)]
pub struct Kyber512;

impl Kem for Kyber512 {
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
impl crate::traits::SeededKem for Kyber512 {
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
    fn test_kyber512_round_trip() {
        let mut rng = TestRng::new(512);
        let (pk, sk) = Kyber512::generate_keypair(&mut rng).unwrap();
        assert_eq!(pk.as_bytes().len(), Kyber512::PUBLIC_KEY_SIZE);
        assert_eq!(sk.as_bytes().len(), Kyber512::SECRET_KEY_SIZE);

        let (ct, ss) = Kyber512::encapsulate(&pk, &mut rng).unwrap();
        assert_eq!(ct.as_bytes().len(), 768);
        assert_eq!(Kyber512::decapsulate(&sk, &ct), ss);
    }

    #[test]
    fn test_kyber512_serialized_keys_still_work() {
        let (pk, sk) = Kyber512::keypair_from_seed(&[3u8; 64]).unwrap();
        let pk = PublicKey::<K>::from_bytes(&pk.to_bytes()).unwrap();
        let sk = SecretKey::<K>::from_bytes(&sk.to_bytes()).unwrap();

        let (ct, ss) = Kyber512::encapsulate_derand(&pk, &[4u8; 32]).unwrap();
        let ct = Ciphertext::<K>::from_bytes(&ct.to_bytes()).unwrap();
        assert_eq!(Kyber512::decapsulate(&sk, &ct), ss);
    }
}
