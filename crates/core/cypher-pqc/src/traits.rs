//! Core traits for cryptographic operations
//!
//! Every parameter set is a zero-sized marker type implementing [`Kem`] or
//! [`Signature`]. The `Seeded*` traits expose the derandomized entry points
//! that known-answer tests and reproducible key derivation rely on.

use crate::error::Result;
use alloc::vec::Vec;
use core::fmt::Debug;
use zeroize::Zeroize;

/// Trait for Key Encapsulation Mechanisms (KEMs)
pub trait Kem: Debug + Send + Sync {
    /// Type representing a public key
    type PublicKey: AsRef<[u8]> + Debug + Clone + PartialEq + Eq;

    /// Type representing a secret key
    type SecretKey: AsRef<[u8]> + Debug + Clone + Zeroize;

    /// Type representing a ciphertext
    type Ciphertext: AsRef<[u8]> + Debug + Clone + PartialEq + Eq;

    /// Type representing a shared secret
    type SharedSecret: AsRef<[u8]> + Debug + Clone + Zeroize + PartialEq;

    /// The size of public keys in bytes
    const PUBLIC_KEY_SIZE: usize;

    /// The size of secret keys in bytes
    const SECRET_KEY_SIZE: usize;

    /// The size of ciphertexts in bytes
    const CIPHERTEXT_SIZE: usize;

    /// The size of shared secrets in bytes
    const SHARED_SECRET_SIZE: usize;

    /// Generate a new keypair
    fn generate_keypair<R: SecureRandom>(
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Encapsulate a shared secret for the given public key
    fn encapsulate<R: SecureRandom>(
        public_key: &Self::PublicKey,
        rng: &mut R,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a shared secret using the secret key.
    ///
    /// Never fails: a ciphertext that does not re-encrypt to itself yields a
    /// pseudorandom secret derived from the key's rejection seed.
    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Self::SharedSecret;
}

/// Deterministic ML-KEM entry points.
///
/// Known-answer testing only; available with the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub trait SeededKem: Kem {
    /// Derive a keypair from the 64-byte seed `d || z`
    fn keypair_from_seed(seed: &[u8; 64]) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Encapsulate with caller-supplied message randomness `m`
    fn encapsulate_derand(
        public_key: &Self::PublicKey,
        coins: &[u8; 32],
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;
}

/// Trait for Digital Signature Algorithms
pub trait Signature: Debug + Send + Sync {
    /// Type representing a public key
    type PublicKey: AsRef<[u8]> + Debug + Clone + PartialEq + Eq;

    /// Type representing a secret key
    type SecretKey: AsRef<[u8]> + Debug + Clone + Zeroize;

    /// Type representing a signature
    type Sig: AsRef<[u8]> + Debug + Clone + PartialEq + Eq;

    /// The size of public keys in bytes
    const PUBLIC_KEY_SIZE: usize;

    /// The size of secret keys in bytes
    const SECRET_KEY_SIZE: usize;

    /// The size of signatures in bytes
    const SIGNATURE_SIZE: usize;

    /// Generate a new keypair
    fn generate_keypair<R: SecureRandom>(
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Sign a message with an empty context string
    fn sign<R: SecureRandom>(
        secret_key: &Self::SecretKey,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Self::Sig> {
        Self::sign_with_context(secret_key, message, &[], rng)
    }

    /// Sign a message bound to a context string of at most 255 bytes
    fn sign_with_context<R: SecureRandom>(
        secret_key: &Self::SecretKey,
        message: &[u8],
        context: &[u8],
        rng: &mut R,
    ) -> Result<Self::Sig>;

    /// Verify a signature made with an empty context string
    fn verify(public_key: &Self::PublicKey, message: &[u8], signature: &Self::Sig) -> bool {
        Self::verify_with_context(public_key, message, &[], signature)
    }

    /// Verify a signature bound to a context string.
    ///
    /// Every failure, including an over-long context, reports `false`.
    fn verify_with_context(
        public_key: &Self::PublicKey,
        message: &[u8],
        context: &[u8],
        signature: &Self::Sig,
    ) -> bool;
}

/// Deterministic ML-DSA entry points.
///
/// Known-answer testing only; available with the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub trait SeededSignature: Signature {
    /// Derive a keypair from the 32-byte seed `xi`
    fn keypair_from_seed(seed: &[u8; 32]) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Sign with caller-supplied per-signature randomness `rnd`
    fn sign_derand(
        secret_key: &Self::SecretKey,
        message: &[u8],
        context: &[u8],
        rnd: &[u8; 32],
    ) -> Result<Self::Sig>;
}

/// Trait for secure random number generation
pub trait SecureRandom {
    /// Fill the given buffer with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Generate a random u32
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Generate a random u64
    fn next_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

impl<R: SecureRandom + ?Sized> SecureRandom for &mut R {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// Trait for types that can be serialized to/from bytes
pub trait Serializable: Sized {
    /// Serialize to bytes
    fn to_bytes(&self) -> Vec<u8>;

    /// Deserialize from bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Trait for types that can be encoded/decoded to/from hex
#[cfg(feature = "std")]
pub trait HexEncodable: Serializable {
    /// Encode to hexadecimal string
    fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode from hexadecimal string
    fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|_| crate::error::Error::InvalidEncoding)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(feature = "std")]
impl<T: Serializable> HexEncodable for T {}
