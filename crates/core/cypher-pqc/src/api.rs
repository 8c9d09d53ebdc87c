//! Byte-level API
//!
//! Functions in this module take and return raw byte buffers, so callers can
//! pass keys around without naming the typed key structs. Every buffer is
//! length-checked before any arithmetic runs; secret outputs come back in
//! [`Zeroizing`] so they are wiped when the caller drops them.
//!
//! ## Security Levels
//!
//! - **Level 1**: Kyber512
//! - **Level 2**: Dilithium2
//! - **Level 3**: Kyber768, Dilithium3 (the defaults)
//! - **Level 5**: Kyber1024, Dilithium5
//!
//! ## Examples
//!
//! ### Key encapsulation
//! ```no_run
//! use cypher_pqc::api::*;
//! use cypher_pqc::random::OsRng;
//!
//! let mut rng = OsRng::new();
//! let (public_key, secret_key) = generate_keypair(KemAlgorithm::Kyber768, &mut rng)?;
//! let (ciphertext, shared_secret) = encapsulate(KemAlgorithm::Kyber768, &public_key, &mut rng)?;
//! let recovered = decapsulate(KemAlgorithm::Kyber768, &secret_key, &ciphertext)?;
//! assert_eq!(*shared_secret, *recovered);
//! # Ok::<(), cypher_pqc::Error>(())
//! ```
//!
//! ### Digital signatures
//! ```no_run
//! use cypher_pqc::api::*;
//! use cypher_pqc::random::OsRng;
//!
//! let mut rng = OsRng::new();
//! let message = b"Important message";
//! let (public_key, secret_key) = generate_signing_keypair(SignatureAlgorithm::Dilithium3, &mut rng)?;
//! let signature = sign(SignatureAlgorithm::Dilithium3, &secret_key, message, &mut rng)?;
//! assert!(verify(SignatureAlgorithm::Dilithium3, &public_key, message, &signature));
//! # Ok::<(), cypher_pqc::Error>(())
//! ```

use crate::{
    dilithium::{Dilithium2, Dilithium3, Dilithium5},
    error::{Error, Result},
    kyber::{Kyber1024, Kyber512, Kyber768},
    params::{dilithium as dparams, kyber as kparams},
    traits::{Kem, SecureRandom, Serializable, Signature},
};
use alloc::vec::Vec;
use core::fmt;
use zeroize::Zeroizing;

/// Algorithm identifiers for KEMs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KemAlgorithm {
    /// Kyber512 (ML-KEM-512), NIST Level 1
    Kyber512,
    /// Kyber768 (ML-KEM-768), NIST Level 3
    #[default]
    Kyber768,
    /// Kyber1024 (ML-KEM-1024), NIST Level 5
    Kyber1024,
}

impl KemAlgorithm {
    /// All supported KEM parameter sets
    pub const ALL: [KemAlgorithm; 3] = [Self::Kyber512, Self::Kyber768, Self::Kyber1024];

    /// NIST security category
    pub fn security_level(&self) -> u8 {
        match self {
            Self::Kyber512 => 1,
            Self::Kyber768 => 3,
            Self::Kyber1024 => 5,
        }
    }

    fn params(&self) -> kparams::KyberParameters {
        match self {
            Self::Kyber512 => kparams::kyber512::PARAMS,
            Self::Kyber768 => kparams::kyber768::PARAMS,
            Self::Kyber1024 => kparams::kyber1024::PARAMS,
        }
    }

    /// Public key size in bytes
    pub fn public_key_size(&self) -> usize {
        self.params().public_key_bytes()
    }

    /// Secret key size in bytes
    pub fn secret_key_size(&self) -> usize {
        self.params().secret_key_bytes()
    }

    /// Ciphertext size in bytes
    pub fn ciphertext_size(&self) -> usize {
        self.params().ciphertext_bytes()
    }

    /// Shared secret size in bytes (32 for every set)
    pub fn shared_secret_size(&self) -> usize {
        kparams::SSBYTES
    }
}

impl fmt::Display for KemAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kyber512 => write!(f, "ML-KEM-512 (Kyber512)"),
            Self::Kyber768 => write!(f, "ML-KEM-768 (Kyber768)"),
            Self::Kyber1024 => write!(f, "ML-KEM-1024 (Kyber1024)"),
        }
    }
}

/// Algorithm identifiers for signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignatureAlgorithm {
    /// Dilithium2 (ML-DSA-44), NIST Level 2
    Dilithium2,
    /// Dilithium3 (ML-DSA-65), NIST Level 3
    #[default]
    Dilithium3,
    /// Dilithium5 (ML-DSA-87), NIST Level 5
    Dilithium5,
}

impl SignatureAlgorithm {
    /// All supported signature parameter sets
    pub const ALL: [SignatureAlgorithm; 3] = [Self::Dilithium2, Self::Dilithium3, Self::Dilithium5];

    /// NIST security category
    pub fn security_level(&self) -> u8 {
        match self {
            Self::Dilithium2 => 2,
            Self::Dilithium3 => 3,
            Self::Dilithium5 => 5,
        }
    }

    fn params(&self) -> dparams::DilithiumParameters {
        match self {
            Self::Dilithium2 => dparams::dilithium2::PARAMS,
            Self::Dilithium3 => dparams::dilithium3::PARAMS,
            Self::Dilithium5 => dparams::dilithium5::PARAMS,
        }
    }

    /// Public key size in bytes
    pub fn public_key_size(&self) -> usize {
        self.params().public_key_bytes()
    }

    /// Secret key size in bytes
    pub fn secret_key_size(&self) -> usize {
        self.params().secret_key_bytes()
    }

    /// Signature size in bytes
    pub fn signature_size(&self) -> usize {
        self.params().signature_bytes()
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dilithium2 => write!(f, "ML-DSA-44 (Dilithium2)"),
            Self::Dilithium3 => write!(f, "ML-DSA-65 (Dilithium3)"),
            Self::Dilithium5 => write!(f, "ML-DSA-87 (Dilithium5)"),
        }
    }
}

/// Public bytes plus zeroizing secret bytes
pub type RawKeyPair = (Vec<u8>, Zeroizing<Vec<u8>>);

fn parse<T: Serializable>(input: &'static str, bytes: &[u8]) -> Result<T> {
    T::from_bytes(bytes).inspect_err(|err| {
        tracing::debug!(input, error = %err, "rejected input buffer");
    })
}

#[cfg(any(test, feature = "test-utils"))]
fn check_seed<const N: usize>(seed: &[u8]) -> Result<&[u8; N]> {
    seed.try_into().map_err(|_| {
        tracing::debug!(expected = N, actual = seed.len(), "rejected key generation seed");
        Error::InvalidSeed { expected: N, actual: seed.len() }
    })
}

fn raw_pair<P: AsRef<[u8]>, S: AsRef<[u8]>>(pk: P, sk: S) -> RawKeyPair {
    (pk.as_ref().to_vec(), Zeroizing::new(sk.as_ref().to_vec()))
}

fn kem_keypair<T: Kem, R: SecureRandom>(rng: &mut R) -> Result<RawKeyPair> {
    let (pk, sk) = T::generate_keypair(rng)?;
    Ok(raw_pair(pk, sk))
}

#[cfg(any(test, feature = "test-utils"))]
fn kem_keypair_from_seed<T: crate::traits::SeededKem>(seed: &[u8; 64]) -> Result<RawKeyPair> {
    let (pk, sk) = T::keypair_from_seed(seed)?;
    Ok(raw_pair(pk, sk))
}

fn kem_encapsulate<T: Kem, R: SecureRandom>(
    public_key: &[u8],
    rng: &mut R,
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>
where
    T::PublicKey: Serializable,
{
    let pk = parse::<T::PublicKey>("public key", public_key)?;
    let (ct, ss) = T::encapsulate(&pk, rng)?;
    Ok((ct.as_ref().to_vec(), Zeroizing::new(ss.as_ref().to_vec())))
}

fn kem_decapsulate<T: Kem>(secret_key: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>>
where
    T::SecretKey: Serializable,
    T::Ciphertext: Serializable,
{
    let sk = parse::<T::SecretKey>("secret key", secret_key)?;
    let ct = parse::<T::Ciphertext>("ciphertext", ciphertext)?;
    let ss = T::decapsulate(&sk, &ct);
    Ok(Zeroizing::new(ss.as_ref().to_vec()))
}

fn sig_keypair<T: Signature, R: SecureRandom>(rng: &mut R) -> Result<RawKeyPair> {
    let (pk, sk) = T::generate_keypair(rng)?;
    Ok(raw_pair(pk, sk))
}

#[cfg(any(test, feature = "test-utils"))]
fn sig_keypair_from_seed<T: crate::traits::SeededSignature>(seed: &[u8; 32]) -> Result<RawKeyPair> {
    let (pk, sk) = T::keypair_from_seed(seed)?;
    Ok(raw_pair(pk, sk))
}

fn sig_sign<T: Signature, R: SecureRandom>(
    secret_key: &[u8],
    message: &[u8],
    context: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>>
where
    T::SecretKey: Serializable,
{
    let sk = parse::<T::SecretKey>("secret key", secret_key)?;
    let sig = T::sign_with_context(&sk, message, context, rng)?;
    Ok(sig.as_ref().to_vec())
}

fn sig_verify<T: Signature>(public_key: &[u8], message: &[u8], context: &[u8], signature: &[u8]) -> bool
where
    T::PublicKey: Serializable,
    T::Sig: Serializable,
{
    let Ok(pk) = parse::<T::PublicKey>("public key", public_key) else {
        return false;
    };
    let Ok(sig) = parse::<T::Sig>("signature", signature) else {
        return false;
    };
    T::verify_with_context(&pk, message, context, &sig)
}

/// Generate a KEM keypair from the secure random source
pub fn generate_keypair<R: SecureRandom>(algorithm: KemAlgorithm, rng: &mut R) -> Result<RawKeyPair> {
    match algorithm {
        KemAlgorithm::Kyber512 => kem_keypair::<Kyber512, R>(rng),
        KemAlgorithm::Kyber768 => kem_keypair::<Kyber768, R>(rng),
        KemAlgorithm::Kyber1024 => kem_keypair::<Kyber1024, R>(rng),
    }
}

/// Derive a KEM keypair from a 64-byte seed.
///
/// The seed is the FIPS 203 pair `d || z`, not a single 32-byte value:
/// `d` (bytes 0..32) determines the public key and the IND-CPA secret,
/// `z` (bytes 32..64) is stored in the secret key as the implicit-rejection
/// seed. Any other length fails with [`Error::InvalidSeed`].
///
/// Reproducible keys are for known-answer testing; production keys come from
/// [`generate_keypair`]. Requires the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub fn generate_keypair_from_seed(algorithm: KemAlgorithm, seed: &[u8]) -> Result<RawKeyPair> {
    let seed = check_seed::<{ kparams::KEYPAIR_SEED_BYTES }>(seed)?;
    match algorithm {
        KemAlgorithm::Kyber512 => kem_keypair_from_seed::<Kyber512>(seed),
        KemAlgorithm::Kyber768 => kem_keypair_from_seed::<Kyber768>(seed),
        KemAlgorithm::Kyber1024 => kem_keypair_from_seed::<Kyber1024>(seed),
    }
}

/// Encapsulate a fresh shared secret to `public_key`.
///
/// Returns `(ciphertext, shared_secret)`.
pub fn encapsulate<R: SecureRandom>(
    algorithm: KemAlgorithm,
    public_key: &[u8],
    rng: &mut R,
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    match algorithm {
        KemAlgorithm::Kyber512 => kem_encapsulate::<Kyber512, R>(public_key, rng),
        KemAlgorithm::Kyber768 => kem_encapsulate::<Kyber768, R>(public_key, rng),
        KemAlgorithm::Kyber1024 => kem_encapsulate::<Kyber1024, R>(public_key, rng),
    }
}

/// Recover the shared secret from `ciphertext`.
///
/// Fails on a length mismatch, or with [`Error::MalformedSecretKey`] when the
/// key's embedded `H(ek)` does not match its `ek`. A ciphertext that does not
/// decrypt consistently yields the implicit-rejection secret instead of an error.
pub fn decapsulate(
    algorithm: KemAlgorithm,
    secret_key: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    match algorithm {
        KemAlgorithm::Kyber512 => kem_decapsulate::<Kyber512>(secret_key, ciphertext),
        KemAlgorithm::Kyber768 => kem_decapsulate::<Kyber768>(secret_key, ciphertext),
        KemAlgorithm::Kyber1024 => kem_decapsulate::<Kyber1024>(secret_key, ciphertext),
    }
}

/// Generate a signing keypair from the secure random source
pub fn generate_signing_keypair<R: SecureRandom>(
    algorithm: SignatureAlgorithm,
    rng: &mut R,
) -> Result<RawKeyPair> {
    match algorithm {
        SignatureAlgorithm::Dilithium2 => sig_keypair::<Dilithium2, R>(rng),
        SignatureAlgorithm::Dilithium3 => sig_keypair::<Dilithium3, R>(rng),
        SignatureAlgorithm::Dilithium5 => sig_keypair::<Dilithium5, R>(rng),
    }
}

/// Derive a signing keypair from the 32-byte FIPS 204 seed `xi`.
///
/// For known-answer testing; requires the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub fn generate_signing_keypair_from_seed(
    algorithm: SignatureAlgorithm,
    seed: &[u8],
) -> Result<RawKeyPair> {
    let seed = check_seed::<{ dparams::SEEDBYTES }>(seed)?;
    match algorithm {
        SignatureAlgorithm::Dilithium2 => sig_keypair_from_seed::<Dilithium2>(seed),
        SignatureAlgorithm::Dilithium3 => sig_keypair_from_seed::<Dilithium3>(seed),
        SignatureAlgorithm::Dilithium5 => sig_keypair_from_seed::<Dilithium5>(seed),
    }
}

/// Sign `message` with an empty context string
pub fn sign<R: SecureRandom>(
    algorithm: SignatureAlgorithm,
    secret_key: &[u8],
    message: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    sign_with_context(algorithm, secret_key, message, &[], rng)
}

/// Sign `message` bound to `context` (at most 255 bytes)
pub fn sign_with_context<R: SecureRandom>(
    algorithm: SignatureAlgorithm,
    secret_key: &[u8],
    message: &[u8],
    context: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    match algorithm {
        SignatureAlgorithm::Dilithium2 => sig_sign::<Dilithium2, R>(secret_key, message, context, rng),
        SignatureAlgorithm::Dilithium3 => sig_sign::<Dilithium3, R>(secret_key, message, context, rng),
        SignatureAlgorithm::Dilithium5 => sig_sign::<Dilithium5, R>(secret_key, message, context, rng),
    }
}

/// Verify a signature made with an empty context string
pub fn verify(
    algorithm: SignatureAlgorithm,
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> bool {
    verify_with_context(algorithm, public_key, message, &[], signature)
}

/// Verify a signature bound to `context`.
///
/// Wrong buffer lengths report `false` like any other invalid signature.
pub fn verify_with_context(
    algorithm: SignatureAlgorithm,
    public_key: &[u8],
    message: &[u8],
    context: &[u8],
    signature: &[u8],
) -> bool {
    match algorithm {
        SignatureAlgorithm::Dilithium2 => sig_verify::<Dilithium2>(public_key, message, context, signature),
        SignatureAlgorithm::Dilithium3 => sig_verify::<Dilithium3>(public_key, message, context, signature),
        SignatureAlgorithm::Dilithium5 => sig_verify::<Dilithium5>(public_key, message, context, signature),
    }
}

/// Unified algorithm enum for both KEM and signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Key Encapsulation Mechanism
    Kem(KemAlgorithm),
    /// Digital Signature
    Signature(SignatureAlgorithm),
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kem(alg) => fmt::Display::fmt(alg, f),
            Self::Signature(alg) => fmt::Display::fmt(alg, f),
        }
    }
}

/// Key pair structure for easier key management
#[derive(Clone)]
pub struct KeyPair {
    /// The public key bytes
    pub public_key: Vec<u8>,
    /// The secret key bytes, wiped on drop
    pub secret_key: Zeroizing<Vec<u8>>,
    /// The algorithm used
    pub algorithm: Algorithm,
}

impl KeyPair {
    /// Generate a new keypair
    pub fn generate<R: SecureRandom>(algorithm: Algorithm, rng: &mut R) -> Result<Self> {
        let (public_key, secret_key) = match algorithm {
            Algorithm::Kem(alg) => generate_keypair(alg, rng)?,
            Algorithm::Signature(alg) => generate_signing_keypair(alg, rng)?,
        };
        Ok(KeyPair { public_key, secret_key, algorithm })
    }

    /// Get the public key bytes
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Get the secret key bytes
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm)
            .field("public_key_len", &self.public_key.len())
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Recommended algorithm selection based on security requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecurityLevel {
    /// Level 1-2
    Standard,
    /// Level 3
    #[default]
    High,
    /// Level 5
    VeryHigh,
}

impl SecurityLevel {
    /// Get recommended KEM algorithm for this security level
    pub fn recommended_kem(&self) -> KemAlgorithm {
        match self {
            Self::Standard => KemAlgorithm::Kyber512,
            Self::High => KemAlgorithm::Kyber768,
            Self::VeryHigh => KemAlgorithm::Kyber1024,
        }
    }

    /// Get recommended signature algorithm for this security level
    pub fn recommended_signature(&self) -> SignatureAlgorithm {
        match self {
            Self::Standard => SignatureAlgorithm::Dilithium2,
            Self::High => SignatureAlgorithm::Dilithium3,
            Self::VeryHigh => SignatureAlgorithm::Dilithium5,
        }
    }
}
