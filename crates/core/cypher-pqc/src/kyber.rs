//! ML-KEM (Kyber) implementation
//!
//! This module implements the Module-Lattice-Based Key Encapsulation Mechanism
//! as specified in NIST FIPS 203, including the encapsulation-key modulus
//! check and implicit rejection on decapsulation.
//!
//! The engine is generic over the module rank `K`; [`Kyber512`], [`Kyber768`]
//! and [`Kyber1024`] bind it to a parameter set.

pub mod indcpa;
pub mod kyber512;
pub mod kyber768;
pub mod kyber1024;

pub use kyber512::Kyber512;
pub use kyber768::Kyber768;
pub use kyber1024::Kyber1024;

use crate::{
    constant_time::{ct_eq, ct_select_bytes},
    encode::is_reduced_12,
    error::{Error, Result},
    hash::{g, h, rkprf},
    params::kyber::{self as kparams, KyberParameters, SSBYTES, SYMBYTES},
    secure_memory::{SecureArray, SecureBytes},
    traits::{SecureRandom, Serializable},
};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Parameter set for rank `K`
fn params_for<const K: usize>() -> Result<KyberParameters> {
    kparams::for_rank(K).ok_or(Error::InternalContractViolation("unsupported ML-KEM rank"))
}

/// Kyber public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<const K: usize> {
    bytes: Vec<u8>,
}

impl<const K: usize> PublicKey<K> {
    /// Encoded key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> AsRef<[u8]> for PublicKey<K> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> Serializable for PublicKey<K> {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Checks the length only; the modulus check runs on encapsulation
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = params_for::<K>()?.public_key_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidPublicKey { expected, actual: bytes.len() });
        }
        Ok(Self { bytes: bytes.to_vec() })
    }
}

/// Kyber secret key: `dk_pke || ek || H(ek) || z`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey<const K: usize> {
    bytes: SecureBytes,
}

impl<const K: usize> SecretKey<K> {
    /// Encoded key bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<const K: usize> AsRef<[u8]> for SecretKey<K> {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<const K: usize> Zeroize for SecretKey<K> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<const K: usize> ZeroizeOnDrop for SecretKey<K> {}

impl<const K: usize> Serializable for SecretKey<K> {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.as_ref().to_vec()
    }

    /// Checks the length and that the embedded `H(ek)` matches `ek`
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let params = params_for::<K>()?;
        let expected = params.secret_key_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidSecretKey { expected, actual: bytes.len() });
        }

        let ek_start = params.indcpa_secret_key_bytes();
        let ek_end = ek_start + params.public_key_bytes();
        let stored_hash = &bytes[ek_end..ek_end + SYMBYTES];
        if !bool::from(ct_eq(&h(&bytes[ek_start..ek_end]), stored_hash)) {
            tracing::debug!(rank = K, "decapsulation key failed the hash check");
            return Err(Error::MalformedSecretKey);
        }
        Ok(Self { bytes: SecureBytes::from_slice(bytes) })
    }
}

/// Kyber ciphertext
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext<const K: usize> {
    bytes: Vec<u8>,
}

impl<const K: usize> Ciphertext<K> {
    /// Encoded ciphertext bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> AsRef<[u8]> for Ciphertext<K> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> Serializable for Ciphertext<K> {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = params_for::<K>()?.ciphertext_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidCiphertext { expected, actual: bytes.len() });
        }
        Ok(Self { bytes: bytes.to_vec() })
    }
}

/// Kyber shared secret
#[derive(Clone)]
pub struct SharedSecret {
    bytes: [u8; SSBYTES],
}

impl SharedSecret {
    /// Secret bytes
    pub fn as_bytes(&self) -> &[u8; SSBYTES] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..].ct_eq(&other.bytes[..]).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl Zeroize for SharedSecret {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SharedSecret {}

/// `ML-KEM.KeyGen_internal(d, z)` with `seed = d || z`
pub(crate) fn keypair_derand<const K: usize>(
    seed: &[u8; 2 * SYMBYTES],
) -> Result<(PublicKey<K>, SecretKey<K>)> {
    let params = params_for::<K>()?;
    tracing::debug!(rank = K, "ML-KEM key generation");

    let pk_len = params.public_key_bytes();
    let pke_sk_len = params.indcpa_secret_key_bytes();
    let mut pk = vec![0u8; pk_len];
    let mut sk = SecureBytes::zeroed(params.secret_key_bytes());

    let mut d = Zeroizing::new([0u8; SYMBYTES]);
    d.copy_from_slice(&seed[..SYMBYTES]);
    indcpa::keypair::<K>(&params, &d, &mut pk, &mut sk.as_mut()[..pke_sk_len])?;

    let sk_bytes = sk.as_mut();
    let mut offset = pke_sk_len;
    sk_bytes[offset..offset + pk_len].copy_from_slice(&pk);
    offset += pk_len;
    sk_bytes[offset..offset + SYMBYTES].copy_from_slice(&h(&pk));
    offset += SYMBYTES;
    sk_bytes[offset..].copy_from_slice(&seed[SYMBYTES..]);

    Ok((PublicKey { bytes: pk }, SecretKey { bytes: sk }))
}

/// `ML-KEM.Encaps_internal(ek, m)`
pub(crate) fn encapsulate_derand<const K: usize>(
    public_key: &PublicKey<K>,
    m: &[u8; SYMBYTES],
) -> Result<(Ciphertext<K>, SharedSecret)> {
    let params = params_for::<K>()?;
    let pk = public_key.as_bytes();
    if !is_reduced_12(&pk[..params.polyvec_bytes()]) {
        tracing::debug!(rank = K, "encapsulation key failed the modulus check");
        return Err(Error::MalformedPublicKey);
    }

    let kr = Zeroizing::new(g(&[m, &h(pk)]));
    let mut coins = Zeroizing::new([0u8; SYMBYTES]);
    coins.copy_from_slice(&kr[SYMBYTES..]);

    let mut ct = vec![0u8; params.ciphertext_bytes()];
    indcpa::encrypt::<K>(&params, pk, m, &coins, &mut ct)?;

    let mut ss = SharedSecret { bytes: [0u8; SSBYTES] };
    ss.bytes.copy_from_slice(&kr[..SSBYTES]);
    Ok((Ciphertext { bytes: ct }, ss))
}

/// `ML-KEM.Decaps_internal(dk, c)` with implicit rejection
pub(crate) fn decapsulate<const K: usize>(
    secret_key: &SecretKey<K>,
    ciphertext: &Ciphertext<K>,
) -> SharedSecret {
    let params = match params_for::<K>() {
        Ok(params) => params,
        // Unreachable for the exported parameter sets
        Err(_) => return SharedSecret { bytes: [0u8; SSBYTES] },
    };
    let sk = secret_key.as_bytes();
    let ct = ciphertext.as_bytes();

    let pke_sk_len = params.indcpa_secret_key_bytes();
    let pk_len = params.public_key_bytes();
    let pke_sk = &sk[..pke_sk_len];
    let pk = &sk[pke_sk_len..pke_sk_len + pk_len];
    let h_pk = &sk[pke_sk_len + pk_len..pke_sk_len + pk_len + SYMBYTES];
    let mut z = Zeroizing::new([0u8; SYMBYTES]);
    z.copy_from_slice(&sk[pke_sk_len + pk_len + SYMBYTES..]);

    let m_prime = indcpa::decrypt::<K>(&params, pke_sk, ct);
    let kr = Zeroizing::new(g(&[&m_prime[..], h_pk]));
    let mut coins = Zeroizing::new([0u8; SYMBYTES]);
    coins.copy_from_slice(&kr[SYMBYTES..]);

    let mut ct_prime = vec![0u8; params.ciphertext_bytes()];
    let reencrypted = indcpa::encrypt::<K>(&params, pk, &m_prime, &coins, &mut ct_prime).is_ok();
    let matches = ct_eq(ct, &ct_prime) & subtle::Choice::from(u8::from(reencrypted));

    let mut ss = SharedSecret { bytes: rkprf(&z, ct) };
    ct_select_bytes(&mut ss.bytes, &kr[..SSBYTES], matches);
    ss
}

/// Keypair from fresh randomness: draws `d || z` from `rng`
pub(crate) fn generate_keypair<const K: usize, R: SecureRandom>(
    rng: &mut R,
) -> Result<(PublicKey<K>, SecretKey<K>)> {
    let mut seed = SecureArray::<{ 2 * SYMBYTES }>::zero();
    rng.fill_bytes(seed.as_mut())?;
    keypair_derand::<K>(seed.as_array())
}

/// Encapsulation with fresh randomness: draws `m` from `rng`
pub(crate) fn encapsulate<const K: usize, R: SecureRandom>(
    public_key: &PublicKey<K>,
    rng: &mut R,
) -> Result<(Ciphertext<K>, SharedSecret)> {
    let mut m = SecureArray::<SYMBYTES>::zero();
    rng.fill_bytes(m.as_mut())?;
    encapsulate_derand::<K>(public_key, m.as_array())
}
