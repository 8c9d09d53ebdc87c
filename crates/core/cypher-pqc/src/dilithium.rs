//! ML-DSA (Dilithium) implementation
//!
//! This module implements the Module-Lattice-Based Digital Signature Algorithm
//! as specified in NIST FIPS 204, "pure" mode with a context string.
//!
//! The engine is generic over the matrix shape `K x L`; [`Dilithium2`],
//! [`Dilithium3`] and [`Dilithium5`] bind it to a parameter set. Signing is
//! hedged by default; the `deterministic-signing` feature fixes `rnd` to zero.

pub(crate) mod packing;
pub mod rounding;
pub mod dilithium2;
pub mod dilithium3;
pub mod dilithium5;

pub use dilithium2::Dilithium2;
pub use dilithium3::Dilithium3;
pub use dilithium5::Dilithium5;

use crate::{
    config::{SigningMode, MAX_SIGNING_ATTEMPTS, SIGNING_MODE},
    constant_time::ct_eq,
    error::{Error, Result},
    hash::shake256,
    params::dilithium::{
        self as dparams, DilithiumParameters, CRHBYTES, MAX_CONTEXT_BYTES, RNDBYTES, SEEDBYTES,
        TRBYTES,
    },
    poly::DilithiumPolyVec,
    sample::{
        dilithium_challenge, dilithium_expand_matrix, dilithium_uniform_eta,
        dilithium_uniform_gamma1,
    },
    secure_memory::{SecureArray, SecureBytes},
    traits::{SecureRandom, Serializable},
};
use alloc::vec;
use alloc::vec::Vec;
use packing::{
    pack_public_key, pack_secret_key, pack_signature, pack_w1, unpack_public_key,
    unpack_secret_key, unpack_signature,
};
use rounding::{decompose_vec, make_hint_vec, power2round_vec, use_hint_vec};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Largest commitment hash over all parameter sets
const MAX_CTILDE_BYTES: usize = 64;

/// Parameter set with `K` rows (unique per set)
fn key_params<const K: usize>() -> Result<DilithiumParameters> {
    dparams::for_rank(K).ok_or(Error::InternalContractViolation("unsupported ML-DSA rank"))
}

/// Parameter set for a `K x L` matrix
fn params_for<const K: usize, const L: usize>() -> Result<DilithiumParameters> {
    match dparams::for_rank(K) {
        Some(params) if params.l == L => Ok(params),
        _ => Err(Error::InternalContractViolation("unsupported ML-DSA shape")),
    }
}

/// Dilithium public key: `rho || t1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumPublicKey<const K: usize> {
    bytes: Vec<u8>,
}

impl<const K: usize> DilithiumPublicKey<K> {
    /// Encoded key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> AsRef<[u8]> for DilithiumPublicKey<K> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> Serializable for DilithiumPublicKey<K> {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = key_params::<K>()?.public_key_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidPublicKey { expected, actual: bytes.len() });
        }
        Ok(Self { bytes: bytes.to_vec() })
    }
}

/// Dilithium secret key: `rho || K || tr || s1 || s2 || t0`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumSecretKey<const K: usize> {
    bytes: SecureBytes,
}

impl<const K: usize> DilithiumSecretKey<K> {
    /// Encoded key bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<const K: usize> AsRef<[u8]> for DilithiumSecretKey<K> {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<const K: usize> Zeroize for DilithiumSecretKey<K> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<const K: usize> ZeroizeOnDrop for DilithiumSecretKey<K> {}

impl<const K: usize> Serializable for DilithiumSecretKey<K> {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.as_ref().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = key_params::<K>()?.secret_key_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidSecretKey { expected, actual: bytes.len() });
        }
        Ok(Self { bytes: SecureBytes::from_slice(bytes) })
    }
}

/// Dilithium signature: `c~ || z || h`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumSignature<const K: usize> {
    bytes: Vec<u8>,
}

impl<const K: usize> DilithiumSignature<K> {
    /// Encoded signature bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> AsRef<[u8]> for DilithiumSignature<K> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const K: usize> Serializable for DilithiumSignature<K> {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = key_params::<K>()?.signature_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidSignature { expected, actual: bytes.len() });
        }
        Ok(Self { bytes: bytes.to_vec() })
    }
}

/// `ML-DSA.KeyGen_internal(xi)`
pub(crate) fn keypair_derand<const K: usize, const L: usize>(
    seed: &[u8; SEEDBYTES],
) -> Result<(DilithiumPublicKey<K>, DilithiumSecretKey<K>)> {
    let params = params_for::<K, L>()?;
    tracing::debug!(k = K, l = L, "ML-DSA key generation");

    // (rho, rho', K) with domain separation by shape
    let mut expanded = Zeroizing::new([0u8; 2 * SEEDBYTES + CRHBYTES]);
    shake256(&[&seed[..], &[K as u8, L as u8]], &mut expanded[..]);
    let mut rho = [0u8; SEEDBYTES];
    rho.copy_from_slice(&expanded[..SEEDBYTES]);
    let mut rho_prime = Zeroizing::new([0u8; CRHBYTES]);
    rho_prime.copy_from_slice(&expanded[SEEDBYTES..SEEDBYTES + CRHBYTES]);
    let key = &expanded[SEEDBYTES + CRHBYTES..];

    let a = dilithium_expand_matrix::<K, L>(&rho)?;

    let mut s1 = Zeroizing::new(DilithiumPolyVec::<L>::zero());
    for (i, poly) in s1.polys.iter_mut().enumerate() {
        *poly = dilithium_uniform_eta(&rho_prime, i as u16, params.eta)?;
    }
    let mut s2 = Zeroizing::new(DilithiumPolyVec::<K>::zero());
    for (i, poly) in s2.polys.iter_mut().enumerate() {
        *poly = dilithium_uniform_eta(&rho_prime, (L + i) as u16, params.eta)?;
    }

    let mut s1_hat = Zeroizing::new((*s1).clone());
    s1_hat.ntt();
    let mut t = Zeroizing::new(a.mul_vec_montgomery(&s1_hat));
    t.inv_ntt_tomont();
    t.add_assign(&s2);
    t.caddq();

    let (t1, t0) = power2round_vec(&t);
    let t0 = Zeroizing::new(t0);

    let mut pk = vec![0u8; params.public_key_bytes()];
    pack_public_key(&rho, &t1, &mut pk);
    let mut tr = [0u8; TRBYTES];
    shake256(&[pk.as_slice()], &mut tr);

    let mut sk = SecureBytes::zeroed(params.secret_key_bytes());
    pack_secret_key::<K, L>(&params, &rho, key, &tr, &s1, &s2, &t0, sk.as_mut());

    Ok((DilithiumPublicKey { bytes: pk }, DilithiumSecretKey { bytes: sk }))
}

/// `mu = H(tr || 0 || |ctx| || ctx || M, 64)`
fn message_representative(tr: &[u8], context: &[u8], message: &[u8]) -> [u8; CRHBYTES] {
    let mut mu = [0u8; CRHBYTES];
    shake256(&[tr, &[0, context.len() as u8], context, message], &mut mu);
    mu
}

/// `ML-DSA.Sign_internal` with the pure-mode message prefix
pub(crate) fn sign_derand<const K: usize, const L: usize>(
    secret_key: &DilithiumSecretKey<K>,
    message: &[u8],
    context: &[u8],
    rnd: &[u8; RNDBYTES],
) -> Result<DilithiumSignature<K>> {
    if context.len() > MAX_CONTEXT_BYTES {
        tracing::debug!(length = context.len(), "ML-DSA context string too long");
        return Err(Error::InvalidContext { length: context.len() });
    }
    let params = params_for::<K, L>()?;
    tracing::debug!(k = K, l = L, "ML-DSA signing");

    let sk = unpack_secret_key::<K, L>(&params, secret_key.as_bytes());
    let mu = message_representative(sk.tr, context, message);
    let mut rho_pp = Zeroizing::new([0u8; CRHBYTES]);
    shake256(&[sk.key, &rnd[..], &mu[..]], &mut rho_pp[..]);

    let mut rho = [0u8; SEEDBYTES];
    rho.copy_from_slice(sk.rho);
    let a = dilithium_expand_matrix::<K, L>(&rho)?;

    let mut s1 = Zeroizing::new(sk.s1.clone());
    let mut s2 = Zeroizing::new(sk.s2.clone());
    let mut t0 = Zeroizing::new(sk.t0.clone());
    s1.ntt();
    s2.ntt();
    t0.ntt();

    let ctilde_len = params.ctilde_bytes;
    let mut ctilde = [0u8; MAX_CTILDE_BYTES];
    let mut w1_packed = vec![0u8; K * params.poly_w1_packed_bytes()];

    for attempt in 0..MAX_SIGNING_ATTEMPTS {
        let mut y = Zeroizing::new(DilithiumPolyVec::<L>::zero());
        for (i, poly) in y.polys.iter_mut().enumerate() {
            let nonce = attempt * L as u16 + i as u16;
            *poly = dilithium_uniform_gamma1(&rho_pp, nonce, params.gamma1);
        }

        let mut y_hat = Zeroizing::new((*y).clone());
        y_hat.ntt();
        let mut w = Zeroizing::new(a.mul_vec_montgomery(&y_hat));
        w.inv_ntt_tomont();
        w.caddq();

        let (w1, w0) = decompose_vec(&w, params.gamma2);
        let mut w0 = Zeroizing::new(w0);
        pack_w1(&params, &w1, &mut w1_packed);
        shake256(&[&mu[..], &w1_packed[..]], &mut ctilde[..ctilde_len]);

        let mut c = Zeroizing::new(dilithium_challenge(&ctilde[..ctilde_len], params.tau)?);
        c.ntt();

        let mut z = Zeroizing::new(s1.scale_montgomery(&c));
        z.inv_ntt_tomont();
        z.add_assign(&y);
        z.reduce();
        if z.exceeds_norm(params.gamma1 - params.beta) {
            continue;
        }

        let mut cs2 = Zeroizing::new(s2.scale_montgomery(&c));
        cs2.inv_ntt_tomont();
        w0.sub_assign(&cs2);
        w0.reduce();
        if w0.exceeds_norm(params.gamma2 - params.beta) {
            continue;
        }

        let mut ct0 = Zeroizing::new(t0.scale_montgomery(&c));
        ct0.inv_ntt_tomont();
        ct0.reduce();
        if ct0.exceeds_norm(params.gamma2) {
            continue;
        }

        w0.add_assign(&ct0);
        let (hints, count) = make_hint_vec(&w0, &w1, params.gamma2);
        if count > params.omega {
            continue;
        }

        let mut sig = vec![0u8; params.signature_bytes()];
        pack_signature::<K, L>(&params, &ctilde[..ctilde_len], &z, &hints, &mut sig);
        tracing::trace!(k = K, attempts = attempt + 1, "ML-DSA signature accepted");
        return Ok(DilithiumSignature { bytes: sig });
    }

    tracing::error!(k = K, attempts = MAX_SIGNING_ATTEMPTS, "ML-DSA signing loop exhausted");
    Err(Error::InternalContractViolation("ML-DSA signing attempts exhausted"))
}

/// `ML-DSA.Verify_internal` with the pure-mode message prefix.
///
/// Fails closed: every decoding or range failure is `false`.
pub(crate) fn verify<const K: usize, const L: usize>(
    public_key: &DilithiumPublicKey<K>,
    message: &[u8],
    context: &[u8],
    signature: &DilithiumSignature<K>,
) -> bool {
    if context.len() > MAX_CONTEXT_BYTES {
        tracing::debug!(length = context.len(), "ML-DSA context string too long");
        return false;
    }
    let Ok(params) = params_for::<K, L>() else {
        return false;
    };
    let pk = public_key.as_bytes();

    let Some((ctilde, mut z, hints)) = unpack_signature::<K, L>(&params, signature.as_bytes())
    else {
        tracing::debug!(k = K, "ML-DSA signature has a malformed hint");
        return false;
    };
    if z.exceeds_norm(params.gamma1 - params.beta) {
        return false;
    }

    let (rho, mut t1) = unpack_public_key::<K>(pk);
    let mut tr = [0u8; TRBYTES];
    shake256(&[pk], &mut tr);
    let mu = message_representative(&tr, context, message);

    let Ok(mut c) = dilithium_challenge(ctilde, params.tau) else {
        return false;
    };
    let mut rho_seed = [0u8; SEEDBYTES];
    rho_seed.copy_from_slice(rho);
    let Ok(a) = dilithium_expand_matrix::<K, L>(&rho_seed) else {
        return false;
    };

    // w' = A z - c t1 2^d, in the NTT domain
    z.ntt();
    c.ntt();
    let mut w = a.mul_vec_montgomery(&z);
    t1.shift_left();
    t1.ntt();
    w.sub_assign(&t1.scale_montgomery(&c));
    w.reduce();
    w.inv_ntt_tomont();
    w.caddq();

    let w1 = use_hint_vec(&w, &hints, params.gamma2);
    let mut w1_packed = vec![0u8; K * params.poly_w1_packed_bytes()];
    pack_w1(&params, &w1, &mut w1_packed);

    let mut expected = [0u8; MAX_CTILDE_BYTES];
    shake256(&[&mu[..], &w1_packed[..]], &mut expected[..params.ctilde_bytes]);
    ct_eq(ctilde, &expected[..params.ctilde_bytes]).into()
}

/// Keypair from fresh randomness: draws `xi` from `rng`
pub(crate) fn generate_keypair<const K: usize, const L: usize, R: SecureRandom>(
    rng: &mut R,
) -> Result<(DilithiumPublicKey<K>, DilithiumSecretKey<K>)> {
    let mut seed = SecureArray::<SEEDBYTES>::zero();
    rng.fill_bytes(seed.as_mut())?;
    keypair_derand::<K, L>(seed.as_array())
}

/// Signing with `rnd` chosen by [`SIGNING_MODE`]
pub(crate) fn sign<const K: usize, const L: usize, R: SecureRandom>(
    secret_key: &DilithiumSecretKey<K>,
    message: &[u8],
    context: &[u8],
    rng: &mut R,
) -> Result<DilithiumSignature<K>> {
    let mut rnd = SecureArray::<RNDBYTES>::zero();
    if SIGNING_MODE == SigningMode::Hedged {
        rng.fill_bytes(rnd.as_mut())?;
    }
    sign_derand::<K, L>(secret_key, message, context, rnd.as_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FailingRng, TestRng};

    #[test]
    fn test_tr_is_public_key_hash() {
        let (pk, sk) = keypair_derand::<4, 4>(&[5u8; 32]).unwrap();
        let mut tr = [0u8; 64];
        shake256(&[pk.as_bytes()], &mut tr);
        assert_eq!(&sk.as_bytes()[..32], &pk.as_bytes()[..32]);
        assert_eq!(&sk.as_bytes()[64..128], &tr);
    }

    #[test]
    fn test_sign_verify_with_context() {
        let (pk, sk) = keypair_derand::<6, 5>(&[1u8; 32]).unwrap();
        let sig = sign_derand::<6, 5>(&sk, b"message", b"ctx", &[0u8; 32]).unwrap();
        assert!(verify::<6, 5>(&pk, b"message", b"ctx", &sig));
        assert!(!verify::<6, 5>(&pk, b"message", b"", &sig));
        assert!(!verify::<6, 5>(&pk, b"messagE", b"ctx", &sig));
    }

    #[test]
    fn test_context_length_limit() {
        let (pk, sk) = keypair_derand::<4, 4>(&[2u8; 32]).unwrap();
        let long = [0u8; 256];
        assert_eq!(
            sign_derand::<4, 4>(&sk, b"m", &long, &[0u8; 32]).unwrap_err(),
            Error::InvalidContext { length: 256 }
        );

        let max = [7u8; 255];
        let sig = sign_derand::<4, 4>(&sk, b"m", &max, &[0u8; 32]).unwrap();
        assert!(verify::<4, 4>(&pk, b"m", &max, &sig));
        assert!(!verify::<4, 4>(&pk, b"m", &long, &sig));
    }

    #[test]
    fn test_rnd_changes_signature() {
        let (pk, sk) = keypair_derand::<4, 4>(&[3u8; 32]).unwrap();
        let a = sign_derand::<4, 4>(&sk, b"m", b"", &[0u8; 32]).unwrap();
        let b = sign_derand::<4, 4>(&sk, b"m", b"", &[0u8; 32]).unwrap();
        let c = sign_derand::<4, 4>(&sk, b"m", b"", &[1u8; 32]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(verify::<4, 4>(&pk, b"m", b"", &c));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let mut rng = TestRng::new(87);
        let (pk, sk) = generate_keypair::<8, 7, _>(&mut rng).unwrap();
        let sig = sign::<8, 7, _>(&sk, b"payload", b"", &mut rng).unwrap();
        assert!(verify::<8, 7>(&pk, b"payload", b"", &sig));

        for position in [0, 100, 2000, sig.as_bytes().len() - 1] {
            let mut bytes = sig.to_bytes();
            bytes[position] ^= 0x01;
            let tampered = DilithiumSignature::<8>::from_bytes(&bytes).unwrap();
            assert!(!verify::<8, 7>(&pk, b"payload", b"", &tampered), "byte {position}");
        }
    }

    #[test]
    fn test_out_of_range_z_rejected() {
        let (pk, sk) = keypair_derand::<4, 4>(&[4u8; 32]).unwrap();
        let sig = sign_derand::<4, 4>(&sk, b"m", b"", &[0u8; 32]).unwrap();
        let mut bytes = sig.to_bytes();
        // First z coefficient packed as 0 decodes to gamma1
        bytes[32] = 0;
        bytes[33] = 0;
        bytes[34] &= 0xFC;
        let bad = DilithiumSignature::<4>::from_bytes(&bytes).unwrap();
        assert!(!verify::<4, 4>(&pk, b"m", b"", &bad));
    }

    #[test]
    fn test_signing_loop_exhaustion_is_reported() {
        // t0 pinned to +2^12 or -(2^12 - 1) with pseudorandom signs: every
        // attempt fails a bound check, mostly ||c*t0|| >= gamma2 or hints > omega
        let (_, sk) = keypair_derand::<4, 4>(&[0u8; 32]).unwrap();
        let mut signs = [0u8; 128];
        shake256(&[b"extreme t0 signs".as_slice()], &mut signs);
        let t0: Vec<u32> = (0..4 * 256)
            .map(|i| if (signs[i >> 3] >> (i & 7)) & 1 == 1 { 8191 } else { 0 })
            .collect();

        let mut bytes = sk.to_bytes();
        let t0_start = bytes.len() - 4 * 416;
        for (out, values) in bytes[t0_start..].chunks_exact_mut(416).zip(t0.chunks_exact(256)) {
            crate::encode::pack_bits(values.iter().copied(), 13, out);
        }
        let crafted = DilithiumSecretKey::<4>::from_bytes(&bytes).unwrap();

        assert_eq!(
            sign_derand::<4, 4>(&crafted, b"signing loop bound", b"", &[0u8; 32]).unwrap_err(),
            Error::InternalContractViolation("ML-DSA signing attempts exhausted")
        );
    }

    #[test]
    fn test_failing_rng_is_reported() {
        let mut rng = FailingRng;
        assert_eq!(
            generate_keypair::<4, 4, _>(&mut rng).unwrap_err(),
            Error::RandomnessSourceFailure
        );
    }

    #[test]
    fn test_length_errors() {
        assert_eq!(
            DilithiumPublicKey::<6>::from_bytes(&[0u8; 1312]).unwrap_err(),
            Error::InvalidPublicKey { expected: 1952, actual: 1312 }
        );
        assert_eq!(
            DilithiumSignature::<4>::from_bytes(&[0u8; 3309]).unwrap_err(),
            Error::InvalidSignature { expected: 2420, actual: 3309 }
        );
        assert!(DilithiumSecretKey::<8>::from_bytes(&[0u8; 4896]).is_ok());
    }
}
