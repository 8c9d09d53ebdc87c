//! K-PKE, the IND-CPA public-key encryption scheme underneath ML-KEM
//!
//! Byte layouts:
//! - public key: `ByteEncode12(t_hat) || rho`
//! - secret key: `ByteEncode12(s_hat)`
//! - ciphertext: `Compress_du(u) || Compress_dv(v)`

use crate::encode::{
    poly_compress, poly_decompress, poly_from_bytes, poly_from_msg, poly_to_bytes, poly_to_msg,
};
use crate::error::Result;
use crate::hash::g;
use crate::params::kyber::{KyberParameters, MSGBYTES, POLYBYTES, SYMBYTES};
use crate::poly::{Poly, PolyVec};
use crate::sample::{kyber_gen_matrix, kyber_noise};
use zeroize::Zeroizing;

/// Deterministic K-PKE key generation from the 32-byte seed `d`.
///
/// Writes `public_key` (`polyvec_bytes + 32`) and `secret_key` (`polyvec_bytes`).
pub(crate) fn keypair<const K: usize>(
    params: &KyberParameters,
    d: &[u8; SYMBYTES],
    public_key: &mut [u8],
    secret_key: &mut [u8],
) -> Result<()> {
    // Domain separation by rank
    let expanded = Zeroizing::new(g(&[d, &[K as u8]]));
    let mut rho = [0u8; SYMBYTES];
    let mut sigma = Zeroizing::new([0u8; SYMBYTES]);
    rho.copy_from_slice(&expanded[..SYMBYTES]);
    sigma.copy_from_slice(&expanded[SYMBYTES..]);

    let a = kyber_gen_matrix::<K>(&rho, false)?;

    let mut s = Zeroizing::new(PolyVec::<K>::zero());
    let mut e = Zeroizing::new(PolyVec::<K>::zero());
    for i in 0..K {
        s.polys[i] = kyber_noise(&sigma, i as u8, params.eta1);
        e.polys[i] = kyber_noise(&sigma, (K + i) as u8, params.eta1);
    }
    s.ntt();
    e.ntt();

    let mut t = a.mul_vec_montgomery(&s);
    for poly in t.polys.iter_mut() {
        poly.tomont();
    }
    t.add_assign(&e);
    t.reduce();

    for (i, poly) in t.polys.iter().enumerate() {
        poly_to_bytes(poly, &mut public_key[i * POLYBYTES..(i + 1) * POLYBYTES]);
    }
    public_key[K * POLYBYTES..].copy_from_slice(&rho);
    for (i, poly) in s.polys.iter().enumerate() {
        poly_to_bytes(poly, &mut secret_key[i * POLYBYTES..(i + 1) * POLYBYTES]);
    }
    Ok(())
}

/// Deterministic K-PKE encryption of `msg` under `public_key` with randomness `coins`
pub(crate) fn encrypt<const K: usize>(
    params: &KyberParameters,
    public_key: &[u8],
    msg: &[u8; MSGBYTES],
    coins: &[u8; SYMBYTES],
    ciphertext: &mut [u8],
) -> Result<()> {
    let mut t_hat = PolyVec::<K>::zero();
    for (i, poly) in t_hat.polys.iter_mut().enumerate() {
        *poly = poly_from_bytes(&public_key[i * POLYBYTES..(i + 1) * POLYBYTES]);
    }
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(&public_key[K * POLYBYTES..K * POLYBYTES + SYMBYTES]);

    let a_t = kyber_gen_matrix::<K>(&rho, true)?;

    let mut r = Zeroizing::new(PolyVec::<K>::zero());
    let mut e1 = Zeroizing::new(PolyVec::<K>::zero());
    for i in 0..K {
        r.polys[i] = kyber_noise(coins, i as u8, params.eta1);
        e1.polys[i] = kyber_noise(coins, (K + i) as u8, params.eta2);
    }
    let e2 = Zeroizing::new(kyber_noise(coins, (2 * K) as u8, params.eta2));
    r.ntt();

    let mut u = Zeroizing::new(a_t.mul_vec_montgomery(&r));
    let mut v = Zeroizing::new(t_hat.basemul_acc_montgomery(&r));
    u.inv_ntt();
    v.inv_ntt();

    u.add_assign(&e1);
    v.add_assign(&e2);
    v.add_assign(&Zeroizing::new(poly_from_msg(msg)));
    u.reduce();
    v.reduce();

    let du_bytes = params.poly_compressed_bytes_du();
    for (i, poly) in u.polys.iter().enumerate() {
        poly_compress(poly, params.du, &mut ciphertext[i * du_bytes..(i + 1) * du_bytes]);
    }
    poly_compress(&v, params.dv, &mut ciphertext[K * du_bytes..]);
    Ok(())
}

/// K-PKE decryption. Accepts any ciphertext of the right length.
pub(crate) fn decrypt<const K: usize>(
    params: &KyberParameters,
    secret_key: &[u8],
    ciphertext: &[u8],
) -> Zeroizing<[u8; MSGBYTES]> {
    let du_bytes = params.poly_compressed_bytes_du();
    let mut u = PolyVec::<K>::zero();
    for (i, poly) in u.polys.iter_mut().enumerate() {
        *poly = poly_decompress(&ciphertext[i * du_bytes..(i + 1) * du_bytes], params.du);
    }
    let v = poly_decompress(&ciphertext[K * du_bytes..], params.dv);

    let mut s_hat = Zeroizing::new(PolyVec::<K>::zero());
    for (i, poly) in s_hat.polys.iter_mut().enumerate() {
        *poly = poly_from_bytes(&secret_key[i * POLYBYTES..(i + 1) * POLYBYTES]);
    }

    u.ntt();
    let mut w: Zeroizing<Poly> = Zeroizing::new(s_hat.basemul_acc_montgomery(&u));
    w.inv_ntt();

    let mut m = Zeroizing::new(v);
    m.sub_assign(&w);
    m.reduce();
    Zeroizing::new(poly_to_msg(&m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::kyber::{kyber1024, kyber512, kyber768};
    use alloc::vec;

    fn round_trip<const K: usize>(params: &KyberParameters) {
        let mut pk = vec![0u8; params.public_key_bytes()];
        let mut sk = vec![0u8; params.indcpa_secret_key_bytes()];
        keypair::<K>(params, &[7u8; 32], &mut pk, &mut sk).unwrap();

        let msg: [u8; 32] = core::array::from_fn(|i| i as u8 * 3);
        let mut ct = vec![0u8; params.ciphertext_bytes()];
        encrypt::<K>(params, &pk, &msg, &[9u8; 32], &mut ct).unwrap();

        assert_eq!(*decrypt::<K>(params, &sk, &ct), msg);
    }

    #[test]
    fn test_indcpa_round_trip_all_ranks() {
        round_trip::<2>(&kyber512::PARAMS);
        round_trip::<3>(&kyber768::PARAMS);
        round_trip::<4>(&kyber1024::PARAMS);
    }

    #[test]
    fn test_encrypt_is_deterministic() {
        let params = kyber768::PARAMS;
        let mut pk = vec![0u8; params.public_key_bytes()];
        let mut sk = vec![0u8; params.indcpa_secret_key_bytes()];
        keypair::<3>(&params, &[1u8; 32], &mut pk, &mut sk).unwrap();

        let mut ct1 = vec![0u8; params.ciphertext_bytes()];
        let mut ct2 = vec![0u8; params.ciphertext_bytes()];
        encrypt::<3>(&params, &pk, &[0u8; 32], &[2u8; 32], &mut ct1).unwrap();
        encrypt::<3>(&params, &pk, &[0u8; 32], &[2u8; 32], &mut ct2).unwrap();
        assert_eq!(ct1, ct2);

        encrypt::<3>(&params, &pk, &[0u8; 32], &[3u8; 32], &mut ct2).unwrap();
        assert_ne!(ct1, ct2);
    }
}
