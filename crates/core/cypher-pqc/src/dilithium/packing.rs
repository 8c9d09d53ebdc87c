//! ML-DSA key and signature layouts
//!
//! - public key: `rho || t1` (10 bits per coefficient)
//! - secret key: `rho || K || tr || s1 || s2 || t0` (eta stored as `eta - x`,
//!   t0 as `2^12 - x` in 13 bits)
//! - signature: `c~ || z || h` (z stored as `gamma1 - x`, h as omega indices
//!   followed by k running counts)

use crate::encode::{pack_bits, unpack_bits};
use crate::params::dilithium::{
    DilithiumParameters, D, N, POLYT0_PACKEDBYTES, POLYT1_PACKEDBYTES, SEEDBYTES, TRBYTES,
};
use crate::poly::DilithiumPolyVec;

const T1_BITS: u32 = 23 - D;
const T0_BITS: u32 = D;
const T0_OFFSET: i32 = 1 << (D - 1);

/// Secret key components, borrowed seeds plus decoded vectors
pub(crate) struct UnpackedSecretKey<'a, const K: usize, const L: usize> {
    pub rho: &'a [u8],
    pub key: &'a [u8],
    pub tr: &'a [u8],
    pub s1: DilithiumPolyVec<L>,
    pub s2: DilithiumPolyVec<K>,
    pub t0: DilithiumPolyVec<K>,
}

impl<const K: usize, const L: usize> Drop for UnpackedSecretKey<'_, K, L> {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.s1.zeroize();
        self.s2.zeroize();
        self.t0.zeroize();
    }
}

fn pack_vec<const LEN: usize>(
    v: &DilithiumPolyVec<LEN>,
    bits: u32,
    map: impl Fn(i32) -> u32,
    out: &mut [u8],
) {
    let poly_bytes = bits as usize * N / 8;
    for (poly, chunk) in v.polys.iter().zip(out.chunks_exact_mut(poly_bytes)) {
        pack_bits(poly.coeffs.iter().map(|&c| map(c)), bits, chunk);
    }
}

fn unpack_vec<const LEN: usize>(
    bytes: &[u8],
    bits: u32,
    map: impl Fn(u32) -> i32,
) -> DilithiumPolyVec<LEN> {
    let poly_bytes = bits as usize * N / 8;
    let mut v = DilithiumPolyVec::<LEN>::zero();
    for (poly, chunk) in v.polys.iter_mut().zip(bytes.chunks_exact(poly_bytes)) {
        let raw = unpack_bits(chunk, bits);
        for (c, r) in poly.coeffs.iter_mut().zip(raw.iter()) {
            *c = map(*r);
        }
    }
    v
}

/// Write `rho || t1` into `out`
pub(crate) fn pack_public_key<const K: usize>(
    rho: &[u8; SEEDBYTES],
    t1: &DilithiumPolyVec<K>,
    out: &mut [u8],
) {
    out[..SEEDBYTES].copy_from_slice(rho);
    pack_vec(t1, T1_BITS, |c| c as u32, &mut out[SEEDBYTES..]);
}

/// Split a public key into `rho` and `t1`
pub(crate) fn unpack_public_key<const K: usize>(pk: &[u8]) -> (&[u8], DilithiumPolyVec<K>) {
    let t1 = unpack_vec::<K>(&pk[SEEDBYTES..SEEDBYTES + K * POLYT1_PACKEDBYTES], T1_BITS, |r| r as i32);
    (&pk[..SEEDBYTES], t1)
}

/// Write the secret key layout into `out`
#[allow(clippy::too_many_arguments)]
pub(crate) fn pack_secret_key<const K: usize, const L: usize>(
    params: &DilithiumParameters,
    rho: &[u8],
    key: &[u8],
    tr: &[u8],
    s1: &DilithiumPolyVec<L>,
    s2: &DilithiumPolyVec<K>,
    t0: &DilithiumPolyVec<K>,
    out: &mut [u8],
) {
    let eta = params.eta as i32;
    let eta_bits = params.eta_bits();
    let s1_len = L * params.poly_eta_packed_bytes();
    let s2_len = K * params.poly_eta_packed_bytes();

    let (seeds, rest) = out.split_at_mut(2 * SEEDBYTES + TRBYTES);
    seeds[..SEEDBYTES].copy_from_slice(rho);
    seeds[SEEDBYTES..2 * SEEDBYTES].copy_from_slice(key);
    seeds[2 * SEEDBYTES..].copy_from_slice(tr);

    let (s1_out, rest) = rest.split_at_mut(s1_len);
    let (s2_out, t0_out) = rest.split_at_mut(s2_len);
    pack_vec(s1, eta_bits, |c| (eta - c) as u32, s1_out);
    pack_vec(s2, eta_bits, |c| (eta - c) as u32, s2_out);
    pack_vec(t0, T0_BITS, |c| (T0_OFFSET - c) as u32, &mut t0_out[..K * POLYT0_PACKEDBYTES]);
}

/// Decode a secret key of the correct length
pub(crate) fn unpack_secret_key<'a, const K: usize, const L: usize>(
    params: &DilithiumParameters,
    sk: &'a [u8],
) -> UnpackedSecretKey<'a, K, L> {
    let eta = params.eta as i32;
    let eta_bits = params.eta_bits();
    let s1_start = 2 * SEEDBYTES + TRBYTES;
    let s2_start = s1_start + L * params.poly_eta_packed_bytes();
    let t0_start = s2_start + K * params.poly_eta_packed_bytes();

    UnpackedSecretKey {
        rho: &sk[..SEEDBYTES],
        key: &sk[SEEDBYTES..2 * SEEDBYTES],
        tr: &sk[2 * SEEDBYTES..s1_start],
        s1: unpack_vec::<L>(&sk[s1_start..s2_start], eta_bits, |r| eta - r as i32),
        s2: unpack_vec::<K>(&sk[s2_start..t0_start], eta_bits, |r| eta - r as i32),
        t0: unpack_vec::<K>(
            &sk[t0_start..t0_start + K * POLYT0_PACKEDBYTES],
            T0_BITS,
            |r| T0_OFFSET - r as i32,
        ),
    }
}

/// Encode `w1` for the commitment hash
pub(crate) fn pack_w1<const K: usize>(
    params: &DilithiumParameters,
    w1: &DilithiumPolyVec<K>,
    out: &mut [u8],
) {
    pack_vec(w1, params.w1_bits(), |c| c as u32, out);
}

/// Write `c~ || z || h` into `out`
pub(crate) fn pack_signature<const K: usize, const L: usize>(
    params: &DilithiumParameters,
    ctilde: &[u8],
    z: &DilithiumPolyVec<L>,
    hints: &DilithiumPolyVec<K>,
    out: &mut [u8],
) {
    let gamma1 = params.gamma1;
    let z_len = L * params.poly_z_packed_bytes();

    let (c_out, rest) = out.split_at_mut(params.ctilde_bytes);
    c_out.copy_from_slice(ctilde);
    let (z_out, h_out) = rest.split_at_mut(z_len);
    pack_vec(z, params.z_bits(), |c| (gamma1 - c) as u32, z_out);

    h_out.fill(0);
    let mut k = 0;
    for (i, poly) in hints.polys.iter().enumerate() {
        for (j, &bit) in poly.coeffs.iter().enumerate() {
            if bit != 0 {
                h_out[k] = j as u8;
                k += 1;
            }
        }
        h_out[params.omega + i] = k as u8;
    }
}

/// Decode the hint section, rejecting every non-canonical encoding
fn unpack_hints<const K: usize>(
    params: &DilithiumParameters,
    bytes: &[u8],
) -> Option<DilithiumPolyVec<K>> {
    let omega = params.omega;
    let mut hints = DilithiumPolyVec::<K>::zero();
    let mut k = 0;
    for (i, poly) in hints.polys.iter_mut().enumerate() {
        let count = usize::from(bytes[omega + i]);
        if count < k || count > omega {
            return None;
        }
        for j in k..count {
            if j > k && bytes[j] <= bytes[j - 1] {
                return None;
            }
            poly.coeffs[usize::from(bytes[j])] = 1;
        }
        k = count;
    }

    if bytes[k..omega].iter().any(|&b| b != 0) {
        return None;
    }
    Some(hints)
}

/// Split a signature of the correct length into `c~`, `z` and `h`.
///
/// `None` for a malformed hint section.
pub(crate) fn unpack_signature<'a, const K: usize, const L: usize>(
    params: &DilithiumParameters,
    sig: &'a [u8],
) -> Option<(&'a [u8], DilithiumPolyVec<L>, DilithiumPolyVec<K>)> {
    let gamma1 = params.gamma1;
    let z_start = params.ctilde_bytes;
    let h_start = z_start + L * params.poly_z_packed_bytes();

    let hints = unpack_hints::<K>(params, &sig[h_start..h_start + params.polyvec_h_packed_bytes()])?;
    let z = unpack_vec::<L>(&sig[z_start..h_start], params.z_bits(), |r| gamma1 - r as i32);
    Some((&sig[..z_start], z, hints))
}
