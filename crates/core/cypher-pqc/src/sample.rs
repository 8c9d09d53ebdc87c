//! Deterministic samplers
//!
//! Everything here expands a public or secret seed into polynomials:
//! uniform matrices by rejection sampling over SHAKE128, centered binomial
//! and bounded noise over SHAKE256, the ML-DSA mask, and the sparse
//! challenge polynomial. Each rejection loop draws at most a fixed number of
//! blocks (see [`crate::config`]) and reports
//! [`Error::InternalContractViolation`] instead of spinning.

use crate::config::{
    CHALLENGE_MAX_BLOCKS, DILITHIUM_ETA_MAX_BLOCKS, DILITHIUM_UNIFORM_MAX_BLOCKS,
    KYBER_UNIFORM_MAX_BLOCKS,
};
use crate::encode::unpack_bits;
use crate::error::{Error, Result};
use crate::hash::{prf, Xof128, Xof256, SHAKE128_RATE, SHAKE256_RATE};
use crate::params::{dilithium, kyber};
use crate::poly::{DilithiumMatrix, DilithiumPoly, Poly, PolyMat, N};
use zeroize::Zeroizing;

fn exhausted(what: &'static str, blocks: usize) -> Error {
    tracing::error!(sampler = what, blocks, "rejection sampler exceeded its block bound");
    Error::InternalContractViolation(what)
}

/// Accept 12-bit candidates below q from `buf`, filling `coeffs` from `filled`.
/// Returns the new fill level.
fn kyber_rej_uniform(coeffs: &mut [i16; N], mut filled: usize, buf: &[u8]) -> usize {
    for chunk in buf.chunks_exact(3) {
        if filled == N {
            break;
        }
        let d1 = (u16::from(chunk[0]) | (u16::from(chunk[1]) << 8)) & 0x0FFF;
        let d2 = ((u16::from(chunk[1]) >> 4) | (u16::from(chunk[2]) << 4)) & 0x0FFF;
        if d1 < kyber::Q as u16 {
            coeffs[filled] = d1 as i16;
            filled += 1;
        }
        if d2 < kyber::Q as u16 && filled < N {
            coeffs[filled] = d2 as i16;
            filled += 1;
        }
    }
    filled
}

/// `SampleNTT`: a uniform polynomial in NTT domain from `SHAKE128(rho || j || i)`
pub fn kyber_sample_ntt(rho: &[u8; 32], row: u8, column: u8) -> Result<Poly> {
    kyber_sample_ntt_within(rho, row, column, KYBER_UNIFORM_MAX_BLOCKS)
}

fn kyber_sample_ntt_within(rho: &[u8; 32], row: u8, column: u8, max_blocks: usize) -> Result<Poly> {
    let mut xof = Xof128::kyber_matrix(rho, column, row);
    let mut poly = Poly::zero();
    let mut block = [0u8; SHAKE128_RATE];
    let mut filled = 0;
    for _ in 0..max_blocks {
        xof.squeeze_block(&mut block);
        filled = kyber_rej_uniform(&mut poly.coeffs, filled, &block);
        if filled == N {
            return Ok(poly);
        }
    }
    Err(exhausted("kyber_sample_ntt", max_blocks))
}

/// Expand `rho` into the matrix A (or its transpose) in NTT domain
pub fn kyber_gen_matrix<const K: usize>(rho: &[u8; 32], transposed: bool) -> Result<PolyMat<K>> {
    let mut matrix = PolyMat::<K>::zero();
    for (i, row) in matrix.rows.iter_mut().enumerate() {
        for (j, entry) in row.polys.iter_mut().enumerate() {
            let (r, c) = if transposed { (j, i) } else { (i, j) };
            *entry = kyber_sample_ntt(rho, r as u8, c as u8)?;
        }
    }
    Ok(matrix)
}

fn cbd2(buf: &[u8]) -> Poly {
    let mut poly = Poly::zero();
    for (i, chunk) in buf.chunks_exact(4).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            poly.coeffs[8 * i + j] = a - b;
        }
    }
    poly
}

fn cbd3(buf: &[u8]) -> Poly {
    let mut poly = Poly::zero();
    for (i, chunk) in buf.chunks_exact(3).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            poly.coeffs[4 * i + j] = a - b;
        }
    }
    poly
}

/// Centered binomial sample with parameter `eta` (2 or 3) from `64 * eta` bytes
pub fn cbd(buf: &[u8], eta: usize) -> Poly {
    debug_assert_eq!(buf.len(), 64 * eta);
    if eta == 3 {
        cbd3(buf)
    } else {
        cbd2(buf)
    }
}

/// `SamplePolyCBD(PRF(seed, nonce))`
pub fn kyber_noise(seed: &[u8; 32], nonce: u8, eta: usize) -> Poly {
    let mut buf = Zeroizing::new([0u8; 3 * 64]);
    let len = 64 * eta;
    prf(seed, nonce, &mut buf[..len]);
    cbd(&buf[..len], eta)
}

/// `RejNTTPoly`: a uniform ML-DSA polynomial from `SHAKE128(rho || nonce)`
pub fn dilithium_uniform(rho: &[u8; 32], nonce: u16) -> Result<DilithiumPoly> {
    dilithium_uniform_within(rho, nonce, DILITHIUM_UNIFORM_MAX_BLOCKS)
}

fn dilithium_uniform_within(rho: &[u8; 32], nonce: u16, max_blocks: usize) -> Result<DilithiumPoly> {
    let mut xof = Xof128::dilithium_matrix(rho, nonce);
    let mut poly = DilithiumPoly::zero();
    let mut block = [0u8; SHAKE128_RATE];
    let mut filled = 0;
    for _ in 0..max_blocks {
        xof.squeeze_block(&mut block);
        for chunk in block.chunks_exact(3) {
            let t = (u32::from(chunk[0]) | (u32::from(chunk[1]) << 8) | (u32::from(chunk[2]) << 16))
                & 0x7F_FFFF;
            if t < dilithium::Q as u32 {
                poly.coeffs[filled] = t as i32;
                filled += 1;
                if filled == N {
                    return Ok(poly);
                }
            }
        }
    }
    Err(exhausted("dilithium_uniform", max_blocks))
}

/// `ExpandA`: entry (i, j) uses nonce `(i << 8) | j`
pub fn dilithium_expand_matrix<const K: usize, const L: usize>(
    rho: &[u8; 32],
) -> Result<DilithiumMatrix<K, L>> {
    let mut matrix = DilithiumMatrix::<K, L>::zero();
    for (i, row) in matrix.rows.iter_mut().enumerate() {
        for (j, entry) in row.polys.iter_mut().enumerate() {
            *entry = dilithium_uniform(rho, ((i as u16) << 8) | j as u16)?;
        }
    }
    Ok(matrix)
}

/// Map a half-byte to a coefficient in `[-eta, eta]`, or reject it
#[inline]
fn eta_from_nibble(t: u32, eta: usize) -> Option<i32> {
    match eta {
        2 if t < 15 => Some(2 - (t as i32 - ((205 * t as i32) >> 10) * 5)),
        4 if t < 9 => Some(4 - t as i32),
        _ => None,
    }
}

/// `RejBoundedPoly`: secret coefficients in `[-eta, eta]` from `SHAKE256(rho' || nonce)`
pub fn dilithium_uniform_eta(seed: &[u8; 64], nonce: u16, eta: usize) -> Result<DilithiumPoly> {
    let mut xof = Xof256::new(&[seed, &nonce.to_le_bytes()]);
    let mut poly = DilithiumPoly::zero();
    let mut block = Zeroizing::new([0u8; SHAKE256_RATE]);
    let mut filled = 0;
    for _ in 0..DILITHIUM_ETA_MAX_BLOCKS {
        xof.squeeze_block(&mut block);
        for &byte in block.iter() {
            for t in [u32::from(byte & 0x0F), u32::from(byte >> 4)] {
                if filled < N {
                    if let Some(c) = eta_from_nibble(t, eta) {
                        poly.coeffs[filled] = c;
                        filled += 1;
                    }
                }
            }
            if filled == N {
                return Ok(poly);
            }
        }
    }
    Err(exhausted("dilithium_uniform_eta", DILITHIUM_ETA_MAX_BLOCKS))
}

/// `ExpandMask` for one polynomial: coefficients in `(-gamma1, gamma1]`
pub fn dilithium_uniform_gamma1(seed: &[u8; 64], nonce: u16, gamma1: i32) -> DilithiumPoly {
    let bits = if gamma1 == 1 << 17 { 18 } else { 20 };
    let mut buf = Zeroizing::new([0u8; 20 * 32]);
    let len = bits as usize * 32;
    crate::hash::shake256(&[seed, &nonce.to_le_bytes()], &mut buf[..len]);
    let raw = Zeroizing::new(unpack_bits(&buf[..len], bits));
    DilithiumPoly {
        coeffs: raw.map(|x| gamma1 - x as i32),
    }
}

/// `SampleInBall`: `tau` coefficients set to ±1, the rest zero
pub fn dilithium_challenge(ctilde: &[u8], tau: usize) -> Result<DilithiumPoly> {
    let mut xof = Xof256::new(&[ctilde]);
    let mut block = [0u8; SHAKE256_RATE];
    xof.squeeze_block(&mut block);

    let mut signs = u64::from_le_bytes([
        block[0], block[1], block[2], block[3], block[4], block[5], block[6], block[7],
    ]);
    let mut pos = 8;
    let mut blocks = 1;
    let mut c = DilithiumPoly::zero();

    for i in N - tau..N {
        let b = loop {
            if pos == SHAKE256_RATE {
                if blocks == CHALLENGE_MAX_BLOCKS {
                    return Err(exhausted("dilithium_challenge", CHALLENGE_MAX_BLOCKS));
                }
                xof.squeeze_block(&mut block);
                blocks += 1;
                pos = 0;
            }
            let b = usize::from(block[pos]);
            pos += 1;
            if b <= i {
                break b;
            }
        };
        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
    Ok(c)
}
