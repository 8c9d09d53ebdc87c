//! Fixed-width bit packing and Kyber compression
//!
//! Every serialized polynomial in both schemes is a little-endian bit stream:
//! coefficient 0 occupies the lowest bits of byte 0. [`pack_bits`] and
//! [`unpack_bits`] implement that once; the scheme-specific codecs only decide
//! which value goes in and how wide it is.

use crate::constant_time::ct_decode_bit;
use crate::params::kyber::{MSGBYTES, POLYBYTES, Q};
use crate::poly::{Poly, N};
use crate::reduce::kyber::caddq;

/// Pack the low `bits` bits of each value into `out` (exactly `bits * 32` bytes)
pub fn pack_bits<I>(values: I, bits: u32, out: &mut [u8])
where
    I: IntoIterator<Item = u32>,
{
    debug_assert_eq!(out.len(), bits as usize * N / 8);
    let mask = (1u64 << bits) - 1;
    let mut acc: u64 = 0;
    let mut filled = 0u32;
    let mut pos = 0;
    for value in values {
        acc |= (u64::from(value) & mask) << filled;
        filled += bits;
        while filled >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            filled -= 8;
        }
    }
}

/// Unpack 256 values of `bits` bits each from `bytes` (exactly `bits * 32` bytes)
pub fn unpack_bits(bytes: &[u8], bits: u32) -> [u32; N] {
    debug_assert_eq!(bytes.len(), bits as usize * N / 8);
    let mask = (1u64 << bits) - 1;
    let mut out = [0u32; N];
    let mut acc: u64 = 0;
    let mut filled = 0u32;
    let mut input = bytes.iter();
    for value in out.iter_mut() {
        while filled < bits {
            let byte = input.next().copied().unwrap_or(0);
            acc |= u64::from(byte) << filled;
            filled += 8;
        }
        *value = (acc & mask) as u32;
        acc >>= bits;
        filled -= bits;
    }
    out
}

/// `ceil(2^32 / q)`: exact division by q for numerators below `2^23`
const COMPRESS_MULTIPLIER: u64 = 1_290_168;

/// `Compress_q(x, d)` for a coefficient in `(-q, q)` and `d <= 11`.
///
/// The rounding division by q is a multiply and shift; a hardware divide
/// here would leak the re-encrypted message through its timing.
#[inline]
pub fn compress(x: i16, d: u32) -> u32 {
    debug_assert!((1..=11).contains(&d));
    let x = u64::from(caddq(x) as u16);
    let numerator = (x << d) + (Q as u64) / 2;
    (((numerator * COMPRESS_MULTIPLIER) >> 32) as u32) & ((1 << d) - 1)
}

/// `Decompress_q(y, d)`
#[inline]
pub fn decompress(y: u32, d: u32) -> i16 {
    ((y * Q as u32 + (1 << (d - 1))) >> d) as i16
}

/// Serialize a polynomial with 12 bits per standard-representative coefficient
pub fn poly_to_bytes(p: &Poly, out: &mut [u8]) {
    pack_bits(p.coeffs.iter().map(|&c| caddq(c) as u32), 12, out);
}

/// Deserialize 384 bytes into a polynomial without reducing coefficients
pub fn poly_from_bytes(bytes: &[u8]) -> Poly {
    let raw = unpack_bits(bytes, 12);
    Poly {
        coeffs: raw.map(|c| c as i16),
    }
}

/// True when every 12-bit coefficient in `bytes` is below q.
///
/// This is the FIPS 203 encapsulation-key check, `ByteEncode12(ByteDecode12(ek)) == ek`.
pub fn is_reduced_12(bytes: &[u8]) -> bool {
    bytes
        .chunks_exact(POLYBYTES)
        .all(|chunk| unpack_bits(chunk, 12).iter().all(|&c| c < Q as u32))
}

/// Compress a polynomial to `d` bits per coefficient
pub fn poly_compress(p: &Poly, d: u32, out: &mut [u8]) {
    pack_bits(p.coeffs.iter().map(|&c| compress(c, d)), d, out);
}

/// Decompress `d`-bit coefficients
pub fn poly_decompress(bytes: &[u8], d: u32) -> Poly {
    let raw = unpack_bits(bytes, d);
    Poly {
        coeffs: raw.map(|y| decompress(y, d)),
    }
}

/// Map each message bit to 0 or (q+1)/2 without branching on it
pub fn poly_from_msg(msg: &[u8; MSGBYTES]) -> Poly {
    let mut p = Poly::zero();
    for (i, byte) in msg.iter().enumerate() {
        for j in 0..8 {
            let mask = 0i16.wrapping_sub(i16::from((byte >> j) & 1));
            p.coeffs[8 * i + j] = mask & ((Q + 1) / 2);
        }
    }
    p
}

/// Round each coefficient to the nearest of 0 and q/2 and collect the bits
pub fn poly_to_msg(p: &Poly) -> [u8; MSGBYTES] {
    let mut msg = [0u8; MSGBYTES];
    for (i, byte) in msg.iter_mut().enumerate() {
        for j in 0..8 {
            *byte |= ct_decode_bit(caddq(p.coeffs[8 * i + j])) << j;
        }
    }
    msg
}
