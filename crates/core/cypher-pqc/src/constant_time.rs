//! Constant-time operations for side-channel resistance
//!
//! Comparisons and selections on secret data go through `subtle` so that the
//! compiler cannot turn them into data-dependent branches.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

/// Map i16 to u16 preserving order
#[inline]
fn bias16(x: i16) -> u16 {
    (x as u16) ^ 0x8000
}

/// Decode one message bit from a Kyber coefficient in `[0, q)`.
///
/// Returns 1 when the coefficient is closer to q/2 than to 0, which is
/// `Compress_q(x, 1)`.
pub fn ct_decode_bit(coeff: i16) -> u8 {
    const Q_QUARTER: i16 = 832;
    const THREE_Q_QUARTER: i16 = 2497;

    let above = bias16(coeff).ct_gt(&bias16(Q_QUARTER));
    let below = bias16(coeff).ct_lt(&bias16(THREE_Q_QUARTER));
    u8::conditional_select(&0u8, &1u8, above & below)
}

/// Byte-slice equality without early exit. Slices of different length compare unequal.
pub fn ct_eq(a: &[u8], b: &[u8]) -> Choice {
    a.ct_eq(b)
}

/// Overwrite `dst` with `src` when `choice` is set, touching every byte either way
pub fn ct_select_bytes(dst: &mut [u8], src: &[u8], choice: Choice) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, choice);
    }
}

/// Constant-time norm check for Dilithium.
///
/// Returns `Choice(1)` when every coefficient satisfies `|x| < bound`.
pub fn ct_check_norm(coeffs: &[i32], bound: i32) -> Choice {
    let bound = bound as u32;
    coeffs.iter().fold(Choice::from(1u8), |all_valid, &x| {
        // |x| without a branch
        let sign = x >> 31;
        let abs = x.wrapping_sub(sign & x.wrapping_mul(2)) as u32;
        all_valid & abs.ct_lt(&bound)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_decode_bit() {
        assert_eq!(ct_decode_bit(0), 0);
        assert_eq!(ct_decode_bit(832), 0);
        assert_eq!(ct_decode_bit(833), 1);
        assert_eq!(ct_decode_bit(1664), 1);
        assert_eq!(ct_decode_bit(2496), 1);
        assert_eq!(ct_decode_bit(2497), 0);
        assert_eq!(ct_decode_bit(3328), 0);
    }

    #[test]
    fn test_ct_decode_bit_matches_rounding() {
        for x in 0i32..3329 {
            let rounded = ((((x << 1) + 1664) / 3329) & 1) as u8;
            assert_eq!(ct_decode_bit(x as i16), rounded, "x = {x}");
        }
    }

    #[test]
    fn test_ct_eq() {
        assert!(bool::from(ct_eq(b"abc", b"abc")));
        assert!(!bool::from(ct_eq(b"abc", b"abd")));
        assert!(!bool::from(ct_eq(b"abc", b"ab")));
    }

    #[test]
    fn test_ct_select_bytes() {
        let mut dst = [1u8; 4];
        ct_select_bytes(&mut dst, &[9u8; 4], Choice::from(0));
        assert_eq!(dst, [1u8; 4]);
        ct_select_bytes(&mut dst, &[9u8; 4], Choice::from(1));
        assert_eq!(dst, [9u8; 4]);
    }

    #[test]
    fn test_ct_check_norm() {
        let coeffs = [10, -20, 30, -40, 50];

        // All within bound
        assert!(bool::from(ct_check_norm(&coeffs, 100)));

        // One exceeds bound
        assert!(!bool::from(ct_check_norm(&coeffs, 40)));

        // Exact bound is rejected
        assert!(!bool::from(ct_check_norm(&coeffs, 50)));
        assert!(!bool::from(ct_check_norm(&[-50], 50)));
        assert!(bool::from(ct_check_norm(&[-49], 50)));
    }
}
