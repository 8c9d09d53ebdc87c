//! Rounding helpers: `Power2Round`, `Decompose`, `MakeHint` and `UseHint`
//!
//! Scalar functions take a coefficient in `[0, q)`. The vector forms operate
//! on whole polynomial vectors and are what the signer and verifier call.

use crate::params::dilithium::{D, N, Q};
use crate::poly::{DilithiumPoly, DilithiumPolyVec};

/// Split `a` into `(a1, a0)` with `a = a1 * 2^D + a0` and `-2^(D-1) < a0 <= 2^(D-1)`
#[inline]
pub fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// Split `a` into high bits `a1` and centered low bits `a0` modulo `2 * gamma2`.
///
/// The `a1 = (q-1)/(2 gamma2)` corner case is folded into `a1 = 0, a0 = a0 - 1`.
#[inline]
pub fn decompose(a: i32, gamma2: i32) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;
    if gamma2 == (Q - 1) / 32 {
        a1 = ((a1 * 1025 + (1 << 21)) >> 22) & 15;
    } else {
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    }

    let mut a0 = a - a1 * 2 * gamma2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}

/// Whether the low part `a0` pushes the high part away from `a1`
#[inline]
pub fn make_hint(a0: i32, a1: i32, gamma2: i32) -> bool {
    a0 > gamma2 || a0 < -gamma2 || (a0 == -gamma2 && a1 != 0)
}

/// Recover the corrected high bits of `a`
#[inline]
pub fn use_hint(a: i32, hint: bool, gamma2: i32) -> i32 {
    let (a1, a0) = decompose(a, gamma2);
    if !hint {
        return a1;
    }

    if gamma2 == (Q - 1) / 32 {
        if a0 > 0 {
            (a1 + 1) & 15
        } else {
            (a1 - 1) & 15
        }
    } else if a0 > 0 {
        if a1 == 43 { 0 } else { a1 + 1 }
    } else if a1 == 0 {
        43
    } else {
        a1 - 1
    }
}

/// `(t1, t0)` for every coefficient of `t` (standard representatives required)
pub fn power2round_vec<const K: usize>(
    t: &DilithiumPolyVec<K>,
) -> (DilithiumPolyVec<K>, DilithiumPolyVec<K>) {
    let mut t1 = DilithiumPolyVec::<K>::zero();
    let mut t0 = DilithiumPolyVec::<K>::zero();
    for ((src, hi), lo) in t.polys.iter().zip(t1.polys.iter_mut()).zip(t0.polys.iter_mut()) {
        for j in 0..N {
            (hi.coeffs[j], lo.coeffs[j]) = power2round(src.coeffs[j]);
        }
    }
    (t1, t0)
}

/// `(w1, w0)` for every coefficient of `w` (standard representatives required)
pub fn decompose_vec<const K: usize>(
    w: &DilithiumPolyVec<K>,
    gamma2: i32,
) -> (DilithiumPolyVec<K>, DilithiumPolyVec<K>) {
    let mut w1 = DilithiumPolyVec::<K>::zero();
    let mut w0 = DilithiumPolyVec::<K>::zero();
    for ((src, hi), lo) in w.polys.iter().zip(w1.polys.iter_mut()).zip(w0.polys.iter_mut()) {
        for j in 0..N {
            (hi.coeffs[j], lo.coeffs[j]) = decompose(src.coeffs[j], gamma2);
        }
    }
    (w1, w0)
}

/// Hint vector for `(w0 - cs2 + ct0, w1)` and its population count
pub fn make_hint_vec<const K: usize>(
    low: &DilithiumPolyVec<K>,
    high: &DilithiumPolyVec<K>,
    gamma2: i32,
) -> (DilithiumPolyVec<K>, usize) {
    let mut hints = DilithiumPolyVec::<K>::zero();
    let mut count = 0;
    for ((h, a0), a1) in hints.polys.iter_mut().zip(low.polys.iter()).zip(high.polys.iter()) {
        for j in 0..N {
            let bit = make_hint(a0.coeffs[j], a1.coeffs[j], gamma2);
            h.coeffs[j] = i32::from(bit);
            count += usize::from(bit);
        }
    }
    (hints, count)
}

/// Apply `hints` to `w`, giving the signer's `w1`
pub fn use_hint_vec<const K: usize>(
    w: &DilithiumPolyVec<K>,
    hints: &DilithiumPolyVec<K>,
    gamma2: i32,
) -> DilithiumPolyVec<K> {
    DilithiumPolyVec {
        polys: core::array::from_fn(|i| {
            let mut out = DilithiumPoly::zero();
            for j in 0..N {
                out.coeffs[j] = use_hint(w.polys[i].coeffs[j], hints.polys[i].coeffs[j] != 0, gamma2);
            }
            out
        }),
    }
}
