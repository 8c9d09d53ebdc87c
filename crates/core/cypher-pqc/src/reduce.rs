//! Modular reduction for both rings
//!
//! All routines are branch-free. Montgomery form uses R = 2^16 for Kyber and
//! R = 2^32 for Dilithium.

/// Reductions modulo q = 3329
pub mod kyber {
    use crate::params::kyber::Q;

    /// q^-1 mod 2^16 (signed)
    pub const QINV: i16 = -3327;

    /// 2^16 mod q (signed)
    pub const MONT: i16 = -1044;

    /// Barrett multiplier round(2^26 / q)
    const BARRETT_V: i32 = ((1 << 26) + (Q as i32) / 2) / Q as i32;

    /// Montgomery reduction: for |a| < q·2^15 returns r ≡ a·2^-16 (mod q), |r| < q
    #[inline]
    pub fn montgomery_reduce(a: i32) -> i16 {
        let t = (a as i16).wrapping_mul(QINV);
        ((a - i32::from(t) * i32::from(Q)) >> 16) as i16
    }

    /// Barrett reduction to the centered range `[-(q-1)/2, (q-1)/2]`
    #[inline]
    pub fn barrett_reduce(a: i16) -> i16 {
        let t = ((BARRETT_V * i32::from(a) + (1 << 25)) >> 26) as i16;
        a.wrapping_sub(t.wrapping_mul(Q))
    }

    /// Multiplication followed by Montgomery reduction
    #[inline]
    pub fn fqmul(a: i16, b: i16) -> i16 {
        montgomery_reduce(i32::from(a) * i32::from(b))
    }

    /// Map a coefficient in `(-q, q)` to `[0, q)`
    #[inline]
    pub fn caddq(a: i16) -> i16 {
        a + ((a >> 15) & Q)
    }
}

/// Reductions modulo q = 8380417
pub mod dilithium {
    use crate::params::dilithium::Q;

    /// q^-1 mod 2^32
    pub const QINV: i32 = 58728449;

    /// Montgomery reduction: for |a| ≤ 2^31·q returns r ≡ a·2^-32 (mod q), |r| < q
    #[inline]
    pub fn montgomery_reduce(a: i64) -> i32 {
        let t = (a as i32).wrapping_mul(QINV);
        ((a - i64::from(t) * i64::from(Q)) >> 32) as i32
    }

    /// For a ≤ 2^31 - 2^22 - 1 returns r ≡ a (mod q) with -6283009 ≤ r ≤ 6283007
    #[inline]
    pub fn reduce32(a: i32) -> i32 {
        let t = (a + (1 << 22)) >> 23;
        a - t * Q
    }

    /// Add q if the input is negative
    #[inline]
    pub fn caddq(a: i32) -> i32 {
        a + ((a >> 31) & Q)
    }

    /// Standard representative in `[0, q)`
    #[inline]
    pub fn freeze(a: i32) -> i32 {
        caddq(reduce32(a))
    }
}
