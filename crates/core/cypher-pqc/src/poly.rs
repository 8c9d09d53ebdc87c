//! Polynomial arithmetic over both rings
//!
//! [`Poly`], [`PolyVec`] and [`PolyMat`] live in Z_3329[X]/(X^256 + 1) and
//! carry Kyber's i16 coefficients. [`DilithiumPoly`] and friends live in
//! Z_8380417[X]/(X^256 + 1) with i32 coefficients. Neither type tracks its
//! domain (normal vs NTT); the engines keep that straight.

use crate::constant_time::ct_check_norm;
use crate::ntt;
use crate::params::dilithium::D;
use crate::reduce::{dilithium as dred, kyber as kred};
use zeroize::Zeroize;

/// Number of coefficients per polynomial
pub const N: usize = 256;

/// 2^32 mod q, converts a Kyber coefficient to Montgomery form
const KYBER_TOMONT_F: i16 = 1353;

/// Polynomial with coefficients in Z_3329
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Poly {
    /// Coefficients of the polynomial
    pub coeffs: [i16; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    /// Create a new zero polynomial
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Barrett-reduce every coefficient to the centered range
    pub fn reduce(&mut self) {
        for coeff in &mut self.coeffs {
            *coeff = kred::barrett_reduce(*coeff);
        }
    }

    /// Multiply every coefficient by 2^16 (enter Montgomery form)
    pub fn tomont(&mut self) {
        for coeff in &mut self.coeffs {
            *coeff = kred::montgomery_reduce(i32::from(*coeff) * i32::from(KYBER_TOMONT_F));
        }
    }

    /// Convert to NTT domain
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Convert from NTT domain (multiplies by 2^16)
    pub fn inv_ntt(&mut self) {
        ntt::inv_ntt(&mut self.coeffs);
    }

    /// NTT-domain product, carrying a factor 2^-16
    pub fn basemul_montgomery(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        ntt::basemul(&mut result.coeffs, &self.coeffs, &other.coeffs);
        result
    }

    /// Coefficient-wise addition without reduction
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = a.wrapping_add(*b);
        }
    }

    /// Coefficient-wise subtraction without reduction
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = a.wrapping_sub(*b);
        }
    }
}

/// Vector of K Kyber polynomials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyVec<const K: usize> {
    /// Vector of polynomials
    pub polys: [Poly; K],
}

impl<const K: usize> PolyVec<K> {
    /// Create a new zero polynomial vector
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Reduce all polynomials
    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(Poly::reduce);
    }

    /// Convert all polynomials to NTT domain
    pub fn ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::ntt);
    }

    /// Convert all polynomials from NTT domain
    pub fn inv_ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::inv_ntt);
    }

    /// Polynomial-wise addition without reduction
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    /// Inner product in the NTT domain, Barrett-reduced, carrying 2^-16
    pub fn basemul_acc_montgomery(&self, other: &Self) -> Poly {
        let mut result = Poly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            result.add_assign(&a.basemul_montgomery(b));
        }
        result.reduce();
        result
    }
}

impl<const K: usize> Zeroize for PolyVec<K> {
    fn zeroize(&mut self) {
        self.polys.iter_mut().for_each(Zeroize::zeroize);
    }
}

/// K x K matrix of Kyber polynomials in NTT domain
#[derive(Clone, Debug)]
pub struct PolyMat<const K: usize> {
    /// Matrix rows
    pub rows: [PolyVec<K>; K],
}

impl<const K: usize> PolyMat<K> {
    /// Create a new zero polynomial matrix
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| PolyVec::zero()),
        }
    }

    /// Matrix-vector product in the NTT domain, carrying 2^-16 per entry
    pub fn mul_vec_montgomery(&self, vec: &PolyVec<K>) -> PolyVec<K> {
        PolyVec {
            polys: core::array::from_fn(|i| self.rows[i].basemul_acc_montgomery(vec)),
        }
    }
}

/// Polynomial with coefficients in Z_8380417
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct DilithiumPoly {
    /// Coefficients of the polynomial
    pub coeffs: [i32; N],
}

impl Default for DilithiumPoly {
    fn default() -> Self {
        Self::zero()
    }
}

impl DilithiumPoly {
    /// Create a new zero polynomial
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Reduce coefficients to roughly `(-6283009, 6283007)`
    pub fn reduce(&mut self) {
        for coeff in &mut self.coeffs {
            *coeff = dred::reduce32(*coeff);
        }
    }

    /// Add q to negative coefficients
    pub fn caddq(&mut self) {
        for coeff in &mut self.coeffs {
            *coeff = dred::caddq(*coeff);
        }
    }

    /// Coefficient-wise addition without reduction
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a += *b;
        }
    }

    /// Coefficient-wise subtraction without reduction
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= *b;
        }
    }

    /// Multiply by 2^D
    pub fn shift_left(&mut self) {
        for coeff in &mut self.coeffs {
            *coeff <<= D;
        }
    }

    /// Convert to NTT domain
    pub fn ntt(&mut self) {
        ntt::dilithium_ntt(&mut self.coeffs);
    }

    /// Convert from NTT domain, multiplying by 2^32
    pub fn inv_ntt_tomont(&mut self) {
        ntt::dilithium_inv_ntt_tomont(&mut self.coeffs);
    }

    /// Pointwise NTT-domain product, carrying 2^-32
    pub fn pointwise_montgomery(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for ((r, a), b) in result
            .coeffs
            .iter_mut()
            .zip(self.coeffs.iter())
            .zip(other.coeffs.iter())
        {
            *r = dred::montgomery_reduce(i64::from(*a) * i64::from(*b));
        }
        result
    }

    /// True when some coefficient has magnitude at least `bound`.
    ///
    /// Coefficients must already be reduced by [`DilithiumPoly::reduce`].
    /// Bounds above (q-1)/8 always report `true`.
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        if bound > (crate::params::dilithium::Q - 1) / 8 {
            return true;
        }
        !bool::from(ct_check_norm(&self.coeffs, bound))
    }
}

/// Vector of D Dilithium polynomials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumPolyVec<const LEN: usize> {
    /// Vector of polynomials
    pub polys: [DilithiumPoly; LEN],
}

impl<const LEN: usize> DilithiumPolyVec<LEN> {
    /// Create a new zero polynomial vector
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| DilithiumPoly::zero()),
        }
    }

    /// Reduce all polynomials
    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(DilithiumPoly::reduce);
    }

    /// Add q to all negative coefficients
    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(DilithiumPoly::caddq);
    }

    /// Convert all polynomials to NTT domain
    pub fn ntt(&mut self) {
        self.polys.iter_mut().for_each(DilithiumPoly::ntt);
    }

    /// Convert all polynomials from NTT domain
    pub fn inv_ntt_tomont(&mut self) {
        self.polys.iter_mut().for_each(DilithiumPoly::inv_ntt_tomont);
    }

    /// Multiply every coefficient by 2^D
    pub fn shift_left(&mut self) {
        self.polys.iter_mut().for_each(DilithiumPoly::shift_left);
    }

    /// Polynomial-wise addition without reduction
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    /// Polynomial-wise subtraction without reduction
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.sub_assign(b);
        }
    }

    /// Multiply every entry by a single NTT-domain polynomial
    pub fn scale_montgomery(&self, c: &DilithiumPoly) -> Self {
        Self {
            polys: core::array::from_fn(|i| c.pointwise_montgomery(&self.polys[i])),
        }
    }

    /// Inner product in the NTT domain, carrying 2^-32
    pub fn pointwise_acc_montgomery(&self, other: &Self) -> DilithiumPoly {
        let mut result = DilithiumPoly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            result.add_assign(&a.pointwise_montgomery(b));
        }
        result
    }

    /// True when any polynomial exceeds `bound`
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        // Evaluate every entry so the running time does not depend on which one fails
        self.polys
            .iter()
            .fold(false, |acc, p| acc | p.exceeds_norm(bound))
    }
}

impl<const LEN: usize> Zeroize for DilithiumPolyVec<LEN> {
    fn zeroize(&mut self) {
        self.polys.iter_mut().for_each(Zeroize::zeroize);
    }
}

/// K x L matrix of Dilithium polynomials in NTT domain
#[derive(Clone, Debug)]
pub struct DilithiumMatrix<const K: usize, const L: usize> {
    /// Matrix rows
    pub rows: [DilithiumPolyVec<L>; K],
}

impl<const K: usize, const L: usize> DilithiumMatrix<K, L> {
    /// Create a new zero matrix
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| DilithiumPolyVec::zero()),
        }
    }

    /// `A * v` in the NTT domain, each entry reduced, carrying 2^-32
    pub fn mul_vec_montgomery(&self, v: &DilithiumPolyVec<L>) -> DilithiumPolyVec<K> {
        DilithiumPolyVec {
            polys: core::array::from_fn(|i| {
                let mut row = self.rows[i].pointwise_acc_montgomery(v);
                row.reduce();
                row
            }),
        }
    }
}
