//! Hash functions and XOF instantiations
//!
//! Both schemes are built on the SHA-3 family. Multi-part inputs are absorbed
//! one slice at a time so callers never need to concatenate secrets into a
//! temporary buffer.

use core::fmt;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Digest, Sha3_256, Sha3_512, Shake128, Shake128Reader, Shake256, Shake256Reader,
};

/// SHAKE128 rate in bytes
pub const SHAKE128_RATE: usize = 168;

/// SHAKE256 rate in bytes
pub const SHAKE256_RATE: usize = 136;

/// Hash function H (SHA3-256)
pub fn h(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, input);
    hasher.finalize().into()
}

/// Hash function G (SHA3-512) over the concatenation of `parts`
pub fn g(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    hasher.finalize().into()
}

/// SHAKE256 over the concatenation of `parts`, filling `out`
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    for part in parts {
        Update::update(&mut hasher, part);
    }
    hasher.finalize_xof().read(out);
}

/// ML-KEM PRF: `SHAKE256(key || nonce)` truncated to `out.len()`
pub fn prf(key: &[u8; 32], nonce: u8, out: &mut [u8]) {
    shake256(&[key, &[nonce]], out);
}

/// ML-KEM implicit-rejection KDF `J(z || c)`
pub fn rkprf(z: &[u8; 32], ciphertext: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    shake256(&[z, ciphertext], &mut out);
    out
}

/// SHAKE128 stream squeezed one block at a time
pub struct Xof128 {
    reader: Shake128Reader,
}

impl Xof128 {
    /// Absorb `parts` and switch to squeezing
    pub fn new(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake128::default();
        for part in parts {
            Update::update(&mut hasher, part);
        }
        Self { reader: hasher.finalize_xof() }
    }

    /// ML-KEM matrix stream for `A[i][j]`: `SHAKE128(rho || j || i)`
    pub fn kyber_matrix(rho: &[u8; 32], column: u8, row: u8) -> Self {
        Self::new(&[rho, &[column, row]])
    }

    /// ML-DSA matrix stream for a 16-bit nonce `(i << 8) | j`
    pub fn dilithium_matrix(rho: &[u8; 32], nonce: u16) -> Self {
        Self::new(&[rho, &nonce.to_le_bytes()])
    }

    /// Squeeze the next block
    pub fn squeeze_block(&mut self, block: &mut [u8; SHAKE128_RATE]) {
        self.reader.read(block);
    }
}

impl fmt::Debug for Xof128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xof128")
            .field("reader", &"<Shake128Reader>")
            .finish()
    }
}

/// SHAKE256 stream squeezed one block at a time
pub struct Xof256 {
    reader: Shake256Reader,
}

impl Xof256 {
    /// Absorb `parts` and switch to squeezing
    pub fn new(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        for part in parts {
            Update::update(&mut hasher, part);
        }
        Self { reader: hasher.finalize_xof() }
    }

    /// Squeeze the next block
    pub fn squeeze_block(&mut self, block: &mut [u8; SHAKE256_RATE]) {
        self.reader.read(block);
    }

    /// Squeeze an arbitrary number of bytes
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

impl fmt::Debug for Xof256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xof256")
            .field("reader", &"<Shake256Reader>")
            .finish()
    }
}
