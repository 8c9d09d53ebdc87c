//! Algorithm parameters for Kyber and Dilithium
//!
//! This module contains the parameter sets for the NIST-standardized
//! post-quantum algorithms ML-KEM (FIPS 203) and ML-DSA (FIPS 204).

/// Kyber (ML-KEM) parameter sets
pub mod kyber {
    /// Polynomial degree (number of coefficients)
    pub const N: usize = 256;

    /// Modulus for the polynomial ring
    pub const Q: i16 = 3329;

    /// Size of hashes and seeds in bytes
    pub const SYMBYTES: usize = 32;

    /// Size of the shared secret in bytes
    pub const SSBYTES: usize = 32;

    /// Size of a polynomial serialized with 12 bits per coefficient
    pub const POLYBYTES: usize = 384;

    /// Size of the 32-byte message encoded in a single polynomial
    pub const MSGBYTES: usize = 32;

    /// Size of the deterministic key-generation seed `d || z`
    pub const KEYPAIR_SEED_BYTES: usize = 2 * SYMBYTES;

    /// Runtime view of one ML-KEM parameter set
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KyberParameters {
        /// Module rank
        pub k: usize,
        /// Noise parameter for `s`, `e` and `y`
        pub eta1: usize,
        /// Noise parameter for `e1` and `e2`
        pub eta2: usize,
        /// Compression bits for the vector part of the ciphertext
        pub du: u32,
        /// Compression bits for the scalar part of the ciphertext
        pub dv: u32,
    }

    impl KyberParameters {
        /// Bytes of a serialized polynomial vector
        pub const fn polyvec_bytes(&self) -> usize {
            self.k * POLYBYTES
        }

        /// Bytes of one polynomial compressed to `du` bits
        pub const fn poly_compressed_bytes_du(&self) -> usize {
            self.du as usize * N / 8
        }

        /// Bytes of one polynomial compressed to `dv` bits
        pub const fn poly_compressed_bytes_dv(&self) -> usize {
            self.dv as usize * N / 8
        }

        /// Encapsulation key size
        pub const fn public_key_bytes(&self) -> usize {
            self.polyvec_bytes() + SYMBYTES
        }

        /// K-PKE decryption key size
        pub const fn indcpa_secret_key_bytes(&self) -> usize {
            self.polyvec_bytes()
        }

        /// Decapsulation key size: `dk_pke || ek || H(ek) || z`
        pub const fn secret_key_bytes(&self) -> usize {
            self.indcpa_secret_key_bytes() + self.public_key_bytes() + 2 * SYMBYTES
        }

        /// Ciphertext size
        pub const fn ciphertext_bytes(&self) -> usize {
            self.k * self.poly_compressed_bytes_du() + self.poly_compressed_bytes_dv()
        }
    }

    /// Look up the parameter set for a module rank
    pub const fn for_rank(k: usize) -> Option<KyberParameters> {
        match k {
            2 => Some(kyber512::PARAMS),
            3 => Some(kyber768::PARAMS),
            4 => Some(kyber1024::PARAMS),
            _ => None,
        }
    }

    /// Kyber512 parameters (NIST Level 1)
    pub mod kyber512 {
        use super::*;

        /// Module dimension
        pub const K: usize = 2;
        /// Noise distribution parameter for key generation
        pub const ETA1: usize = 3;
        /// Noise distribution parameter for encryption
        pub const ETA2: usize = 2;
        /// Ciphertext compression parameter for u
        pub const DU: u32 = 10;
        /// Ciphertext compression parameter for v
        pub const DV: u32 = 4;

        /// Parameter set as a value
        pub const PARAMS: KyberParameters = KyberParameters { k: K, eta1: ETA1, eta2: ETA2, du: DU, dv: DV };

        /// Public key size in bytes
        pub const PUBLIC_KEY_SIZE: usize = PARAMS.public_key_bytes();
        /// Secret key size in bytes
        pub const SECRET_KEY_SIZE: usize = PARAMS.secret_key_bytes();
        /// Ciphertext size in bytes
        pub const CIPHERTEXT_SIZE: usize = PARAMS.ciphertext_bytes();
        /// Shared secret size in bytes
        pub const SHARED_SECRET_SIZE: usize = SSBYTES;
    }

    /// Kyber768 parameters (NIST Level 3)
    pub mod kyber768 {
        use super::*;

        /// Module dimension
        pub const K: usize = 3;
        /// Noise distribution parameter for key generation
        pub const ETA1: usize = 2;
        /// Noise distribution parameter for encryption
        pub const ETA2: usize = 2;
        /// Ciphertext compression parameter for u
        pub const DU: u32 = 10;
        /// Ciphertext compression parameter for v
        pub const DV: u32 = 4;

        /// Parameter set as a value
        pub const PARAMS: KyberParameters = KyberParameters { k: K, eta1: ETA1, eta2: ETA2, du: DU, dv: DV };

        /// Public key size in bytes
        pub const PUBLIC_KEY_SIZE: usize = PARAMS.public_key_bytes();
        /// Secret key size in bytes
        pub const SECRET_KEY_SIZE: usize = PARAMS.secret_key_bytes();
        /// Ciphertext size in bytes
        pub const CIPHERTEXT_SIZE: usize = PARAMS.ciphertext_bytes();
        /// Shared secret size in bytes
        pub const SHARED_SECRET_SIZE: usize = SSBYTES;
    }

    /// Kyber1024 parameters (NIST Level 5)
    pub mod kyber1024 {
        use super::*;

        /// Module dimension
        pub const K: usize = 4;
        /// Noise distribution parameter for key generation
        pub const ETA1: usize = 2;
        /// Noise distribution parameter for encryption
        pub const ETA2: usize = 2;
        /// Ciphertext compression parameter for u
        pub const DU: u32 = 11;
        /// Ciphertext compression parameter for v
        pub const DV: u32 = 5;

        /// Parameter set as a value
        pub const PARAMS: KyberParameters = KyberParameters { k: K, eta1: ETA1, eta2: ETA2, du: DU, dv: DV };

        /// Public key size in bytes
        pub const PUBLIC_KEY_SIZE: usize = PARAMS.public_key_bytes();
        /// Secret key size in bytes
        pub const SECRET_KEY_SIZE: usize = PARAMS.secret_key_bytes();
        /// Ciphertext size in bytes
        pub const CIPHERTEXT_SIZE: usize = PARAMS.ciphertext_bytes();
        /// Shared secret size in bytes
        pub const SHARED_SECRET_SIZE: usize = SSBYTES;
    }
}

/// Dilithium (ML-DSA) parameter sets
pub mod dilithium {
    /// Polynomial degree
    pub const N: usize = 256;
    /// Prime modulus q = 2^23 - 2^13 + 1 = 8380417
    pub const Q: i32 = 8380417;
    /// Number of bits dropped from t when computing t1 and t0
    pub const D: u32 = 13;
    /// 512th root of unity modulo q used by the NTT
    pub const ROOT_OF_UNITY: i32 = 1753;
    /// Size of seeds in bytes
    pub const SEEDBYTES: usize = 32;
    /// Size of the private seed and of mu in bytes
    pub const CRHBYTES: usize = 64;
    /// Size of the public key hash tr in bytes
    pub const TRBYTES: usize = 64;
    /// Size of the signing randomness rnd in bytes
    pub const RNDBYTES: usize = 32;
    /// Size of a packed t1 polynomial
    pub const POLYT1_PACKEDBYTES: usize = 320;
    /// Size of a packed t0 polynomial
    pub const POLYT0_PACKEDBYTES: usize = 416;
    /// Longest context string FIPS 204 accepts
    pub const MAX_CONTEXT_BYTES: usize = 255;

    /// Runtime view of one ML-DSA parameter set
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DilithiumParameters {
        /// Rows of A
        pub k: usize,
        /// Columns of A
        pub l: usize,
        /// Secret coefficient bound
        pub eta: usize,
        /// Number of ±1 coefficients in the challenge
        pub tau: usize,
        /// tau * eta
        pub beta: i32,
        /// Mask range
        pub gamma1: i32,
        /// Low-order rounding range
        pub gamma2: i32,
        /// Maximum number of hint bits
        pub omega: usize,
        /// Size of the commitment hash c~ in bytes
        pub ctilde_bytes: usize,
    }

    impl DilithiumParameters {
        /// Bits per packed secret coefficient
        pub const fn eta_bits(&self) -> u32 {
            if self.eta == 2 { 3 } else { 4 }
        }

        /// Bits per packed z coefficient
        pub const fn z_bits(&self) -> u32 {
            if self.gamma1 == 1 << 17 { 18 } else { 20 }
        }

        /// Bits per packed w1 coefficient
        pub const fn w1_bits(&self) -> u32 {
            if self.gamma2 == (Q - 1) / 88 { 6 } else { 4 }
        }

        /// Size of a packed eta polynomial
        pub const fn poly_eta_packed_bytes(&self) -> usize {
            self.eta_bits() as usize * N / 8
        }

        /// Size of a packed z polynomial
        pub const fn poly_z_packed_bytes(&self) -> usize {
            self.z_bits() as usize * N / 8
        }

        /// Size of a packed w1 polynomial
        pub const fn poly_w1_packed_bytes(&self) -> usize {
            self.w1_bits() as usize * N / 8
        }

        /// Size of the packed hint vector
        pub const fn polyvec_h_packed_bytes(&self) -> usize {
            self.omega + self.k
        }

        /// Public key size: `rho || t1`
        pub const fn public_key_bytes(&self) -> usize {
            SEEDBYTES + self.k * POLYT1_PACKEDBYTES
        }

        /// Secret key size: `rho || K || tr || s1 || s2 || t0`
        pub const fn secret_key_bytes(&self) -> usize {
            2 * SEEDBYTES
                + TRBYTES
                + (self.l + self.k) * self.poly_eta_packed_bytes()
                + self.k * POLYT0_PACKEDBYTES
        }

        /// Signature size: `c~ || z || h`
        pub const fn signature_bytes(&self) -> usize {
            self.ctilde_bytes + self.l * self.poly_z_packed_bytes() + self.polyvec_h_packed_bytes()
        }
    }

    /// Look up the parameter set for a row count `k` (unique per set)
    pub const fn for_rank(k: usize) -> Option<DilithiumParameters> {
        match k {
            4 => Some(dilithium2::PARAMS),
            6 => Some(dilithium3::PARAMS),
            8 => Some(dilithium5::PARAMS),
            _ => None,
        }
    }

    /// Dilithium2 parameters (ML-DSA-44, NIST Level 2)
    pub mod dilithium2 {
        use super::*;

        /// Rows of matrix A
        pub const K: usize = 4;
        /// Columns of matrix A
        pub const L: usize = 4;

        /// Parameter set as a value
        pub const PARAMS: DilithiumParameters = DilithiumParameters {
            k: K,
            l: L,
            eta: 2,
            tau: 39,
            beta: 78,
            gamma1: 1 << 17,
            gamma2: (Q - 1) / 88,
            omega: 80,
            ctilde_bytes: 32,
        };

        /// Public key size in bytes
        pub const PUBLIC_KEY_SIZE: usize = PARAMS.public_key_bytes();
        /// Secret key size in bytes
        pub const SECRET_KEY_SIZE: usize = PARAMS.secret_key_bytes();
        /// Signature size in bytes
        pub const SIGNATURE_SIZE: usize = PARAMS.signature_bytes();
    }

    /// Dilithium3 parameters (ML-DSA-65, NIST Level 3)
    pub mod dilithium3 {
        use super::*;

        /// Rows of matrix A
        pub const K: usize = 6;
        /// Columns of matrix A
        pub const L: usize = 5;

        /// Parameter set as a value
        pub const PARAMS: DilithiumParameters = DilithiumParameters {
            k: K,
            l: L,
            eta: 4,
            tau: 49,
            beta: 196,
            gamma1: 1 << 19,
            gamma2: (Q - 1) / 32,
            omega: 55,
            ctilde_bytes: 48,
        };

        /// Public key size in bytes
        pub const PUBLIC_KEY_SIZE: usize = PARAMS.public_key_bytes();
        /// Secret key size in bytes
        pub const SECRET_KEY_SIZE: usize = PARAMS.secret_key_bytes();
        /// Signature size in bytes
        pub const SIGNATURE_SIZE: usize = PARAMS.signature_bytes();
    }

    /// Dilithium5 parameters (ML-DSA-87, NIST Level 5)
    pub mod dilithium5 {
        use super::*;

        /// Rows of matrix A
        pub const K: usize = 8;
        /// Columns of matrix A
        pub const L: usize = 7;

        /// Parameter set as a value
        pub const PARAMS: DilithiumParameters = DilithiumParameters {
            k: K,
            l: L,
            eta: 2,
            tau: 60,
            beta: 120,
            gamma1: 1 << 19,
            gamma2: (Q - 1) / 32,
            omega: 75,
            ctilde_bytes: 64,
        };

        /// Public key size in bytes
        pub const PUBLIC_KEY_SIZE: usize = PARAMS.public_key_bytes();
        /// Secret key size in bytes
        pub const SECRET_KEY_SIZE: usize = PARAMS.secret_key_bytes();
        /// Signature size in bytes
        pub const SIGNATURE_SIZE: usize = PARAMS.signature_bytes();
    }
}
