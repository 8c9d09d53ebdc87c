//! # Cypher PQC
//!
//! The post-quantum engine behind the Cypher mobile crypto bridge: ML-KEM
//! (Kyber) key encapsulation and ML-DSA (Dilithium) signatures, implemented
//! byte-for-byte against FIPS 203 and FIPS 204.
//!
//! ## Overview
//!
//! The crate is layered bottom-up:
//!
//! - [`reduce`], [`ntt`] and [`poly`]: modular arithmetic and the number-theoretic
//!   transform for both rings (q = 3329 and q = 8380417)
//! - [`hash`] and [`sample`]: SHA-3/SHAKE instantiations and the deterministic
//!   samplers that expand seeds into matrices, noise and challenges
//! - [`encode`]: fixed-width bit packing and ciphertext compression
//! - [`kyber`] and [`dilithium`]: the two engines
//! - [`api`]: a byte-slice boundary for callers that do not want typed keys
//!
//! ## Quick Start
//!
//! ```no_run
//! use cypher_pqc::prelude::*;
//! use cypher_pqc::random::OsRng;
//!
//! # fn main() -> core::result::Result<(), cypher_pqc::Error> {
//! let mut rng = OsRng::new();
//!
//! // Key exchange
//! let (public_key, secret_key) = generate_keypair(KemAlgorithm::Kyber768, &mut rng)?;
//! let (ciphertext, shared_secret) = encapsulate(KemAlgorithm::Kyber768, &public_key, &mut rng)?;
//! let recovered = decapsulate(KemAlgorithm::Kyber768, &secret_key, &ciphertext)?;
//! assert_eq!(*shared_secret, *recovered);
//!
//! // Signatures
//! let (pub_key, sec_key) = generate_signing_keypair(SignatureAlgorithm::Dilithium3, &mut rng)?;
//! let signature = sign(SignatureAlgorithm::Dilithium3, &sec_key, b"hello", &mut rng)?;
//! assert!(verify(SignatureAlgorithm::Dilithium3, &pub_key, b"hello", &signature));
//! # Ok(())
//! # }
//! ```
//!
//! ## Parameter Sets
//!
//! | Algorithm | Standard name | NIST Level | Public key | Secret key | Ciphertext / Signature |
//! |-----------|---------------|------------|-----------:|-----------:|-----------------------:|
//! | Kyber512 | ML-KEM-512 | 1 | 800 | 1632 | 768 |
//! | Kyber768 | ML-KEM-768 | 3 | 1184 | 2400 | 1088 |
//! | Kyber1024 | ML-KEM-1024 | 5 | 1568 | 3168 | 1568 |
//! | Dilithium2 | ML-DSA-44 | 2 | 1312 | 2560 | 2420 |
//! | Dilithium3 | ML-DSA-65 | 3 | 1952 | 4032 | 3309 |
//! | Dilithium5 | ML-DSA-87 | 5 | 2592 | 4896 | 4627 |
//!
//! ## Security Considerations
//!
//! 1. **Side channels**: reductions, compression, the decapsulation re-encryption
//!    check and the implicit-rejection select are branch-free on secret data.
//! 2. **Zeroization**: secret keys, shared secrets, seeds and secret polynomials
//!    are wiped on drop, including on rejection-loop and error exits.
//! 3. **Randomness**: a failing random source is reported as
//!    [`Error::RandomnessSourceFailure`]; it is never replaced by a weaker one.
//! 4. **Termination**: every rejection loop has a compile-time bound (see
//!    [`config`]); exceeding it is reported, never looped on.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

extern crate alloc;

// Re-export core traits and types
pub use crate::traits::{Kem, SecureRandom, Signature};
#[cfg(feature = "test-utils")]
pub use crate::traits::{SeededKem, SeededSignature};
pub use crate::error::{Error, Result};

// Core modules
pub mod error;
pub mod traits;
pub mod params;
pub mod config;
pub mod constant_time;
pub mod secure_memory;

// Arithmetic, sampling and encoding layers
pub mod reduce;
pub mod ntt;
pub mod poly;
pub mod hash;
pub mod sample;
pub mod encode;
pub mod random;

// Algorithm implementations
pub mod kyber;
pub mod dilithium;

// Byte-level API
pub mod api;

// Prelude for convenient imports
pub mod prelude {
    //! Common imports for using cypher-pqc
    //!
    //! ```
    //! use cypher_pqc::prelude::*;
    //! ```

    pub use crate::{
        Error, Result,
        Kem, Signature, SecureRandom,
        kyber::{Kyber512, Kyber768, Kyber1024},
        dilithium::{Dilithium2, Dilithium3, Dilithium5},
        api::{
            generate_keypair, encapsulate, decapsulate,
            generate_signing_keypair,
            sign, sign_with_context, verify, verify_with_context,
            KemAlgorithm, SignatureAlgorithm, KeyPair, Algorithm, SecurityLevel,
        },
    };

    // Deterministic key generation for known-answer tests
    #[cfg(feature = "test-utils")]
    pub use crate::{
        SeededKem, SeededSignature,
        api::{generate_keypair_from_seed, generate_signing_keypair_from_seed},
    };
}
