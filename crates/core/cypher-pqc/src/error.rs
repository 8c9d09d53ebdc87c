//! Error types for cryptographic operations

use core::fmt;

/// Result type alias using our Error type
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations
///
/// Length errors are raised before any arithmetic runs. `verify` never
/// produces an error, and decapsulation with a well-formed secret key always
/// yields a shared secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Public key buffer has the wrong length
    InvalidPublicKey {
        /// Length required by the parameter set
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Secret key buffer has the wrong length
    InvalidSecretKey {
        /// Length required by the parameter set
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Ciphertext buffer has the wrong length
    InvalidCiphertext {
        /// Length required by the parameter set
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Signature buffer has the wrong length
    InvalidSignature {
        /// Length required by the parameter set
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Key generation seed has the wrong length
    InvalidSeed {
        /// Length required by the parameter set
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// ML-KEM encapsulation key holds a coefficient that is not reduced mod q
    MalformedPublicKey,

    /// ML-KEM decapsulation key whose embedded `H(ek)` does not match its `ek`
    MalformedSecretKey,

    /// ML-DSA context string longer than 255 bytes
    InvalidContext {
        /// Length that was supplied
        length: usize,
    },

    /// A bounded sampling or signing loop ran out of attempts
    InternalContractViolation(&'static str),

    /// The secure random source could not produce bytes
    RandomnessSourceFailure,

    /// Invalid encoding (e.g., hex decode error)
    InvalidEncoding,
}

impl Error {
    /// True for the buffer-length rejections
    pub fn is_invalid_length(&self) -> bool {
        matches!(
            self,
            Error::InvalidPublicKey { .. }
                | Error::InvalidSecretKey { .. }
                | Error::InvalidCiphertext { .. }
                | Error::InvalidSignature { .. }
                | Error::InvalidSeed { .. }
        )
    }

    /// True for errors that indicate a broken environment rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InternalContractViolation(_) | Error::RandomnessSourceFailure
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPublicKey { expected, actual } => {
                write!(f, "Invalid public key length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidSecretKey { expected, actual } => {
                write!(f, "Invalid secret key length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidCiphertext { expected, actual } => {
                write!(f, "Invalid ciphertext length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidSignature { expected, actual } => {
                write!(f, "Invalid signature length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidSeed { expected, actual } => {
                write!(f, "Invalid seed length: expected {expected} bytes, got {actual}")
            }
            Error::MalformedPublicKey => write!(f, "Public key coefficients are not reduced"),
            Error::MalformedSecretKey => write!(f, "Secret key hash check failed"),
            Error::InvalidContext { length } => {
                write!(f, "Context string too long: {length} bytes (maximum 255)")
            }
            Error::InternalContractViolation(what) => {
                write!(f, "Internal contract violation: {what}")
            }
            Error::RandomnessSourceFailure => write!(f, "Secure random source unavailable"),
            Error::InvalidEncoding => write!(f, "Invalid encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
