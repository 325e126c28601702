//! Error types for kyrax key encapsulation.

use core::fmt;
use core::num::NonZeroU32;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Broad category of an [`Error`].
///
/// Callers that only need to distinguish malformed input from a rejected key
/// or a failing randomness source can match on this instead of the full
/// error enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A seed, message, key or ciphertext buffer has the wrong size.
    InputLength,
    /// An encapsulation key failed canonical re-encoding.
    KeyValidation,
    /// The random-byte source reported a fault.
    Provider,
    /// An unknown parameter set was requested.
    Configuration,
}

/// Errors that can occur during key encapsulation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Key-derivation seed has the wrong length.
    InvalidSeedLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Explicit encapsulation message has the wrong length.
    InvalidMessageLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid ciphertext length.
    InvalidCiphertextLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// The encapsulation key contains a coefficient outside `[0, q)`.
    InvalidEncapsulationKey,

    /// The random-byte source failed.
    RandomnessFailure {
        /// Error code reported by the source, if any.
        code: Option<NonZeroU32>,
    },

    /// Parameter set not supported.
    UnsupportedParameterSet,
}

impl Error {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidSeedLength { .. }
            | Error::InvalidMessageLength { .. }
            | Error::InvalidKeyLength { .. }
            | Error::InvalidCiphertextLength { .. } => ErrorKind::InputLength,
            Error::InvalidEncapsulationKey => ErrorKind::KeyValidation,
            Error::RandomnessFailure { .. } => ErrorKind::Provider,
            Error::UnsupportedParameterSet => ErrorKind::Configuration,
        }
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Self {
        Error::RandomnessFailure { code: err.code() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSeedLength { expected, actual } => {
                write!(f, "seed must be {expected} bytes in length, got {actual}")
            }
            Error::InvalidMessageLength { expected, actual } => {
                write!(
                    f,
                    "message must be {expected} bytes in length, got {actual}"
                )
            }
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidCiphertextLength { expected, actual } => {
                write!(
                    f,
                    "invalid ciphertext length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidEncapsulationKey => write!(f, "invalid encapsulation key"),
            Error::RandomnessFailure { code: Some(code) } => {
                write!(f, "random source failure (code {code})")
            }
            Error::RandomnessFailure { code: None } => write!(f, "random source failure"),
            Error::UnsupportedParameterSet => write!(f, "unsupported parameter set"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
