//! Error types for kyvern operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during KEM operations.
///
/// Decapsulation of a tampered or mismatched ciphertext is *not* an error:
/// it yields a pseudorandom shared secret (implicit rejection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
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

    /// Invalid custom message length.
    InvalidMessageLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// The random source failed to produce output.
    RandomnessFailure,

    /// The requested backend is not compiled in or not supported by this CPU.
    BackendUnavailable {
        /// Name of the requested backend.
        backend: &'static str,
    },

    /// A configuration value could not be understood.
    InvalidConfiguration,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidCiphertextLength { expected, actual } => {
                write!(
                    f,
                    "invalid ciphertext length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidMessageLength { expected, actual } => {
                write!(
                    f,
                    "invalid message length: expected {expected}, got {actual}"
                )
            }
            Error::RandomnessFailure => write!(f, "random source failure"),
            Error::BackendUnavailable { backend } => {
                write!(f, "backend `{backend}` is not available on this platform")
            }
            Error::InvalidConfiguration => write!(f, "invalid backend configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Self {
        Error::RandomnessFailure
    }
}
