//! Error type shared by every generator in this crate.

use thiserror::Error;

use crate::secret::SecretEncoding;

/// OTP error type.
///
/// Every variant describes an input validation failure. None of them are transient, so retrying
/// the same call will always fail the same way.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum OtpError {
    /// The requested number of digits has no entry in the power-of-ten table, or (for
    /// provisioning URIs) is not one of 6, 8, or 10.
    #[error("unreasonable digit length: {0}")]
    UnreasonableDigitLength(u8),
    /// The secret string is not valid in its declared encoding.
    #[error("malformed {encoding} secret at position {position}")]
    Decode {
        /// Encoding the secret was declared to be in.
        encoding: SecretEncoding,
        /// Index of the offending character in the (normalized) input.
        position: usize,
    },
    /// The HMAC algorithm name is not one of SHA-1, SHA-256, or SHA-512.
    #[error("unsupported HMAC algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The secret encoding name is not recognized.
    #[error("unsupported secret encoding: {0}")]
    UnsupportedEncoding(String),
    /// The digest produced by an HMAC provider was of unusable length.
    #[error("malformed HMAC digest of {0} bytes")]
    MalformedDigest(usize),
    /// A TOTP time step of zero seconds was requested.
    #[error("TOTP interval must be at least one second")]
    InvalidInterval,
    /// The TOTP time step does not fit in a signed 64-bit moving factor.
    #[error("TOTP time step out of range")]
    TimeOutOfRange,
}

pub type Result<T> = core::result::Result<T, OtpError>;
