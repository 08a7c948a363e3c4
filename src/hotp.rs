//! HMAC-based one-time passwords ([RFC 4226][4226]).
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226

use crate::counter::{Counter, MovingFactor};
use crate::digest::HashAlgorithm;
use crate::error::Result;
use crate::harness::{generate_otp, Code, GenerationOptions};
use crate::secret::Secret;

/// Computes an HOTP code for the given secret and counter value.
///
/// The counter is encoded as an eight-byte big-endian integer. Every option is honored as given,
/// so the hash function is SHA-256 unless `options` says otherwise; see [`hotp_sha1`] for the
/// RFC 4226 flavor.
///
/// # Errors
///
/// This function will return an error if the secret cannot be decoded or if the digit count is
/// larger than the truncation table allows.
pub fn hotp<C: Counter>(secret: &Secret, counter: C, options: &GenerationOptions) -> Result<Code> {
    let factor = MovingFactor::from_counter(counter);
    let key = secret.to_bytes()?;
    generate_otp(&key, &factor, options)
}

/// [`hotp`] with HMAC-SHA1, as prescribed by RFC 4226. `options.algorithm` is ignored.
pub fn hotp_sha1<C: Counter>(
    secret: &Secret,
    counter: C,
    options: &GenerationOptions,
) -> Result<Code> {
    hotp(secret, counter, &options.with_algorithm(HashAlgorithm::Sha1))
}

/// [`hotp`] with HMAC-SHA256. `options.algorithm` is ignored.
pub fn hotp_sha256<C: Counter>(
    secret: &Secret,
    counter: C,
    options: &GenerationOptions,
) -> Result<Code> {
    hotp(secret, counter, &options.with_algorithm(HashAlgorithm::Sha256))
}

/// [`hotp`] with HMAC-SHA512. `options.algorithm` is ignored.
pub fn hotp_sha512<C: Counter>(
    secret: &Secret,
    counter: C,
    options: &GenerationOptions,
) -> Result<Code> {
    hotp(secret, counter, &options.with_algorithm(HashAlgorithm::Sha512))
}
