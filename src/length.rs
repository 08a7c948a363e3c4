//! Code length restrictions.

use crate::error::{OtpError, Result};

// biggest entry is 10^14; the checksum adds one digit on top of that
const DIGITS_POWER: [u64; 15] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
];

/// Largest digit count the harness can truncate to.
pub const MAX_DIGITS: u8 = (DIGITS_POWER.len() - 1) as u8;

/// Digit counts allowed in `otpauth://` provisioning URIs.
///
/// [RFC 4226][4226] only requires "at least 6" digits, but authenticator apps in the wild accept
/// a much narrower set. The harness itself is more lenient, see [`modulus`].
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
pub const URI_DIGITS: [u8; 3] = [6, 8, 10];

/// Returns `10^digits`, the modulus used to reduce a truncated digest to `digits` decimal places.
///
/// # Errors
///
/// Fails with [`OtpError::UnreasonableDigitLength`] when `digits > MAX_DIGITS`.
pub fn modulus(digits: u8) -> Result<u64> {
    DIGITS_POWER
        .get(usize::from(digits))
        .copied()
        .ok_or(OtpError::UnreasonableDigitLength(digits))
}

/// Checks that `digits` is one of [`URI_DIGITS`].
pub(crate) fn uri_digits(digits: u8) -> Result<u8> {
    if URI_DIGITS.contains(&digits) {
        Ok(digits)
    } else {
        Err(OtpError::UnreasonableDigitLength(digits))
    }
}
