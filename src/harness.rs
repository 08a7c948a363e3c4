//! The truncation pipeline shared by HOTP and TOTP.

use core::fmt;

use crate::checksum::checksum;
use crate::counter::MovingFactor;
use crate::digest::{HashAlgorithm, HmacProvider, RingHmac};
use crate::error::Result;
use crate::length::modulus;

/// Knobs for a single code generation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationOptions {
    /// HMAC hash function. Defaults to SHA-256.
    pub algorithm: HashAlgorithm,
    /// Number of decimal digits before any checksum. Defaults to 6.
    pub digits: u8,
    /// Append a Luhn check digit.
    pub add_checksum: bool,
    /// Fixed truncation offset; `None` (the default) uses dynamic truncation. Offsets that do not
    /// leave room for a four-byte window fall back to dynamic truncation as well.
    pub truncation_offset: Option<usize>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            digits: 6,
            add_checksum: false,
            truncation_offset: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_checksum(mut self, add_checksum: bool) -> Self {
        self.add_checksum = add_checksum;
        self
    }

    pub fn with_truncation_offset(mut self, offset: usize) -> Self {
        self.truncation_offset = Some(offset);
        self
    }
}

/// A generated one-time password.
///
/// Always exactly `digits` characters long (`digits + 1` with a checksum), left-padded with
/// zeros.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Code(String);

impl Code {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Computes a one-time password from raw key bytes and a moving factor.
///
/// # Errors
///
/// Fails with [`OtpError::UnreasonableDigitLength`](crate::OtpError::UnreasonableDigitLength)
/// if `options.digits` exceeds [`MAX_DIGITS`](crate::length::MAX_DIGITS). Nothing is hashed in
/// that case.
pub fn generate_otp(
    secret: &[u8],
    factor: &MovingFactor,
    options: &GenerationOptions,
) -> Result<Code> {
    generate_otp_with(&RingHmac, secret, factor, options)
}

/// [`generate_otp`], with digests computed by `provider`.
pub fn generate_otp_with<P: HmacProvider + ?Sized>(
    provider: &P,
    secret: &[u8],
    factor: &MovingFactor,
    options: &GenerationOptions,
) -> Result<Code> {
    let digits = options.digits;
    let power = modulus(digits)?;
    log::trace!(
        "generating {} digit code with {}{}",
        digits,
        options.algorithm,
        if options.add_checksum { " and checksum" } else { "" }
    );

    let digest = provider.sign(options.algorithm, secret, factor.as_ref())?;
    let offset = digest.offset(options.truncation_offset);
    let binary = digest.binary_code(offset);

    // the modulus always uses the digit count before the checksum digit
    let mut code = u64::from(binary) % power;
    let mut width = usize::from(digits);
    if options.add_checksum {
        code = code * 10 + u64::from(checksum(code, digits));
        width += 1;
    }
    Ok(Code(format!("{:0width$}", code, width = width)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Digest;
    use crate::error::OtpError;

    const SECRET: &[u8] = b"12345678901234567890";

    struct Fixed(&'static [u8]);

    impl HmacProvider for Fixed {
        fn sign(&self, _: HashAlgorithm, _: &[u8], _: &[u8]) -> Result<Digest> {
            Digest::from_slice(self.0)
        }
    }

    fn sha1(digits: u8) -> GenerationOptions {
        GenerationOptions::default()
            .with_algorithm(HashAlgorithm::Sha1)
            .with_digits(digits)
    }

    fn otp(counter: u64, options: &GenerationOptions) -> Result<Code> {
        generate_otp(SECRET, &MovingFactor::from(counter), options)
    }

    #[test]
    fn defaults() {
        let options = GenerationOptions::default();
        assert_eq!(options.algorithm, HashAlgorithm::Sha256);
        assert_eq!(options.digits, 6);
        assert!(!options.add_checksum);
        assert_eq!(options.truncation_offset, None);
        assert_eq!(otp(0, &options).unwrap(), "875740");
    }

    #[test]
    fn rfc_4226_appendix_d() {
        let expected = [
            "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583",
            "399871", "520489",
        ];
        for (counter, code) in expected.iter().enumerate() {
            assert_eq!(otp(counter as u64, &sha1(6)).unwrap(), *code);
        }
    }

    #[test]
    fn section_5_4_through_custom_provider() {
        let raw: &'static [u8] = &[
            0x1f, 0x86, 0x98, 0x69, 0x0e, 0x02, 0xca, 0x16, 0x61, 0x85, 0x50, 0xef, 0x7f, 0x19,
            0xda, 0x8e, 0x94, 0x5b, 0x55, 0x5a,
        ];
        let factor = MovingFactor::default();
        let code = generate_otp_with(&Fixed(raw), b"", &factor, &sha1(6)).unwrap();
        assert_eq!(code, "872921");
        let code = generate_otp_with(&Fixed(raw), b"", &factor, &sha1(10)).unwrap();
        assert_eq!(code, "1357872921");
    }

    #[test]
    fn malformed_provider_digest() {
        let factor = MovingFactor::default();
        let result = generate_otp_with(&Fixed(&[0; 8]), b"", &factor, &sha1(6));
        assert_eq!(result, Err(OtpError::MalformedDigest(8)));
    }

    #[test]
    fn zero_padding() {
        // 0082162583 at ten digits
        assert_eq!(otp(7, &sha1(8)).unwrap(), "82162583");
        assert_eq!(otp(7, &sha1(10)).unwrap(), "0082162583");
        assert_eq!(otp(7, &sha1(12)).unwrap(), "000082162583");
        assert_eq!(otp(7, &sha1(14)).unwrap().as_str().len(), 14);
    }

    #[test]
    fn digit_length_limits() {
        assert_eq!(otp(0, &sha1(15)), Err(OtpError::UnreasonableDigitLength(15)));
        assert_eq!(otp(0, &sha1(255)), Err(OtpError::UnreasonableDigitLength(255)));
        assert_eq!(otp(0, &sha1(1)).unwrap(), "4");
        assert_eq!(otp(0, &sha1(0)).unwrap(), "0");
    }

    #[test]
    fn checksum_digit() {
        let options = sha1(6).with_checksum(true);
        assert_eq!(otp(0, &options).unwrap(), "7552243");
        assert_eq!(otp(1, &options).unwrap(), "2870822");
        assert_eq!(otp(9, &options).unwrap(), "5204896");
        let options = sha1(8).with_checksum(true);
        assert_eq!(otp(0, &options).unwrap(), "847552247");
    }

    #[test]
    fn checksum_uses_pre_checksum_modulus() {
        let plain = otp(3, &sha1(6)).unwrap();
        let checked = otp(3, &sha1(6).with_checksum(true)).unwrap();
        assert_eq!(&checked.as_str()[..6], plain.as_str());
        assert_eq!(checked.as_str().len(), 7);
    }

    #[test]
    fn fixed_truncation_offset() {
        // HMAC-SHA1(secret, 0) = cc93cf18 508d9493 4c64b65d 8ba7667f b7cde4b0
        assert_eq!(otp(0, &sha1(6).with_truncation_offset(4)).unwrap(), "455891");
        assert_eq!(otp(0, &sha1(6).with_truncation_offset(15)).unwrap(), "752228");
        assert_eq!(otp(0, &sha1(10).with_truncation_offset(15)).unwrap(), "2142752228");
    }

    #[test]
    fn truncation_offset_boundary_uses_dynamic_offset() {
        // a SHA-1 digest is 20 bytes, so 16 is the first offset out of range
        assert_eq!(otp(0, &sha1(6).with_truncation_offset(16)).unwrap(), "755224");
        assert_eq!(otp(0, &sha1(6).with_truncation_offset(100)).unwrap(), "755224");
        assert_eq!(otp(0, &sha1(6).with_truncation_offset(16)), otp(0, &sha1(6)));
    }

    #[test]
    fn deterministic() {
        let options = sha1(8).with_checksum(true);
        assert_eq!(otp(42, &options), otp(42, &options));
    }

    #[test]
    fn code_conversions() {
        let code = otp(0, &sha1(6)).unwrap();
        assert_eq!(code.to_string(), "755224");
        assert_eq!(code.as_ref() as &str, "755224");
        assert_eq!(String::from(code.clone()), "755224");
        assert_eq!(code.into_string(), "755224");
    }
}
