//! Shared secrets and their string encodings.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use data_encoding::{
    DecodeError, Encoding, BASE32_NOPAD, BASE64URL_NOPAD, BASE64_NOPAD, HEXLOWER_PERMISSIVE,
};

use crate::error::{OtpError, Result};

lazy_static::lazy_static! {
    // Unpadded base32 that ignores the unused low bits of the final symbol.
    static ref BASE32_LENIENT: Encoding = {
        let mut spec = BASE32_NOPAD.specification();
        spec.check_trailing_bits = false;
        spec.encoding().unwrap_or_else(|_| BASE32_NOPAD.clone())
    };
}

/// How a secret string maps to key bytes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SecretEncoding {
    /// RFC 4648 base32, the usual encoding in provisioning URIs. Case, whitespace, `=` padding
    /// and nonzero trailing bits are ignored.
    Base32,
    /// Hexadecimal, either case.
    Hex,
    /// Standard base64, padding optional.
    Base64,
    /// URL-safe base64, padding optional.
    Base64Url,
    /// The UTF-8 bytes of the string.
    Utf8,
    /// One byte per character; anything outside ASCII is rejected.
    Ascii,
    /// One byte per character; anything above U+00FF is rejected.
    Latin1,
}

impl SecretEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            SecretEncoding::Base32 => "base32",
            SecretEncoding::Hex => "hex",
            SecretEncoding::Base64 => "base64",
            SecretEncoding::Base64Url => "base64url",
            SecretEncoding::Utf8 => "utf8",
            SecretEncoding::Ascii => "ascii",
            SecretEncoding::Latin1 => "latin1",
        }
    }

    /// Decodes `input` to raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::Decode`] if `input` is not valid in this encoding.
    pub fn decode(self, input: &str) -> Result<Vec<u8>> {
        let decoded = match self {
            SecretEncoding::Base32 => {
                let clean: String = input
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '=')
                    .map(|c| c.to_ascii_uppercase())
                    .collect();
                self.binary(&BASE32_LENIENT, &clean)
            }
            SecretEncoding::Hex => self.binary(&HEXLOWER_PERMISSIVE, input),
            SecretEncoding::Base64 => self.binary(&BASE64_NOPAD, input.trim_end_matches('=')),
            SecretEncoding::Base64Url => {
                self.binary(&BASE64URL_NOPAD, input.trim_end_matches('='))
            }
            SecretEncoding::Utf8 => Ok(input.as_bytes().to_vec()),
            SecretEncoding::Ascii => self.narrow(input, 0x7f),
            SecretEncoding::Latin1 => self.narrow(input, 0xff),
        };
        if let Err(ref err) = decoded {
            log::debug!("failed to decode secret: {}", err);
        }
        decoded
    }

    fn binary(self, encoding: &Encoding, input: &str) -> Result<Vec<u8>> {
        encoding
            .decode(input.as_bytes())
            .map_err(|DecodeError { position, .. }| OtpError::Decode {
                encoding: self,
                position,
            })
    }

    fn narrow(self, input: &str, max: u32) -> Result<Vec<u8>> {
        input
            .chars()
            .enumerate()
            .map(|(position, c)| {
                let c = u32::from(c);
                if c <= max {
                    Ok(c as u8)
                } else {
                    Err(OtpError::Decode {
                        encoding: self,
                        position,
                    })
                }
            })
            .collect()
    }
}

impl fmt::Display for SecretEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretEncoding {
    type Err = OtpError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "base32" => Ok(SecretEncoding::Base32),
            "hex" => Ok(SecretEncoding::Hex),
            "base64" => Ok(SecretEncoding::Base64),
            "base64url" => Ok(SecretEncoding::Base64Url),
            "utf8" | "utf-8" => Ok(SecretEncoding::Utf8),
            "ascii" => Ok(SecretEncoding::Ascii),
            "latin1" | "binary" => Ok(SecretEncoding::Latin1),
            _ => Err(OtpError::UnsupportedEncoding(name.to_owned())),
        }
    }
}

/// Shared secret.
///
/// As per [RFC 4226][4226], "each HOTP generator has a different and unique secret." A secret is
/// either raw key bytes or a string still to be decoded; either way it is resolved to bytes once,
/// before any hashing happens.
///
/// [4226]: https://tools.ietf.org/html/rfc4226
#[derive(Clone, Eq, PartialEq)]
pub enum Secret {
    Bytes(Vec<u8>),
    Encoded(String, SecretEncoding),
}

impl Secret {
    /// A base32 secret, as found in `otpauth://` URIs.
    pub fn base32(encoded: impl Into<String>) -> Self {
        Secret::Encoded(encoded.into(), SecretEncoding::Base32)
    }

    pub fn encoded(encoded: impl Into<String>, encoding: SecretEncoding) -> Self {
        Secret::Encoded(encoded.into(), encoding)
    }

    /// Resolves the secret to key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::Decode`] if an encoded secret is malformed.
    pub fn to_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Secret::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Secret::Encoded(encoded, encoding) => encoding.decode(encoded).map(Cow::Owned),
        }
    }
}

// Never print key material.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Bytes(bytes) => write!(f, "Secret::Bytes([REDACTED; {}])", bytes.len()),
            Secret::Encoded(_, encoding) => write!(f, "Secret::Encoded([REDACTED], {})", encoding),
        }
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Secret::Bytes(bytes)
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Secret::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Secret {
    fn from(bytes: &[u8; N]) -> Self {
        Secret::Bytes(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII: &[u8] = b"12345678901234567890";

    fn decode(input: &str, encoding: SecretEncoding) -> Result<Vec<u8>> {
        Secret::encoded(input, encoding).to_bytes().map(Cow::into_owned)
    }

    #[test]
    fn bytes_pass_through() {
        let secret = Secret::from(ASCII);
        assert_eq!(&*secret.to_bytes().unwrap(), ASCII);
        assert!(matches!(secret.to_bytes().unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn base32() {
        assert_eq!(
            decode("JBSWY3DPEHPK3PXP", SecretEncoding::Base32).unwrap(),
            b"Hello!\xde\xad\xbe\xef"
        );
        assert_eq!(
            decode("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", SecretEncoding::Base32).unwrap(),
            ASCII
        );
    }

    #[test]
    fn base32_is_lenient_about_formatting() {
        let expected = decode("JBSWY3DPEHPK3PXP", SecretEncoding::Base32).unwrap();
        assert_eq!(decode("jbsw y3dp ehpk 3pxp", SecretEncoding::Base32).unwrap(), expected);
        assert_eq!(decode("JBSWY3DPEHPK3PXP======", SecretEncoding::Base32).unwrap(), expected);
    }

    #[test]
    fn base32_rejects_bad_alphabet() {
        assert!(matches!(
            decode("JBSWY3DPEHPK3PX1", SecretEncoding::Base32),
            Err(OtpError::Decode {
                encoding: SecretEncoding::Base32,
                ..
            })
        ));
        assert!(decode("JBSWY3DPE", SecretEncoding::Base32).is_err());
    }

    #[test]
    fn base32_ignores_trailing_bits() {
        assert_eq!(decode("MZXW6YTBOI", SecretEncoding::Base32).unwrap(), b"foobar");
        assert_eq!(decode("MZXW6YTBOJ", SecretEncoding::Base32).unwrap(), b"foobar");
        assert_eq!(
            decode("JBSWY3DPEF", SecretEncoding::Base32).unwrap(),
            decode("JBSWY3DPEE", SecretEncoding::Base32).unwrap()
        );
        assert_eq!(SecretEncoding::Base32.decode("mzxw6ytboj").unwrap(), b"foobar");
    }

    #[test]
    fn hex_and_base64() {
        assert_eq!(
            decode("3132333435363738393031323334353637383930", SecretEncoding::Hex).unwrap(),
            ASCII
        );
        assert_eq!(
            decode("3132333435363738393031323334353637383930", SecretEncoding::Hex).unwrap(),
            decode("3132333435363738393031323334353637383930".to_uppercase().as_str(), SecretEncoding::Hex).unwrap()
        );
        assert_eq!(decode("MTIzNDU2Nzg5MDEyMzQ1Njc4OTA=", SecretEncoding::Base64).unwrap(), ASCII);
        assert_eq!(decode("MTIzNDU2Nzg5MDEyMzQ1Njc4OTA", SecretEncoding::Base64Url).unwrap(), ASCII);
        assert!(decode("zz", SecretEncoding::Hex).is_err());
    }

    #[test]
    fn text_encodings() {
        assert_eq!(decode("12345678901234567890", SecretEncoding::Utf8).unwrap(), ASCII);
        assert_eq!(decode("12345678901234567890", SecretEncoding::Ascii).unwrap(), ASCII);
        assert_eq!(decode("é", SecretEncoding::Utf8).unwrap(), vec![0xc3, 0xa9]);
        assert_eq!(decode("é", SecretEncoding::Latin1).unwrap(), vec![0xe9]);
        assert_eq!(
            decode("aé", SecretEncoding::Ascii),
            Err(OtpError::Decode {
                encoding: SecretEncoding::Ascii,
                position: 1
            })
        );
        assert!(decode("€", SecretEncoding::Latin1).is_err());
    }

    #[test]
    fn encoding_names() {
        assert_eq!("BASE32".parse::<SecretEncoding>(), Ok(SecretEncoding::Base32));
        assert_eq!("utf-8".parse::<SecretEncoding>(), Ok(SecretEncoding::Utf8));
        assert_eq!("binary".parse::<SecretEncoding>(), Ok(SecretEncoding::Latin1));
        assert_eq!(
            "ebcdic".parse::<SecretEncoding>(),
            Err(OtpError::UnsupportedEncoding("ebcdic".to_owned()))
        );
    }

    #[test]
    fn debug_hides_key_material() {
        let rendered = format!("{:?}", Secret::base32("JBSWY3DPEHPK3PXP"));
        assert!(!rendered.contains("JBSW"));
        let rendered = format!("{:?}", Secret::from(ASCII));
        assert!(!rendered.contains("49"));
    }
}
