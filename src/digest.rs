//! HMAC digest types and traits.

use core::fmt;
use core::str::FromStr;

use ring::hmac::{self, Key as HmacKey, Tag, HMAC_SHA1_FOR_LEGACY_USE_ONLY as HMAC_SHA1};

use crate::error::{OtpError, Result};

const MIN_DIGEST_BYTES: usize = 20;
const MAX_DIGEST_BYTES: usize = 64;

/// HMAC hash function used to key the digest.
///
/// [RFC 4226][4226] prescribes HMAC-SHA1. [RFC 6238][6238] extends TOTP to HMAC-SHA256 and
/// HMAC-SHA512, which are the only other algorithms accepted here.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Length in bytes of the HMAC output.
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Lowercase name, as used in `otpauth://` URIs.
    pub const fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    fn ring(self) -> hmac::Algorithm {
        match self {
            HashAlgorithm::Sha1 => HMAC_SHA1,
            HashAlgorithm::Sha256 => hmac::HMAC_SHA256,
            HashAlgorithm::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = OtpError;

    /// Parses `sha1`, `sha256`, or `sha512` (case-insensitive, with or without a dash).
    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            _ => Err(OtpError::UnsupportedAlgorithm(name.to_owned())),
        }
    }
}

/// HMAC output, between 20 and 64 bytes long.
#[derive(Clone, Copy)]
pub struct Digest {
    bytes: [u8; MAX_DIGEST_BYTES],
    len: usize,
}

impl Digest {
    /// Copies a raw HMAC output.
    ///
    /// # Errors
    ///
    /// Digests shorter than an HMAC-SHA1 output or longer than an HMAC-SHA512 output are rejected
    /// with [`OtpError::MalformedDigest`]. Anything shorter than 19 bytes could index out of
    /// bounds during dynamic truncation.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        let len = raw.len();
        if !(MIN_DIGEST_BYTES..=MAX_DIGEST_BYTES).contains(&len) {
            return Err(OtpError::MalformedDigest(len));
        }
        let mut bytes = [0; MAX_DIGEST_BYTES];
        bytes[..len].copy_from_slice(raw);
        Ok(Self { bytes, len })
    }

    /// Picks the offset of the four-byte window to extract.
    ///
    /// An explicit `truncation_offset` wins only when the whole window fits strictly inside the
    /// digest (`offset < len - 4`); otherwise this is "dynamic truncation" from
    /// [RFC 4226 section 5.3][5.3], using the four lowest-order bits of the last byte.
    ///
    /// [5.3]: https://datatracker.ietf.org/doc/html/rfc4226#section-5.3
    pub fn offset(&self, truncation_offset: Option<usize>) -> usize {
        let digest = self.as_ref();
        let dynamic = usize::from(digest[self.len - 1] & 0xf);
        match truncation_offset {
            Some(offset) if offset < self.len - 4 => offset,
            Some(offset) => {
                log::debug!(
                    "truncation offset {} out of range for {} byte digest, using dynamic offset {}",
                    offset,
                    self.len,
                    dynamic
                );
                dynamic
            }
            None => dynamic,
        }
    }

    /// Reads the 31-bit big-endian value at `offset`.
    ///
    /// The leading bit is stripped to remove signed/unsigned ambiguity.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4` exceeds the digest length. Offsets returned by [`Digest::offset`]
    /// always fit.
    pub fn binary_code(&self, offset: usize) -> u32 {
        let o = offset;
        let hs = self.as_ref();
        u32::from_be_bytes([hs[o], hs[o + 1], hs[o + 2], hs[o + 3]]) & 0x7fff_ffff
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.as_ref()).finish()
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl Eq for Digest {}

impl TryFrom<Tag> for Digest {
    type Error = OtpError;
    fn try_from(tag: Tag) -> Result<Self> {
        Self::from_slice(tag.as_ref())
    }
}

/// Source of HMAC digests.
///
/// The harness only ever needs `HMAC(algorithm, key, message)`. Implement this trait to plug in a
/// different backend (a hardware token, for example); [`RingHmac`] is used everywhere else.
pub trait HmacProvider {
    /// Computes the HMAC of `message` under `key`.
    fn sign(&self, algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Digest>;
}

/// [`HmacProvider`] backed by `ring`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RingHmac;

impl HmacProvider for RingHmac {
    fn sign(&self, algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Digest> {
        let key = HmacKey::new(algorithm.ring(), key);
        Digest::try_from(hmac::sign(&key, message))
    }
}

/// Computes `HMAC(algorithm, key, message)` with [`RingHmac`].
pub fn hash(algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Digest> {
    RingHmac.sign(algorithm, key, message)
}
