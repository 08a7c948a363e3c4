//! `otpauth://` provisioning URIs.
//!
//! The layout follows the de facto [Key Uri Format][kuf] understood by authenticator apps:
//!
//! ```text
//! otpauth://TYPE/ISSUER:SUBJECT?secret=S&issuer=I&algorithm=A&digits=D&counter=C
//! ```
//!
//! with `period=P` in place of `counter` for TOTP.
//!
//! [kuf]: https://github.com/google/google-authenticator/wiki/Key-Uri-Format

use core::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::digest::HashAlgorithm;
use crate::error::{OtpError, Result};
use crate::length::uri_digits;
use crate::totp::DEFAULT_INTERVAL;

// Reserved characters and whitespace, except `@`, which authenticator apps expect to see
// unescaped in account names.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Which generator a provisioning URI configures.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OtpKind {
    Hotp,
    Totp,
}

impl OtpKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            OtpKind::Hotp => "hotp",
            OtpKind::Totp => "totp",
        }
    }
}

impl fmt::Display for OtpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters advertised in a provisioning URI.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UriOptions {
    /// Defaults to SHA-1, the only algorithm some authenticator apps understand.
    pub algorithm: HashAlgorithm,
    /// One of 6, 8, or 10. Defaults to 6.
    pub digits: u8,
    /// Initial HOTP counter; ignored for TOTP.
    pub counter: u64,
    /// TOTP step length in seconds; ignored for HOTP.
    pub period: u64,
}

impl Default for UriOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha1,
            digits: 6,
            counter: 0,
            period: DEFAULT_INTERVAL,
        }
    }
}

impl UriOptions {
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_counter(mut self, counter: u64) -> Self {
        self.counter = counter;
        self
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }
}

/// Builds an `otpauth://` provisioning URI.
///
/// `secret` is placed in the URI as given (normally base32); it is only percent-encoded, never
/// decoded or validated. Query parameters always appear in the order `secret`, `issuer`,
/// `algorithm`, `digits`, then `counter` or `period`.
///
/// # Errors
///
/// Fails with [`OtpError::UnreasonableDigitLength`] unless `options.digits` is 6, 8, or 10.
pub fn otp_uri(
    kind: OtpKind,
    issuer: &str,
    subject: &str,
    secret: &str,
    options: &UriOptions,
) -> Result<String> {
    let digits = uri_digits(options.digits)?;
    let (last_key, last_value) = match kind {
        OtpKind::Hotp => ("counter", options.counter.to_string()),
        OtpKind::Totp => ("period", options.period.to_string()),
    };
    let params = [
        ("secret", secret.to_owned()),
        ("issuer", issuer.to_owned()),
        ("algorithm", options.algorithm.to_string()),
        ("digits", digits.to_string()),
        (last_key, last_value),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(format!(
        "otpauth://{}/{}:{}?{}",
        kind,
        encode(issuer),
        encode(subject),
        query
    ))
}

/// [`otp_uri`] for HOTP.
pub fn hotp_uri(issuer: &str, subject: &str, secret: &str, options: &UriOptions) -> Result<String> {
    otp_uri(OtpKind::Hotp, issuer, subject, secret, options)
}

/// [`otp_uri`] for TOTP.
pub fn totp_uri(issuer: &str, subject: &str, secret: &str, options: &UriOptions) -> Result<String> {
    otp_uri(OtpKind::Totp, issuer, subject, secret, options)
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}
