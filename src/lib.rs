//! One-time passwords per [RFC 4226][4226] (HOTP) and [RFC 6238][6238] (TOTP).
//!
//! Every generator funnels into the same harness: HMAC the moving factor under the shared secret,
//! dynamically truncate the digest to 31 bits, reduce modulo `10^digits`, optionally append a
//! Luhn check digit, and left-pad with zeros.
//!
//! ```
//! use otpgen::{hotp_sha1, totp, GenerationOptions, HashAlgorithm, Secret, TotpOptions};
//!
//! # fn main() -> otpgen::Result<()> {
//! let secret = Secret::from(b"12345678901234567890");
//! assert_eq!(hotp_sha1(&secret, 0_u64, &GenerationOptions::default())?, "755224");
//!
//! let options = TotpOptions::default()
//!     .with_algorithm(HashAlgorithm::Sha1)
//!     .with_digits(8)
//!     .with_time(59);
//! assert_eq!(totp(&secret, &options)?, "94287082");
//! # Ok(())
//! # }
//! ```
//!
//! Everything here is a pure function of its inputs; the only ambient input is the system clock,
//! read by [`totp`] when no time is given.
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

pub mod checksum;
pub mod counter;
pub mod digest;
mod error;
pub mod harness;
pub mod hotp;
pub mod length;
pub mod secret;
pub mod totp;
pub mod uri;

pub use crate::checksum::checksum;
pub use crate::counter::{Counter, CounterBytes, MovingFactor};
pub use crate::digest::{hash, Digest, HashAlgorithm, HmacProvider, RingHmac};
pub use crate::error::{OtpError, Result};
pub use crate::harness::{generate_otp, generate_otp_with, Code, GenerationOptions};
pub use crate::hotp::{hotp, hotp_sha1, hotp_sha256, hotp_sha512};
pub use crate::secret::{Secret, SecretEncoding};
pub use crate::totp::{time_step, totp, totp_sha1, totp_sha256, totp_sha512, TotpOptions};
pub use crate::uri::{hotp_uri, otp_uri, totp_uri, OtpKind, UriOptions};
