//! Time-based one-time passwords ([RFC 6238][6238]).
//!
//! TOTP is HOTP with the counter replaced by the number of `interval`-second steps elapsed since
//! `t0`.
//!
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use std::time::{SystemTime, UNIX_EPOCH};

use crate::counter::MovingFactor;
use crate::digest::HashAlgorithm;
use crate::error::{OtpError, Result};
use crate::harness::{generate_otp, Code, GenerationOptions};
use crate::secret::Secret;

/// Default step length, in seconds.
pub const DEFAULT_INTERVAL: u64 = 30;

/// Options for TOTP generation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TotpOptions {
    /// Unix time in seconds. `None` (the default) reads the system clock.
    pub time: Option<i64>,
    /// Unix time at which steps start being counted. Defaults to 0.
    pub t0: i64,
    /// Step length in seconds. Defaults to 30.
    pub interval: u64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub generation: GenerationOptions,
}

impl Default for TotpOptions {
    fn default() -> Self {
        Self {
            time: None,
            t0: 0,
            interval: DEFAULT_INTERVAL,
            generation: GenerationOptions::default(),
        }
    }
}

impl TotpOptions {
    pub fn with_time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the time from fractional seconds, truncating toward zero.
    ///
    /// Out-of-range values saturate at the `i64` bounds and NaN maps to zero; large timestamps are
    /// never wrapped to 32 bits.
    pub fn with_fractional_time(mut self, time: f64) -> Self {
        self.time = Some(time.trunc() as i64);
        self
    }

    pub fn with_t0(mut self, t0: i64) -> Self {
        self.t0 = t0;
        self
    }

    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.generation.algorithm = algorithm;
        self
    }

    pub fn with_digits(mut self, digits: u8) -> Self {
        self.generation.digits = digits;
        self
    }

    pub fn with_checksum(mut self, add_checksum: bool) -> Self {
        self.generation.add_checksum = add_checksum;
        self
    }

    pub fn with_truncation_offset(mut self, offset: usize) -> Self {
        self.generation.truncation_offset = Some(offset);
        self
    }

    /// The time step these options resolve to, reading the clock if no time is set.
    pub fn time_step(&self) -> Result<i64> {
        let time = self.time.unwrap_or_else(unix_time);
        time_step(time, self.t0, self.interval)
    }
}

/// Current Unix time in whole seconds.
///
/// Clocks set before 1970 yield negative values.
pub fn unix_time() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}

/// Number of `interval`-second steps between `t0` and `time`, rounded toward negative infinity.
///
/// # Errors
///
/// A zero `interval` fails with [`OtpError::InvalidInterval`]; a step count that does not fit in
/// an `i64` fails with [`OtpError::TimeOutOfRange`].
pub fn time_step(time: i64, t0: i64, interval: u64) -> Result<i64> {
    if interval == 0 {
        return Err(OtpError::InvalidInterval);
    }
    let elapsed = i128::from(time) - i128::from(t0);
    let step = elapsed.div_euclid(i128::from(interval));
    i64::try_from(step).map_err(|_| OtpError::TimeOutOfRange)
}

/// Computes a TOTP code.
///
/// # Errors
///
/// This function will return an error if the secret cannot be decoded, the interval is zero, or
/// the digit count is larger than the truncation table allows.
pub fn totp(secret: &Secret, options: &TotpOptions) -> Result<Code> {
    let step = options.time_step()?;
    log::trace!("totp step {} ({}s interval from t0 {})", step, options.interval, options.t0);
    let factor = MovingFactor::from_time_step(step);
    let key = secret.to_bytes()?;
    generate_otp(&key, &factor, &options.generation)
}

/// [`totp`] with HMAC-SHA1. `options.generation.algorithm` is ignored.
pub fn totp_sha1(secret: &Secret, options: &TotpOptions) -> Result<Code> {
    totp(secret, &options.with_algorithm(HashAlgorithm::Sha1))
}

/// [`totp`] with HMAC-SHA256. `options.generation.algorithm` is ignored.
pub fn totp_sha256(secret: &Secret, options: &TotpOptions) -> Result<Code> {
    totp(secret, &options.with_algorithm(HashAlgorithm::Sha256))
}

/// [`totp`] with HMAC-SHA512. `options.generation.algorithm` is ignored.
pub fn totp_sha512(secret: &Secret, options: &TotpOptions) -> Result<Code> {
    totp(secret, &options.with_algorithm(HashAlgorithm::Sha512))
}
