//! Moving factors.

/// HOTP counter value.
///
/// Implemented for `u64`, and for every [`CounterBytes`] type by reading its bytes as a
/// big-endian integer. [`hotp`](crate::hotp()) accepts any of them.
pub trait Counter {
    fn value(&self) -> u64;
}

/// Counter that is already laid out as the eight message bytes, as [`MovingFactor`] is.
pub trait CounterBytes {
    fn value(&self) -> [u8; 8];
}

impl CounterBytes for [u8; 8] {
    fn value(&self) -> [u8; 8] {
        *self
    }
}

impl<T: CounterBytes> Counter for T {
    fn value(&self) -> u64 {
        u64::from_be_bytes(CounterBytes::value(self))
    }
}

impl Counter for u64 {
    fn value(&self) -> u64 {
        *self
    }
}

/// The 8-byte message fed to the HMAC.
///
/// Always exactly eight bytes, big-endian, with smaller values zero-padded on the left. Signed
/// values (TOTP time steps before `t0`) use their two's-complement form.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MovingFactor([u8; 8]);

impl MovingFactor {
    /// Encodes an HOTP counter.
    pub fn from_counter<C: Counter>(counter: C) -> Self {
        Self(counter.value().to_be_bytes())
    }

    /// Encodes a TOTP time step.
    pub const fn from_time_step(step: i64) -> Self {
        Self(step.to_be_bytes())
    }

    pub const fn to_bytes(self) -> [u8; 8] {
        self.0
    }
}

impl CounterBytes for MovingFactor {
    fn value(&self) -> [u8; 8] {
        self.0
    }
}

impl AsRef<[u8]> for MovingFactor {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<u64> for MovingFactor {
    fn from(counter: u64) -> Self {
        Self::from_counter(counter)
    }
}

impl From<[u8; 8]> for MovingFactor {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}
