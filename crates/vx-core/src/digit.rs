use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an integer cannot become a [`Digit`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitError {
    #[error("digit out of range: {0} (expected 0-9)")]
    OutOfRange(i64),
    /// Derived values never take 0; it is remapped to 9.
    #[error("harmonic value out of range: {0} (expected 1-9)")]
    NotHarmonic(i64),
}

/// A single decimal digit, `0..=9`.
///
/// Out-of-range integers are rejected at construction and never coerced.
/// Serializes as a bare integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    pub const NINE: Digit = Digit(9);

    /// Validate `value` as a digit.
    pub fn new(value: u8) -> Result<Self, DigitError> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(DigitError::OutOfRange(value as i64))
        }
    }

    /// Validate `value` as a derived result, which is always `1..=9`.
    pub fn nonzero(value: u8) -> Result<Self, DigitError> {
        if (1..=9).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DigitError::NotHarmonic(value as i64))
        }
    }

    /// Construct from a value already known to be `0..=9`.
    /// Only used with arithmetic that is reduced mod 9 or 10.
    pub(crate) const fn from_reduced(value: u8) -> Self {
        debug_assert!(value <= 9);
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// All ten digits in ascending order.
    pub fn all() -> impl Iterator<Item = Digit> {
        (0..=9u8).map(Digit)
    }
}

impl TryFrom<i64> for Digit {
    type Error = DigitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=9).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DigitError::OutOfRange(value))
        }
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for u32 {
    fn from(d: Digit) -> u32 {
        d.0 as u32
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
