//! Decimal time values
//!
//! Both values are produced fresh from a real time source on every query
//! and never mutated afterwards.

use std::fmt;

use crate::{WallTime, CUSTOM_SECONDS_PER_HOUR, CUSTOM_SECONDS_PER_MINUTE};

/// A point on the decimal clock face
///
/// INVARIANT: `hour == floor(fractional_hour)`,
/// `minute == floor(fractional_minute) % 100`,
/// `second == floor(fractional_second) % 100`.
#[derive(Clone, Copy, PartialEq)]
pub struct CustomInstant {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) fractional_hour: f64,
    pub(crate) fractional_minute: f64,
    pub(crate) fractional_second: f64,
    pub(crate) source: WallTime,
}

impl CustomInstant {
    /// Decimal hour, 0..=9
    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Decimal minute, 0..=99
    #[inline]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Decimal second, 0..=99
    #[inline]
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Continuous hour in [0, 10)
    #[inline]
    pub fn fractional_hour(&self) -> f64 {
        self.fractional_hour
    }

    /// Continuous minute within the hour, [0, 100)
    #[inline]
    pub fn fractional_minute(&self) -> f64 {
        self.fractional_minute
    }

    /// Continuous second within the minute, [0, 100)
    #[inline]
    pub fn fractional_second(&self) -> f64 {
        self.fractional_second
    }

    /// Progress through the current decimal second, [0, 1)
    #[inline]
    pub fn sub_second(&self) -> f64 {
        self.fractional_second - self.second as f64
    }

    /// Wall time this instant was computed from
    #[inline]
    pub fn source(&self) -> WallTime {
        self.source
    }

    /// Decimal seconds elapsed since midnight, [0, 100000)
    #[inline]
    pub fn custom_seconds_today(&self) -> f64 {
        self.fractional_hour * CUSTOM_SECONDS_PER_HOUR as f64
    }
}

impl fmt::Display for CustomInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl fmt::Debug for CustomInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decimal({} <- {:?}, s={:.3})",
            self, self.source, self.fractional_second
        )
    }
}

/// An elapsed span expressed in decimal units
///
/// Not bound to the clock face: `hour` has no upper limit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct CustomDuration {
    pub hour: u64,
    pub minute: u8,
    pub second: u8,
    pub milli: u16,
}

impl CustomDuration {
    pub const ZERO: CustomDuration = CustomDuration {
        hour: 0,
        minute: 0,
        second: 0,
        milli: 0,
    };

    /// Whole decimal seconds, ignoring the millisecond part
    pub fn total_custom_seconds(&self) -> u64 {
        self.hour * CUSTOM_SECONDS_PER_HOUR
            + self.minute as u64 * CUSTOM_SECONDS_PER_MINUTE
            + self.second as u64
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for CustomDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.milli
        )
    }
}

/// Analog hand positions in degrees, [0, 360)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}
