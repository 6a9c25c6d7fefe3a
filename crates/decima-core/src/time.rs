//! Real time primitives for Decima
//!
//! Decima reads two kinds of real time:
//! - Wall time: local time of day, drives the decimal clock face
//! - Mono time: monotonic timestamps, drive the stopwatch and the timer

use std::ops::{Add, Sub};
use std::time::Duration;

use crate::{DecimaError, DecimaResult, REAL_SECONDS_PER_DAY};

const MILLIS_PER_DAY: u64 = REAL_SECONDS_PER_DAY * 1000;

/// Local wall-clock time of day, decomposed since local midnight
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
}

impl WallTime {
    pub const MIDNIGHT: WallTime = WallTime {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
    };

    /// Build a wall time from its components.
    ///
    /// `second` may be 60 so that a leap-second decomposition from the OS is
    /// accepted; conversion folds it into the next day like midnight itself.
    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> DecimaResult<Self> {
        check_field("hour", hour as u32, 23)?;
        check_field("minute", minute as u32, 59)?;
        check_field("second", second as u32, 60)?;
        check_field("millisecond", millisecond as u32, 999)?;
        Ok(WallTime {
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Decompose a count of seconds since midnight.
    /// Values of a full day or more wrap around.
    pub fn from_seconds_since_midnight(seconds: f64) -> DecimaResult<Self> {
        if !seconds.is_finite() {
            return Err(DecimaError::NonFinite("seconds since midnight"));
        }
        if seconds < 0.0 {
            return Err(DecimaError::InvalidArgument(format!(
                "seconds since midnight must be non-negative, got {seconds}"
            )));
        }
        Ok(Self::from_millis_of_day((seconds * 1000.0).floor() as u64))
    }

    /// Decompose a count of milliseconds since midnight, wrapping at a full day
    pub fn from_millis_of_day(total_ms: u64) -> Self {
        let total_ms = total_ms % MILLIS_PER_DAY;
        WallTime {
            hour: (total_ms / 3_600_000) as u8,
            minute: (total_ms / 60_000 % 60) as u8,
            second: (total_ms / 1000 % 60) as u8,
            millisecond: (total_ms % 1000) as u16,
        }
    }

    #[inline]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[inline]
    pub fn minute(self) -> u8 {
        self.minute
    }

    #[inline]
    pub fn second(self) -> u8 {
        self.second
    }

    #[inline]
    pub fn millisecond(self) -> u16 {
        self.millisecond
    }

    /// `h*3600 + m*60 + s + ms/1000`
    #[inline]
    pub fn seconds_since_midnight(self) -> f64 {
        self.hour as f64 * 3600.0
            + self.minute as f64 * 60.0
            + self.second as f64
            + self.millisecond as f64 / 1000.0
    }

    /// Advance by a duration, wrapping at midnight
    pub fn wrapping_add(self, duration: Duration) -> Self {
        let now_ms = (self.seconds_since_midnight() * 1000.0).round() as u64;
        let add_ms = (duration.as_millis() % MILLIS_PER_DAY as u128) as u64;
        Self::from_millis_of_day(now_ms + add_ms)
    }
}

fn check_field(field: &'static str, value: u32, max: u32) -> DecimaResult<()> {
    if value > max {
        return Err(DecimaError::FieldOutOfRange { field, value, max });
    }
    Ok(())
}

impl std::fmt::Debug for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "wall({:02}:{:02}:{:02}.{:03})",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Monotonic real time, microseconds since an arbitrary origin
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MonoTime(pub u64);

impl MonoTime {
    pub const ZERO: MonoTime = MonoTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        MonoTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        MonoTime(millis * 1000)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        MonoTime(self.0.saturating_add(micros_saturating(duration)))
    }

    #[inline]
    pub fn saturating_sub(self, duration: Duration) -> Self {
        MonoTime(self.0.saturating_sub(micros_saturating(duration)))
    }
}

/// Whole microseconds in `duration`, clamped to `u64::MAX`
#[inline]
fn micros_saturating(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

impl Add<Duration> for MonoTime {
    type Output = MonoTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<MonoTime> for MonoTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: MonoTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for MonoTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mono({:.3}ms)", self.0 as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_time_field_validation() {
        assert!(WallTime::new(23, 59, 59, 999).is_ok());
        assert!(WallTime::new(23, 59, 60, 0).is_ok());
        assert_eq!(
            WallTime::new(24, 0, 0, 0),
            Err(DecimaError::FieldOutOfRange {
                field: "hour",
                value: 24,
                max: 23
            })
        );
        assert!(WallTime::new(0, 60, 0, 0).is_err());
        assert!(WallTime::new(0, 0, 0, 1000).is_err());
    }

    #[test]
    fn test_wall_time_seconds_roundtrip() {
        let t = WallTime::new(12, 34, 56, 789).unwrap();
        let secs = t.seconds_since_midnight();
        assert!((secs - 45296.789).abs() < 1e-9);

        let back = WallTime::from_seconds_since_midnight(secs).unwrap();
        assert_eq!(back.hour(), 12);
        assert_eq!(back.minute(), 34);
        assert_eq!(back.second(), 56);
        // Float decomposition may land one millisecond low
        assert!(back.millisecond() >= 788);
    }

    #[test]
    fn test_wall_time_from_seconds_rejects_bad_input() {
        assert!(WallTime::from_seconds_since_midnight(-1.0).is_err());
        assert_eq!(
            WallTime::from_seconds_since_midnight(f64::NAN),
            Err(DecimaError::NonFinite("seconds since midnight"))
        );
        assert!(WallTime::from_seconds_since_midnight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_wall_time_wraps_at_midnight() {
        assert_eq!(
            WallTime::from_seconds_since_midnight(86_400.0).unwrap(),
            WallTime::MIDNIGHT
        );

        let late = WallTime::new(23, 59, 59, 500).unwrap();
        let next = late.wrapping_add(Duration::from_millis(700));
        assert_eq!(next, WallTime::new(0, 0, 0, 200).unwrap());
    }

    #[test]
    fn test_mono_time_arithmetic() {
        let t1 = MonoTime::from_millis(100);
        let t2 = t1 + Duration::from_millis(10);

        assert!(t2 > t1);
        assert_eq!(t2 - t1, Duration::from_millis(10));
        // Subtraction never goes negative
        assert_eq!(t1 - t2, Duration::ZERO);
        assert_eq!(t1.saturating_sub(Duration::from_secs(1)), MonoTime::ZERO);
    }

    #[test]
    fn test_mono_time_saturates_on_huge_durations() {
        let t = MonoTime::from_millis(5);
        // More microseconds than fit in a u64
        let huge = Duration::from_millis(u64::MAX);

        assert_eq!(t + huge, MonoTime(u64::MAX));
        assert_eq!(t.saturating_sub(huge), MonoTime::ZERO);
        assert_eq!((t + huge) - t, Duration::from_micros(u64::MAX - 5_000));
    }
}
