//! Time conversion module
//!
//! Pure functions mapping real time onto decimal units. Nothing here reads a
//! clock; callers pass in the real time they sampled.

use std::time::Duration;

use crate::{
    CustomDuration, CustomInstant, DecimaError, DecimaResult, HandAngles, WallTime,
    CUSTOM_HOURS_PER_DAY, CUSTOM_SECONDS_PER_DAY, CUSTOM_SECONDS_PER_HOUR,
    CUSTOM_SECONDS_PER_MINUTE, CUSTOM_SECOND_MILLIS, REAL_SECONDS_PER_DAY,
};

/// Decimal milliseconds in one decimal hour
const CUSTOM_MILLIS_PER_HOUR: u128 = CUSTOM_SECONDS_PER_HOUR as u128 * 1000;

/// Map a local wall-clock time onto the decimal clock face
pub fn instant_from_real_time(now: WallTime) -> CustomInstant {
    instant_at(now.seconds_since_midnight(), now)
}

/// Map a count of real seconds since local midnight onto the decimal clock face.
///
/// The input domain is one day, `[0, 86400)`; larger values wrap, so exactly
/// 86400 is the next midnight (0:00:00).
pub fn instant_from_seconds(seconds_since_midnight: f64) -> DecimaResult<CustomInstant> {
    let source = WallTime::from_seconds_since_midnight(seconds_since_midnight)?;
    Ok(instant_at(seconds_since_midnight, source))
}

fn instant_at(seconds_since_midnight: f64, source: WallTime) -> CustomInstant {
    // Multiply before dividing so that round inputs (e.g. noon) stay exact
    let custom_today = (seconds_since_midnight * CUSTOM_SECONDS_PER_DAY as f64
        / REAL_SECONDS_PER_DAY as f64)
        .rem_euclid(CUSTOM_SECONDS_PER_DAY as f64);

    let fractional_hour = custom_today / CUSTOM_SECONDS_PER_HOUR as f64;
    let fractional_minute =
        (custom_today % CUSTOM_SECONDS_PER_HOUR as f64) / CUSTOM_SECONDS_PER_MINUTE as f64;
    let fractional_second = custom_today % CUSTOM_SECONDS_PER_MINUTE as f64;

    CustomInstant {
        hour: (fractional_hour.floor() as u64).min(CUSTOM_HOURS_PER_DAY - 1) as u8,
        minute: (fractional_minute.floor() as u64 % CUSTOM_SECONDS_PER_MINUTE) as u8,
        second: (fractional_second.floor() as u64 % CUSTOM_SECONDS_PER_MINUTE) as u8,
        fractional_hour,
        fractional_minute,
        fractional_second,
        source,
    }
}

/// Express an elapsed real duration (milliseconds) in decimal units.
///
/// Negative input is rejected; callers clamp before calling.
pub fn duration_from_elapsed_millis(ms: i64) -> DecimaResult<CustomDuration> {
    if ms < 0 {
        return Err(DecimaError::InvalidArgument(format!(
            "elapsed milliseconds must be non-negative, got {ms}"
        )));
    }
    Ok(duration_from_millis(ms as u128))
}

/// Express an elapsed real duration in decimal units
pub fn duration_from_elapsed(elapsed: Duration) -> CustomDuration {
    duration_from_millis(elapsed.as_millis())
}

fn duration_from_millis(ms: u128) -> CustomDuration {
    // floor(custom seconds * 1000), computed in integers
    let custom_millis = ms * 1000 / CUSTOM_SECOND_MILLIS as u128;
    let hour = custom_millis / CUSTOM_MILLIS_PER_HOUR;

    CustomDuration {
        hour: hour.min(u64::MAX as u128) as u64,
        minute: (custom_millis / 100_000 % 100) as u8,
        second: (custom_millis / 1000 % 100) as u8,
        milli: (custom_millis % 1000) as u16,
    }
}

/// Real milliseconds spanned by a decimal `h:m:s`.
///
/// Inverse of the scaling relation: `(h*10000 + m*100 + s) / SCALE * 1000`,
/// which is exactly `total * 864`.
pub fn real_millis_from_custom(hour: u64, minute: u64, second: u64) -> u64 {
    hour.saturating_mul(CUSTOM_SECONDS_PER_HOUR)
        .saturating_add(minute.saturating_mul(CUSTOM_SECONDS_PER_MINUTE))
        .saturating_add(second)
        .saturating_mul(CUSTOM_SECOND_MILLIS)
}

/// Analog hand positions for an instant.
///
/// The second hand uses the integer second so it steps with the digital
/// display; hour and minute hands sweep.
pub fn hand_angles(instant: &CustomInstant) -> HandAngles {
    HandAngles {
        hour: instant.fractional_hour / CUSTOM_HOURS_PER_DAY as f64 * 360.0,
        minute: instant.fractional_minute / CUSTOM_SECONDS_PER_MINUTE as f64 * 360.0,
        second: instant.second as f64 / CUSTOM_SECONDS_PER_MINUTE as f64 * 360.0,
    }
}
