//! Unit constants shared by the conversion module and the controllers
//!
//! A decimal day has 10 hours of 100 minutes of 100 seconds, so one
//! decimal second lasts 86400 / 100000 = 0.864 real seconds.

/// Real seconds in one day
pub const REAL_SECONDS_PER_DAY: u64 = 86_400;

/// Decimal seconds in one day
pub const CUSTOM_SECONDS_PER_DAY: u64 = 100_000;

/// Decimal seconds in one decimal hour
pub const CUSTOM_SECONDS_PER_HOUR: u64 = 10_000;

/// Decimal seconds in one decimal minute
pub const CUSTOM_SECONDS_PER_MINUTE: u64 = 100;

/// Decimal hours in one day
pub const CUSTOM_HOURS_PER_DAY: u64 = 10;

/// Real milliseconds in one decimal second
pub const CUSTOM_SECOND_MILLIS: u64 = 864;

/// Decimal seconds per real second (100000 / 86400 ≈ 1.1574)
pub const SCALE: f64 = CUSTOM_SECONDS_PER_DAY as f64 / REAL_SECONDS_PER_DAY as f64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_second_matches_scale() {
        let from_scale = 1000.0 / SCALE;
        assert!((from_scale - CUSTOM_SECOND_MILLIS as f64).abs() < 1e-9);
        assert_eq!(
            CUSTOM_SECONDS_PER_DAY * CUSTOM_SECOND_MILLIS,
            REAL_SECONDS_PER_DAY * 1000
        );
    }
}
