//! Clock sources for the Decima time engine

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Timelike;
use parking_lot::Mutex;

use decima_core::{MonoTime, WallTime};

/// Real time source consumed by the engine
///
/// Wall time drives the clock face; mono time drives the stopwatch and timer.
pub trait Clock: Send + Sync {
    /// Current local time of day
    fn wall_time(&self) -> WallTime;

    /// Current monotonic timestamp
    fn mono_now(&self) -> MonoTime;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn wall_time(&self) -> WallTime {
        (**self).wall_time()
    }

    fn mono_now(&self) -> MonoTime {
        (**self).mono_now()
    }
}

/// System clock: local time zone wall time plus the OS monotonic clock
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    /// Origin of the monotonic timeline
    reference: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            reference: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wall_time(&self) -> WallTime {
        let now = chrono::Local::now();
        // chrono reports a leap second as nanos >= 1e9 on second 59
        let (second, nanos) = match now.nanosecond() {
            n if n >= 1_000_000_000 => (60, n - 1_000_000_000),
            n => (now.second(), n),
        };

        WallTime::new(
            now.hour() as u8,
            now.minute() as u8,
            second as u8,
            (nanos / 1_000_000) as u16,
        )
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "local clock reported an out-of-range time");
            WallTime::from_millis_of_day(now.num_seconds_from_midnight() as u64 * 1000)
        })
    }

    fn mono_now(&self) -> MonoTime {
        MonoTime::from_micros(self.reference.elapsed().as_micros() as u64)
    }
}

#[derive(Debug)]
struct ManualState {
    /// Wall time of day, microseconds since midnight
    wall_us: u64,
    mono: MonoTime,
}

/// Manually driven clock for tests and simulation
///
/// Clones share the same timeline. Wall time wraps at midnight; mono time
/// only moves forward.
#[derive(Clone, Debug)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

const MICROS_PER_DAY: u64 = 86_400 * 1_000_000;

impl ManualClock {
    /// Clock at local midnight, mono time zero
    pub fn new() -> Self {
        Self::at(WallTime::MIDNIGHT)
    }

    /// Clock at the given wall time, mono time zero
    pub fn at(wall: WallTime) -> Self {
        let wall_us = (wall.seconds_since_midnight() * 1_000_000.0).round() as u64;
        ManualClock {
            state: Arc::new(Mutex::new(ManualState {
                wall_us: wall_us % MICROS_PER_DAY,
                mono: MonoTime::ZERO,
            })),
        }
    }

    /// Clock at a number of seconds since midnight (wraps, negatives clamp to 0)
    pub fn at_seconds(seconds_since_midnight: f64) -> Self {
        let clock = Self::new();
        clock.set_wall_seconds(seconds_since_midnight);
        clock
    }

    /// Advance both timelines
    pub fn advance(&self, dt: Duration) {
        let mut state = self.state.lock();
        let dt_us = dt.as_micros() as u64;
        state.wall_us = (state.wall_us + dt_us % MICROS_PER_DAY) % MICROS_PER_DAY;
        state.mono = state.mono + dt;
    }

    /// Jump the wall clock without touching mono time (e.g. a manual time change)
    pub fn set_wall_seconds(&self, seconds_since_midnight: f64) {
        let us = (seconds_since_midnight.max(0.0) * 1_000_000.0).round() as u64;
        self.state.lock().wall_us = us % MICROS_PER_DAY;
    }

    /// Wall time in seconds since midnight, at full microsecond precision
    pub fn wall_seconds(&self) -> f64 {
        self.state.lock().wall_us as f64 / 1_000_000.0
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn wall_time(&self) -> WallTime {
        WallTime::from_millis_of_day(self.state.lock().wall_us / 1000)
    }

    fn mono_now(&self) -> MonoTime {
        self.state.lock().mono
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();

        let t1 = clock.mono_now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.mono_now();

        assert!(t2 > t1);
    }

    #[test]
    fn test_system_clock_wall_time_in_range() {
        let wall = SystemClock::new().wall_time();
        assert!(wall.hour() <= 23);
        assert!(wall.seconds_since_midnight() < 86_401.0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::at_seconds(100.0);
        clock.advance(Duration::from_millis(1500));

        assert_eq!(clock.mono_now(), MonoTime::from_millis(1500));
        assert!((clock.wall_seconds() - 101.5).abs() < 1e-9);
        assert_eq!(clock.wall_time().second(), 41);
        assert_eq!(clock.wall_time().millisecond(), 500);
    }

    #[test]
    fn test_manual_clock_wraps_at_midnight() {
        let clock = ManualClock::at_seconds(86_399.5);
        clock.advance(Duration::from_secs(1));

        assert_eq!(clock.wall_time(), WallTime::from_millis_of_day(500));
        // Mono time keeps counting across midnight
        assert_eq!(clock.mono_now(), MonoTime::from_millis(1000));
    }

    #[test]
    fn test_manual_clock_clones_share_timeline() {
        let clock = ManualClock::new();
        let other = clock.clone();

        other.advance(Duration::from_millis(864));
        assert_eq!(clock.mono_now(), MonoTime::from_millis(864));

        clock.set_wall_seconds(43_200.0);
        assert_eq!(other.wall_time().hour(), 12);
        // Wall jumps do not move mono time
        assert_eq!(other.mono_now(), MonoTime::from_millis(864));
    }
}
