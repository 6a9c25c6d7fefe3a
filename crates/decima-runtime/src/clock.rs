//! Clock driven by tokio's timer
//!
//! Follows `tokio::time`, so under a paused test runtime it advances exactly
//! as far as the scheduled sleeps do.

use decima_core::{MonoTime, WallTime};
use decima_time::Clock;
use tokio::time::Instant;

/// Tokio-time clock starting at a chosen wall time
#[derive(Clone, Copy, Debug)]
pub struct TokioClock {
    origin: Instant,
    /// Wall time at `origin`, milliseconds since midnight
    start_ms: u64,
}

impl TokioClock {
    pub fn starting_at(wall: WallTime) -> Self {
        TokioClock {
            origin: Instant::now(),
            start_ms: (wall.seconds_since_midnight() * 1000.0).round() as u64,
        }
    }
}

impl Clock for TokioClock {
    fn wall_time(&self) -> WallTime {
        WallTime::from_millis_of_day(self.start_ms + self.origin.elapsed().as_millis() as u64)
    }

    fn mono_now(&self) -> MonoTime {
        MonoTime::from_micros(self.origin.elapsed().as_micros() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_paused_time() {
        let clock = TokioClock::starting_at(WallTime::new(23, 59, 59, 0).unwrap());

        tokio::time::sleep(Duration::from_millis(1_500)).await;

        assert_eq!(clock.mono_now(), MonoTime::from_millis(1_500));
        assert_eq!(clock.wall_time(), WallTime::from_millis_of_day(500));
    }
}
