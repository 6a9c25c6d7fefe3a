//! Stopwatch controller

use std::time::Duration;

use decima_core::{duration_from_elapsed, CustomDuration, MonoTime};

use crate::Clock;

/// Maximum number of laps kept
pub const MAX_LAPS: usize = 99;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
}

/// Stopwatch reporting elapsed time in decimal units
///
/// Elapsed time is always recomputed from the clock, never accumulated
/// tick by tick.
pub struct Stopwatch<C: Clock> {
    clock: C,
    state: StopwatchState,
    /// Frozen elapsed time while stopped
    accumulated: Duration,
    /// While running: elapsed = now - epoch
    epoch: MonoTime,
    laps: Vec<CustomDuration>,
    /// Elapsed time at the previous lap
    last_lap: Duration,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Stopwatch {
            clock,
            state: StopwatchState::Stopped,
            accumulated: Duration::ZERO,
            epoch: MonoTime::ZERO,
            laps: Vec::new(),
            last_lap: Duration::ZERO,
        }
    }

    /// Start, or resume after a pause
    pub fn start(&mut self) {
        if self.state == StopwatchState::Running {
            return;
        }
        // Backdate the epoch so elapsed time continues seamlessly
        self.epoch = self.clock.mono_now().saturating_sub(self.accumulated);
        self.state = StopwatchState::Running;
        tracing::info!(accumulated = ?self.accumulated, "stopwatch running");
    }

    pub fn pause(&mut self) {
        if self.state != StopwatchState::Running {
            return;
        }
        self.accumulated = self.clock.mono_now() - self.epoch;
        self.state = StopwatchState::Stopped;
        tracing::info!(accumulated = ?self.accumulated, "stopwatch paused");
    }

    pub fn reset(&mut self) {
        self.state = StopwatchState::Stopped;
        self.accumulated = Duration::ZERO;
        self.laps.clear();
        self.last_lap = Duration::ZERO;
        tracing::info!("stopwatch reset");
    }

    /// Elapsed real time
    pub fn elapsed_real(&self) -> Duration {
        match self.state {
            StopwatchState::Running => self.clock.mono_now() - self.epoch,
            StopwatchState::Stopped => self.accumulated,
        }
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_real().as_millis() as u64
    }

    /// Elapsed time in decimal units
    pub fn elapsed(&self) -> CustomDuration {
        duration_from_elapsed(self.elapsed_real())
    }

    /// Record a split since the previous lap. Only while running.
    pub fn lap(&mut self) -> Option<CustomDuration> {
        if self.state != StopwatchState::Running {
            return None;
        }
        let elapsed = self.elapsed_real();
        let split = duration_from_elapsed(elapsed - self.last_lap);
        self.last_lap = elapsed;
        if self.laps.len() < MAX_LAPS {
            self.laps.push(split);
        }
        Some(split)
    }

    pub fn laps(&self) -> &[CustomDuration] {
        &self.laps
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use proptest::prelude::*;

    fn stopwatch() -> (ManualClock, Stopwatch<ManualClock>) {
        let clock = ManualClock::new();
        (clock.clone(), Stopwatch::new(clock))
    }

    #[test]
    fn test_stopwatch_counts_decimal_seconds() {
        let (clock, mut sw) = stopwatch();
        sw.start();
        clock.advance(Duration::from_millis(864 * 150));

        let elapsed = sw.elapsed();
        assert_eq!((elapsed.hour, elapsed.minute, elapsed.second), (0, 1, 50));
        assert_eq!(elapsed.milli, 0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let (clock, mut sw) = stopwatch();
        sw.start();
        clock.advance(Duration::from_millis(500));
        sw.pause();

        clock.advance(Duration::from_secs(60));
        assert_eq!(sw.elapsed_millis(), 500);
        assert_eq!(sw.state(), StopwatchState::Stopped);
    }

    #[test]
    fn test_resume_continues_seamlessly() {
        let (clock, mut sw) = stopwatch();
        sw.start();
        clock.advance(Duration::from_millis(300));
        sw.pause();
        clock.advance(Duration::from_secs(5));
        sw.start();
        clock.advance(Duration::from_millis(200));

        assert_eq!(sw.elapsed_millis(), 500);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let (clock, mut sw) = stopwatch();
        sw.start();
        clock.advance(Duration::from_millis(100));
        sw.start();
        clock.advance(Duration::from_millis(100));
        assert_eq!(sw.elapsed_millis(), 200);
    }

    #[test]
    fn test_reset() {
        let (clock, mut sw) = stopwatch();
        sw.start();
        clock.advance(Duration::from_secs(3));
        sw.lap();
        sw.reset();

        assert_eq!(sw.state(), StopwatchState::Stopped);
        assert_eq!(sw.elapsed(), CustomDuration::ZERO);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_laps_are_splits() {
        let (clock, mut sw) = stopwatch();
        assert_eq!(sw.lap(), None);

        sw.start();
        clock.advance(Duration::from_millis(864 * 10));
        let first = sw.lap().unwrap();
        clock.advance(Duration::from_millis(864 * 5));
        let second = sw.lap().unwrap();

        assert_eq!(first.total_custom_seconds(), 10);
        assert_eq!(second.total_custom_seconds(), 5);
        assert_eq!(sw.laps(), &[first, second]);
    }

    #[test]
    fn test_lap_history_is_bounded() {
        let (clock, mut sw) = stopwatch();
        sw.start();
        for _ in 0..(MAX_LAPS + 10) {
            clock.advance(Duration::from_millis(10));
            assert!(sw.lap().is_some());
        }
        assert_eq!(sw.laps().len(), MAX_LAPS);
    }

    proptest! {
        #[test]
        fn prop_pause_resume_preserves_elapsed(
            segments in proptest::collection::vec((1u64..5_000, 0u64..100_000), 1..20)
        ) {
            let (clock, mut sw) = stopwatch();
            let mut expected = 0u64;

            for (running_ms, paused_ms) in segments {
                sw.start();
                clock.advance(Duration::from_millis(running_ms));
                sw.pause();
                expected += running_ms;
                clock.advance(Duration::from_millis(paused_ms));
                prop_assert_eq!(sw.elapsed_millis(), expected);
            }
        }
    }
}
