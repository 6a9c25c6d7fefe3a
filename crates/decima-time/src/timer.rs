//! Countdown timer controller

use std::time::Duration;

use decima_core::{duration_from_elapsed, real_millis_from_custom, CustomDuration, MonoTime};

use crate::Clock;

/// Sanitizer for user-entered timer fields
pub struct TimerInput;

impl TimerInput {
    /// Parse a decimal time field. Empty, negative or non-numeric input is 0.
    pub fn sanitize(field: &str) -> u64 {
        field.trim().parse::<u64>().unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Result of one timer tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerTick {
    /// Time left, zero once finished
    pub remaining: CustomDuration,
    /// True on exactly one tick: the one that observed the deadline
    pub finished: bool,
}

type FinishedCallback = Box<dyn FnMut() + Send>;

/// Countdown timer with a decimal-unit target
pub struct Timer<C: Clock> {
    clock: C,
    state: TimerState,
    /// Valid while running
    deadline: MonoTime,
    /// Frozen time left while stopped
    remaining: Duration,
    on_finished: Option<FinishedCallback>,
}

impl<C: Clock> Timer<C> {
    pub fn new(clock: C) -> Self {
        Timer {
            clock,
            state: TimerState::Stopped,
            deadline: MonoTime::ZERO,
            remaining: Duration::ZERO,
            on_finished: None,
        }
    }

    /// Register the finished notification
    pub fn on_finished<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_finished = Some(Box::new(callback));
    }

    /// Count down from a decimal `h:m:s`.
    ///
    /// Returns false, leaving the timer untouched, when the target is zero.
    /// Starting while running restarts with the new target.
    pub fn start(&mut self, hour: u64, minute: u64, second: u64) -> bool {
        let real_ms = real_millis_from_custom(hour, minute, second);
        if real_ms == 0 {
            tracing::debug!("ignoring zero-length timer");
            return false;
        }

        let total = Duration::from_millis(real_ms);
        self.deadline = self.clock.mono_now() + total;
        self.remaining = total;
        self.state = TimerState::Running;
        tracing::info!(hour, minute, second, real_ms, "timer started");
        true
    }

    /// Start from raw user-entered fields
    pub fn start_from_fields(&mut self, hour: &str, minute: &str, second: &str) -> bool {
        self.start(
            TimerInput::sanitize(hour),
            TimerInput::sanitize(minute),
            TimerInput::sanitize(second),
        )
    }

    /// Freeze the countdown. Returns true if the deadline had already
    /// passed, in which case the timer finishes instead of pausing.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining = self.deadline - self.clock.mono_now();
        if self.remaining.is_zero() {
            // Deadline passed before any tick saw it
            self.finish();
            return true;
        }
        self.state = TimerState::Stopped;
        tracing::info!(remaining = ?self.remaining, "timer paused");
        false
    }

    /// Resume a paused countdown. Returns false if there is nothing left.
    pub fn resume(&mut self) -> bool {
        if self.state == TimerState::Running || self.remaining.is_zero() {
            return false;
        }
        self.deadline = self.clock.mono_now() + self.remaining;
        self.state = TimerState::Running;
        tracing::info!(remaining = ?self.remaining, "timer resumed");
        true
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Stopped;
        self.remaining = Duration::ZERO;
        tracing::info!("timer reset");
    }

    /// Time left in real units, without side effects
    pub fn remaining_real(&self) -> Duration {
        match self.state {
            TimerState::Running => self.deadline - self.clock.mono_now(),
            TimerState::Stopped => self.remaining,
        }
    }

    /// Time left in decimal units, without side effects
    pub fn remaining(&self) -> CustomDuration {
        duration_from_elapsed(self.remaining_real())
    }

    /// Observe the clock; finishes the countdown once the deadline is reached
    pub fn tick(&mut self) -> TimerTick {
        if self.state == TimerState::Running && self.remaining_real().is_zero() {
            self.finish();
            return TimerTick {
                remaining: CustomDuration::ZERO,
                finished: true,
            };
        }
        TimerTick {
            remaining: self.remaining(),
            finished: false,
        }
    }

    fn finish(&mut self) {
        self.state = TimerState::Stopped;
        self.remaining = Duration::ZERO;
        tracing::info!("timer finished");
        if let Some(callback) = self.on_finished.as_mut() {
            callback();
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}
