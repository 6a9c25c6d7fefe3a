//! Drift-free scheduler
//!
//! Wakes a callback on every decimal-second boundary. The delay to the next
//! wake-up is recomputed from a fresh clock sample on every firing instead of
//! using a fixed period, so timer imprecision never accumulates: the error
//! is bounded by a single scheduling cycle.
//!
//! The scheduler does not sleep by itself. A host (tokio task, simulation
//! loop, UI event loop) waits for each [`Wakeup::delay`] and then calls
//! [`Scheduler::fire`] with the wake-up's token.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use decima_core::{instant_from_real_time, CustomInstant, CUSTOM_SECOND_MILLIS};

use crate::{Clock, SchedulerConfig};

/// Delay from `instant` until slightly before the next decimal-second boundary.
///
/// `(1 - sub_second) * 864ms - lead`, floored at `min_delay`.
pub fn next_delay(instant: &CustomInstant, config: &SchedulerConfig) -> Duration {
    let fractional_part = instant.sub_second().clamp(0.0, 1.0);
    let until_next_ms = (1.0 - fractional_part) * CUSTOM_SECOND_MILLIS as f64;
    let until_next = Duration::from_micros((until_next_ms * 1000.0).round() as u64);

    until_next.saturating_sub(config.lead).max(config.min_delay)
}

/// Scheduler state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing pending
    Idle,
    /// A wake-up is outstanding
    Armed,
}

/// A pending wake-up the host must honor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wakeup {
    /// Identifies the schedule this wake-up belongs to
    pub token: u64,
    /// How long to wait before calling [`Scheduler::fire`]
    pub delay: Duration,
}

type Callback = Box<dyn FnMut(&CustomInstant) + Send>;

struct Inner {
    state: SchedulerState,
    /// Bumped on every start/stop; wake-ups carrying an older token are stale
    token: u64,
    callback: Option<Callback>,
    firings: u64,
}

/// Drift-free decimal-second scheduler
///
/// Clones are handles to the same schedule, so a callback may hold a clone
/// and call [`Scheduler::stop`] on itself.
///
/// Calling [`Scheduler::start`] while armed replaces the running schedule:
/// the previous callback is dropped and its outstanding wake-up goes stale.
#[derive(Clone)]
pub struct Scheduler<C: Clock> {
    clock: C,
    config: SchedulerConfig,
    inner: Arc<Mutex<Inner>>,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, config: SchedulerConfig) -> Self {
        Scheduler {
            clock,
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: SchedulerState::Idle,
                token: 0,
                callback: None,
                firings: 0,
            })),
        }
    }

    /// Arm the scheduler with a callback; returns the first wake-up
    pub fn start<F>(&self, callback: F) -> Wakeup
    where
        F: FnMut(&CustomInstant) + Send + 'static,
    {
        let delay = next_delay(&self.sample(), &self.config);

        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Armed {
            tracing::debug!(token = inner.token, "restarting armed scheduler");
        }
        inner.token += 1;
        inner.state = SchedulerState::Armed;
        inner.callback = Some(Box::new(callback));

        tracing::debug!(token = inner.token, ?delay, "scheduler armed");
        Wakeup {
            token: inner.token,
            delay,
        }
    }

    /// Disarm. No callback runs after this returns, even if a wake-up is
    /// still pending in the host.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Idle {
            return;
        }
        inner.state = SchedulerState::Idle;
        inner.token += 1;
        // None while the callback is running; it is dropped when it returns
        inner.callback = None;
        tracing::debug!(firings = inner.firings, "scheduler stopped");
    }

    /// Handle an elapsed wake-up.
    ///
    /// Invokes the callback with a freshly sampled instant and returns the
    /// next wake-up, or `None` if the token is stale or the schedule was
    /// stopped (possibly by the callback itself).
    pub fn fire(&self, token: u64) -> Option<Wakeup> {
        let mut callback = {
            let mut inner = self.inner.lock();
            if inner.state != SchedulerState::Armed || inner.token != token {
                tracing::trace!(token, current = inner.token, "ignoring stale wake-up");
                return None;
            }
            inner.callback.take()?
        };

        // Lock released: the callback may call stop() or start()
        let instant = self.sample();
        let guard = DisarmOnPanic {
            inner: &self.inner,
            token,
        };
        callback(&instant);
        drop(guard);

        let mut inner = self.inner.lock();
        inner.firings += 1;
        if inner.state != SchedulerState::Armed || inner.token != token {
            return None;
        }
        inner.callback = Some(callback);

        let delay = next_delay(&self.sample(), &self.config);
        tracing::trace!(token, ?delay, display = %instant, "scheduler re-armed");
        Some(Wakeup { token, delay })
    }

    /// Current decimal instant from the scheduler's clock
    pub fn sample(&self) -> CustomInstant {
        instant_from_real_time(self.clock.wall_time())
    }

    pub fn state(&self) -> SchedulerState {
        self.inner.lock().state
    }

    /// Callbacks invoked since creation
    pub fn firings(&self) -> u64 {
        self.inner.lock().firings
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

/// Returns the scheduler to `Idle` if a callback unwinds, so a dead host
/// loop is not reported as armed
struct DisarmOnPanic<'a> {
    inner: &'a Mutex<Inner>,
    token: u64,
}

impl Drop for DisarmOnPanic<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.state == SchedulerState::Armed && inner.token == self.token {
            inner.state = SchedulerState::Idle;
            inner.token += 1;
            tracing::warn!(token = self.token, "scheduler callback panicked, disarming");
        }
    }
}
