//! Scheduler simulator - drives a scheduler on a manual clock
//!
//! Simulates:
//! - A host timer primitive that fires late by a random amount
//! - Long runs across many decimal-second boundaries and midnight
//! - A naive fixed-period timer for comparison

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use decima_core::{
    instant_from_real_time, CustomInstant, CUSTOM_SECONDS_PER_DAY, CUSTOM_SECOND_MILLIS,
};
use decima_time::{Clock, ManualClock, Scheduler, SchedulerConfig};

use crate::LatencyModel;

/// Outcome of a simulated run
#[derive(Clone, Debug, Default)]
pub struct DriftReport {
    /// Callbacks invoked
    pub firings: u64,
    /// Decimal-second boundaries crossed by the display
    pub boundaries: u64,
    /// Boundaries the display jumped over without showing
    pub skipped: u64,
    /// Worst delay between a boundary and the first display of it
    pub max_lateness: Duration,
    /// Sum of delays the scheduler asked for
    pub total_scheduled: Duration,
    /// Simulated real time
    pub elapsed: Duration,
}

impl DriftReport {
    pub fn max_lateness_ms(&self) -> f64 {
        self.max_lateness.as_secs_f64() * 1000.0
    }

    /// Average scheduler firings per displayed decimal second
    pub fn firings_per_boundary(&self) -> f64 {
        if self.boundaries == 0 {
            return 0.0;
        }
        self.firings as f64 / self.boundaries as f64
    }

    /// Track the displayed second after a firing
    fn observe(&mut self, shown: &mut u64, instant: &CustomInstant) {
        let custom = instant.custom_seconds_today();
        let second = custom.floor() as u64;
        if second == *shown {
            return;
        }

        let steps = (second + CUSTOM_SECONDS_PER_DAY - *shown) % CUSTOM_SECONDS_PER_DAY;
        self.boundaries += steps;
        self.skipped += steps.saturating_sub(1);

        let into_second = custom - custom.floor();
        let lateness =
            Duration::from_secs_f64(into_second * CUSTOM_SECOND_MILLIS as f64 / 1000.0);
        self.max_lateness = self.max_lateness.max(lateness);
        *shown = second;
    }
}

/// Simulated host driving the drift-free scheduler
pub struct SimulatedHost {
    clock: ManualClock,
    scheduler: Scheduler<ManualClock>,
    latency: LatencyModel,
    rng: StdRng,
}

impl SimulatedHost {
    pub fn new(
        start_seconds: f64,
        config: SchedulerConfig,
        latency: LatencyModel,
        seed: u64,
    ) -> Self {
        let clock = ManualClock::at_seconds(start_seconds);
        SimulatedHost {
            scheduler: Scheduler::new(clock.clone(), config),
            clock,
            latency,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Run the scheduler for `duration` of simulated real time
    pub fn run_for(&mut self, duration: Duration) -> DriftReport {
        let latest = Arc::new(Mutex::new(None::<CustomInstant>));
        let sink = latest.clone();
        let mut wakeup = self.scheduler.start(move |instant| {
            *sink.lock() = Some(*instant);
        });

        let mut report = DriftReport::default();
        let mut shown = self.scheduler.sample().custom_seconds_today().floor() as u64;

        while report.elapsed < duration {
            let waited = wakeup.delay + self.latency.sample(&mut self.rng);
            self.clock.advance(waited);
            report.elapsed += waited;
            report.total_scheduled += wakeup.delay;

            let Some(next) = self.scheduler.fire(wakeup.token) else {
                break;
            };
            report.firings += 1;
            if let Some(instant) = latest.lock().take() {
                report.observe(&mut shown, &instant);
            }
            wakeup = next;
        }

        self.scheduler.stop();
        report
    }
}

/// Simulate a fixed-period repeating timer that re-arms from its own
/// (late) firing time instead of from the clock
pub fn run_naive_fixed_period(
    start_seconds: f64,
    latency: LatencyModel,
    duration: Duration,
    seed: u64,
) -> DriftReport {
    let clock = ManualClock::at_seconds(start_seconds);
    let mut rng = StdRng::seed_from_u64(seed);
    let period = Duration::from_millis(CUSTOM_SECOND_MILLIS);

    let mut report = DriftReport::default();
    let mut shown = instant_from_real_time(clock.wall_time())
        .custom_seconds_today()
        .floor() as u64;

    while report.elapsed < duration {
        let waited = period + latency.sample(&mut rng);
        clock.advance(waited);
        report.elapsed += waited;
        report.total_scheduled += period;
        report.firings += 1;

        let instant = instant_from_real_time(clock.wall_time());
        report.observe(&mut shown, &instant);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_DECIMAL_HOUR: Duration = Duration::from_secs(8_640);

    #[test]
    fn test_ideal_host_shows_every_second() {
        let mut host =
            SimulatedHost::new(0.0, SchedulerConfig::default(), LatencyModel::ideal(), 1);
        let report = host.run_for(Duration::from_millis(864 * 500 + 5));

        assert_eq!(report.boundaries, 500);
        assert_eq!(report.skipped, 0);
        assert!(report.max_lateness <= Duration::from_millis(11), "{report:?}");
    }

    #[test]
    fn test_no_drift_with_jitter_over_an_hour() {
        let config = SchedulerConfig::default();
        let latency = LatencyModel::typical();
        let bound = config.min_delay + latency.max() + Duration::from_millis(1);

        let mut host = SimulatedHost::new(0.0, config, latency, 7);
        let report = host.run_for(ONE_DECIMAL_HOUR);

        assert_eq!(report.skipped, 0);
        // Lateness stays bounded by one cycle instead of growing with time
        assert!(report.max_lateness <= bound, "{report:?}");
        // One boundary per 864ms of real time
        let expected = report.elapsed.as_millis() as u64 / CUSTOM_SECOND_MILLIS;
        assert!(report.boundaries.abs_diff(expected) <= 1, "{report:?}");
    }

    #[test]
    fn test_sluggish_host_stays_bounded() {
        let config = SchedulerConfig::default();
        let latency = LatencyModel::sluggish();
        let bound = config.min_delay + latency.max() + Duration::from_millis(1);

        let mut host = SimulatedHost::new(30_000.0, config, latency, 99);
        let report = host.run_for(Duration::from_secs(3_600));

        assert_eq!(report.skipped, 0);
        assert!(report.max_lateness <= bound, "{report:?}");
    }

    #[test]
    fn test_crosses_midnight() {
        let mut host =
            SimulatedHost::new(86_390.0, SchedulerConfig::default(), LatencyModel::typical(), 3);
        let report = host.run_for(Duration::from_secs(20));

        assert_eq!(report.skipped, 0);
        assert!(host.clock().wall_seconds() < 20.0);
        assert!(report.boundaries >= 23);
    }

    #[test]
    fn test_naive_timer_drifts() {
        let latency = LatencyModel::typical();
        let naive = run_naive_fixed_period(0.0, latency.clone(), ONE_DECIMAL_HOUR, 7);
        let mut host = SimulatedHost::new(0.0, SchedulerConfig::default(), latency, 7);
        let drift_free = host.run_for(ONE_DECIMAL_HOUR);

        // Accumulated lateness makes the naive display skip seconds
        assert!(naive.skipped > 0, "{naive:?}");
        assert!(naive.max_lateness > drift_free.max_lateness);
        assert_eq!(drift_free.skipped, 0);
    }

    #[test]
    fn test_scheduled_delay_sum_tracks_boundaries() {
        let mut host =
            SimulatedHost::new(0.0, SchedulerConfig::default(), LatencyModel::ideal(), 5);
        let report = host.run_for(Duration::from_millis(864 * 200));

        // With a punctual host the scheduled delays are the whole run, and
        // they add up to N decimal seconds give or take one cycle
        assert_eq!(report.total_scheduled, report.elapsed);
        let scheduled_ms = report.total_scheduled.as_millis() as u64;
        assert!(scheduled_ms.abs_diff(report.boundaries * 864) <= 864, "{report:?}");
        assert!(report.firings_per_boundary() > 1.0);
    }
}
