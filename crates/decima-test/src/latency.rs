//! Host wake-up latency model

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

/// How late a host's timer primitive fires
#[derive(Clone, Debug)]
pub struct LatencyModel {
    /// Fixed lateness on every wake-up
    pub base: Duration,
    /// Additional uniform random lateness, `0..=jitter`
    pub jitter: Duration,
}

impl LatencyModel {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        LatencyModel { base, jitter }
    }

    /// Timer fires exactly on time
    pub fn ideal() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// A desktop event loop
    pub fn typical() -> Self {
        Self::new(Duration::from_millis(1), Duration::from_millis(4))
    }

    /// A throttled or heavily loaded host
    pub fn sluggish() -> Self {
        Self::new(Duration::from_millis(15), Duration::from_millis(30))
    }

    /// Worst lateness this model can produce
    pub fn max(&self) -> Duration {
        self.base + self.jitter
    }

    /// Lateness of one wake-up
    pub fn sample(&self, rng: &mut StdRng) -> Duration {
        let jitter_us = self.jitter.as_micros() as u64;
        let extra = if jitter_us > 0 {
            rng.gen_range(0..=jitter_us)
        } else {
            0
        };
        self.base + Duration::from_micros(extra)
    }
}
