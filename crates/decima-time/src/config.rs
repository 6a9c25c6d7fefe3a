//! Engine configuration

use std::time::Duration;

/// Drift-free scheduler configuration
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// How far ahead of a decimal-second boundary to wake
    pub lead: Duration,
    /// Lower bound on any scheduled delay
    pub min_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            lead: Duration::from_millis(50),
            min_delay: Duration::from_millis(10),
        }
    }
}

/// Time engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Clock face scheduler
    pub scheduler: SchedulerConfig,
    /// Stopwatch display tick interval
    pub stopwatch_interval: Duration,
    /// Timer display tick interval
    pub timer_interval: Duration,
    /// Display event channel capacity
    pub channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            scheduler: SchedulerConfig::default(),
            stopwatch_interval: Duration::from_millis(10),
            timer_interval: Duration::from_millis(100),
            channel_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Configuration for battery-constrained hosts
    pub fn low_power() -> Self {
        EngineConfig {
            scheduler: SchedulerConfig {
                lead: Duration::from_millis(20),
                min_delay: Duration::from_millis(50),
            },
            stopwatch_interval: Duration::from_millis(86),
            timer_interval: Duration::from_millis(432),
            channel_capacity: 16,
        }
    }
}
