//! Decima Test Harness
//!
//! Deterministic simulation of the drift-free scheduler:
//! - Host wake-up latency and jitter models
//! - Simulated host driving the scheduler on a manual clock
//! - Drift reports, with a naive fixed-period timer for comparison

pub mod latency;
pub mod simulator;

pub use latency::*;
pub use simulator::*;
