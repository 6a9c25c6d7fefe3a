//! Decima Time Engine - Clock sources and time-driven controllers
//!
//! This crate implements:
//! - Clock sources: system wall/monotonic clock and a manual clock for simulation
//! - The drift-free scheduler that wakes on every decimal-second boundary
//! - Stopwatch and countdown timer controllers reporting decimal durations
//! - Engine configuration

pub mod clock;
pub mod scheduler;
pub mod stopwatch;
pub mod timer;
pub mod config;

pub use clock::*;
pub use scheduler::*;
pub use stopwatch::*;
pub use timer::*;
pub use config::*;
