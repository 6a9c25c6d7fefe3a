//! Decima Core - Fundamental types and the time conversion module
//!
//! This crate defines the core types used throughout Decima:
//! - Real time primitives (WallTime, MonoTime)
//! - Decimal time values (CustomInstant, CustomDuration, HandAngles)
//! - Unit constants (10 hours/day, 100 minutes/hour, 100 seconds/minute)
//! - Pure conversion from real time to decimal time

pub mod units;
pub mod time;
pub mod custom;
pub mod convert;
pub mod error;

pub use units::*;
pub use time::*;
pub use custom::*;
pub use convert::*;
pub use error::*;
