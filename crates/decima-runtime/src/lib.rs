//! Decima Runtime - Tokio host for the time engine
//!
//! Provides the delayed-callback primitive the engine consumes and runs
//! three independent tick sources, each on its own task:
//! 1. Clock face (drift-free scheduler)
//! 2. Stopwatch display
//! 3. Timer display and finished notification
//!
//! Display values flow to the presentation layer as [`DisplayEvent`]s.

pub mod clock;
pub mod event;
pub mod host;
pub mod station;
pub mod telemetry;

pub use clock::*;
pub use event::*;
pub use host::*;
pub use station::*;
pub use telemetry::*;
