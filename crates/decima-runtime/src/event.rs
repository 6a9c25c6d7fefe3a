//! Display events published to the presentation layer

use decima_core::{CustomDuration, CustomInstant};

/// A value ready to render
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayEvent {
    /// Clock face, on every scheduler firing
    Clock(CustomInstant),
    /// Stopwatch elapsed time
    Stopwatch(CustomDuration),
    /// Timer time left
    Timer(CustomDuration),
    /// Countdown reached zero; sent once per countdown
    TimerFinished,
}
