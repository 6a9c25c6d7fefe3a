//! Status line rendering

use std::io::{self, Write};

use decima_core::{hand_angles, CustomDuration, CustomInstant};
use decima_runtime::DisplayEvent;

/// Latest value of every source
#[derive(Default)]
pub struct Display {
    clock: Option<CustomInstant>,
    stopwatch: CustomDuration,
    timer: CustomDuration,
}

impl Display {
    pub fn apply(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Clock(instant) => self.clock = Some(instant),
            DisplayEvent::Stopwatch(elapsed) => self.stopwatch = elapsed,
            DisplayEvent::Timer(remaining) => self.timer = remaining,
            DisplayEvent::TimerFinished => {
                self.note("countdown finished");
                return;
            }
        }
        self.render();
    }

    /// Print a message on its own line, then redraw the status line
    pub fn note(&self, message: &str) {
        println!("\r{:<78}", format!("» {message}"));
        self.render();
    }

    fn render(&self) {
        let clock = match &self.clock {
            Some(instant) => {
                let hands = hand_angles(instant);
                format!(
                    "{instant} [h {:>5.1}° m {:>5.1}° s {:>5.1}°]",
                    hands.hour, hands.minute, hands.second
                )
            }
            None => "-:--:--".to_string(),
        };
        print!(
            "\r{clock} | sw {} | timer {}   ",
            self.stopwatch, self.timer
        );
        io::stdout().flush().ok();
    }
}
