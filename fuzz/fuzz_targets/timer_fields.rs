#![no_main]

use libfuzzer_sys::fuzz_target;

use decima_time::{ManualClock, Timer, TimerState};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut fields = text.splitn(3, ',');
    let hour = fields.next().unwrap_or("");
    let minute = fields.next().unwrap_or("");
    let second = fields.next().unwrap_or("");

    // Sanitized input never panics, and only a non-zero target runs
    let mut timer = Timer::new(ManualClock::new());
    let started = timer.start_from_fields(hour, minute, second);
    assert_eq!(started, timer.state() == TimerState::Running);
    if started {
        assert!(!timer.remaining_real().is_zero());
    }
});
