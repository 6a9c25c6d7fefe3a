#![no_main]

use libfuzzer_sys::fuzz_target;

use decima_core::{duration_from_elapsed_millis, hand_angles, instant_from_seconds};

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let seconds = f64::from_le_bytes(data[0..8].try_into().unwrap());
    let millis = i64::from_le_bytes(data[8..16].try_into().unwrap());

    // Any input either fails cleanly or yields an in-range clock face
    if let Ok(instant) = instant_from_seconds(seconds) {
        assert!(instant.hour() <= 9);
        assert!(instant.minute() <= 99);
        assert!(instant.second() <= 99);
        let hands = hand_angles(&instant);
        assert!((0.0..360.0).contains(&hands.hour));
        assert!((0.0..360.0).contains(&hands.second));
    }

    match duration_from_elapsed_millis(millis) {
        Ok(duration) => {
            assert!(millis >= 0);
            assert!(duration.minute <= 99 && duration.second <= 99 && duration.milli <= 999);
        }
        Err(_) => assert!(millis < 0),
    }
});
