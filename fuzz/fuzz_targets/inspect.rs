#![no_main]

use libfuzzer_sys::fuzz_target;
use simulcast_sdp::{SessionDescription, SimulcastMunger};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let munger = SimulcastMunger::new();
    let _ = munger.inspect(&SessionDescription::answer(text));
});
