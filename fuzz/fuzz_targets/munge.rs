#![no_main]

use libfuzzer_sys::fuzz_target;
use simulcast_sdp::{SessionDescription, SimulcastMunger};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut munger = SimulcastMunger::new();

    // Second round goes through the cache.
    let first = munger.munge_local_description(SessionDescription::offer(text), None);
    let second = munger.munge_local_description(SessionDescription::offer(text), None);

    // Munging an already munged description is a no-op.
    if let Some(sdp) = first.sdp.clone() {
        let again = munger.munge_local_description(SessionDescription::offer(sdp), None);
        assert_eq!(again.sdp, first.sdp);
    }

    assert_eq!(first.typ, second.typ);
});
