#![no_main]

// Feed arbitrary bytes to the decoder. Anything it accepts must re-encode to
// exactly the same bytes, since only canonical encodings are accepted.

use libfuzzer_sys::fuzz_target;
use vclock::{NumericClock, StringClock};

fuzz_target!(|bytes: &[u8]| {
    if let Ok(clock) = StringClock::from_bytes(bytes) {
        assert_eq!(clock.to_bytes(), bytes);
    }
    if let Ok(clock) = NumericClock::from_bytes(bytes) {
        assert_eq!(clock.to_bytes(), bytes);
    }
});
