#![no_main]

use gesturelight::tracking::parse_frame_line;
use libfuzzer_sys::fuzz_target;
use std::time::Instant;

fuzz_target!(|data: &[u8]| {
    // Tracker output is untrusted: malformed lines must be errors, never panics
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = parse_frame_line(line, Instant::now());
    }
});
