#![no_main]

use gesturelight::config::LightConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any config that parses must either calibrate or be rejected cleanly
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(config) = serde_json::from_str::<LightConfig>(s)
    {
        let _ = config.calibrate();
    }
});
