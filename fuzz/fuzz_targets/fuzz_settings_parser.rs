#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use dokumd::config::parse_settings;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = parse_settings(yaml, Path::new("fuzz.yaml"));
    }
});
