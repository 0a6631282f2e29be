#![no_main]

use libfuzzer_sys::fuzz_target;
use dokumd::markup::apply_all;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Every input converts; only panics are interesting
        let _ = apply_all(text);
    }
});
