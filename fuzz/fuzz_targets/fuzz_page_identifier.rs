#![no_main]

use libfuzzer_sys::fuzz_target;
use dokumd::document::PageIdentifier;
use dokumd::markup::{PAGE_EXTENSION, map_identifier};

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(id) = raw.parse::<PageIdentifier>() {
            // Valid identifiers round-trip through their display form
            assert_eq!(id.to_string(), raw);
            let path = map_identifier(&id, PAGE_EXTENSION);
            assert_eq!(path.segments().len(), id.segments().len());
        }
    }
});
