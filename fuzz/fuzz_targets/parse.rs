#![no_main]

use libfuzzer_sys::fuzz_target;
use promptkit::{ParseOptions, parse_document};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let document = parse_document(s, &ParseOptions::default()).expect("decoding user input never fails");
        assert_eq!(document.render(), s);
        // Header records are decoded lazily; exercise them too
        let _ = document.metadata();
    }
});
