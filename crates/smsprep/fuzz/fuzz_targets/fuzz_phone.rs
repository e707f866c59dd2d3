//! Fuzz target for phone normalization.
//!
//! This fuzzer tests that the normalizer:
//! 1. Never panics on any input text
//! 2. Always produces ASCII digits
//! 3. Leaves its own output alone when it is not a recoverable ten digits

#![no_main]

use libfuzzer_sys::fuzz_target;
use smsprep::phone::{RegionalFormat, normalize_phone_str};
use smsprep::validation::contains_letters;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = contains_letters(raw);

        let canonical = normalize_phone_str(raw);
        assert!(canonical.bytes().all(|b| b.is_ascii_digit()));

        if !(canonical.starts_with('0') && canonical.len() == 10) {
            assert_eq!(normalize_phone_str(&canonical), canonical);
        }

        let _ = RegionalFormat::philippines().check(&canonical);
    }
});
