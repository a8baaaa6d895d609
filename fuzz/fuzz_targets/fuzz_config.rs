//! Fuzz target for sanitizer configuration parsing.
//!
//! Tests that JSON config parsing and validation handle arbitrary
//! input without panicking.

#![no_main]

use ks_common::SanitizeConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<SanitizeConfig>(data) {
        let _ = config.validate();
    }
});
