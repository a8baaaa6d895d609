//! Fuzz target for session log parsing.
//!
//! Session logs come from the capture layer but may be truncated or
//! corrupted on disk; parsing must never panic, only return an error.

#![no_main]

use ks_core::SessionLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<SessionLog>(data);
});
