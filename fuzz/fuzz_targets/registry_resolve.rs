//! Fuzz target for dataset name resolution.
//!
//! Arbitrary names (including pathological sampling suffixes) must resolve
//! or fail cleanly, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vlprep::registry::fuzz_resolve;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_resolve(name);
});
