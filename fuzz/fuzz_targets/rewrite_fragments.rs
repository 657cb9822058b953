//! Fuzz target for the coordinate fragment rewriter.
//!
//! This fuzzer feeds arbitrary UTF-8 text to both rewrite passes, checking
//! for panics, crashes, or hangs. Malformed fragments must pass through
//! without error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vlprep::coord::fuzz_rewrite_fragments;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_rewrite_fragments(text);
});
