//! Fuzz target for the flake8 output parser.
//!
//! Parsing arbitrary checker output must never panic, and every recognized
//! diagnostic must land in exactly one per-file group.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_flake8_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use lintreport_domain::{parse_output, split_by_path};

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = parse_output(text);
    let _ = parsed.tally_mismatch();

    let grouped = split_by_path(text);
    let grouped_lines: usize = grouped.values().map(|s| s.lines().count()).sum();
    assert_eq!(grouped_lines, parsed.diagnostics.len());
});
