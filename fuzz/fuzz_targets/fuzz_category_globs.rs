//! Fuzz target for category glob compilation and matching.
//!
//! Invalid patterns may be rejected, but compiling or matching must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_category_globs
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lintreport_domain::category::compile_globs;

#[derive(Arbitrary, Debug)]
struct GlobInput {
    patterns: Vec<String>,
    candidates: Vec<String>,
}

fuzz_target!(|input: GlobInput| {
    if input.patterns.len() > 20 || input.candidates.len() > 100 {
        return;
    }
    let patterns: Vec<String> = input
        .patterns
        .into_iter()
        .filter(|p| p.len() <= 256)
        .collect();

    let Ok(set) = compile_globs(&patterns) else {
        return;
    };
    for candidate in input.candidates.iter().filter(|c| c.len() <= 512) {
        let _ = set.is_match(candidate.as_str());
    }
});
