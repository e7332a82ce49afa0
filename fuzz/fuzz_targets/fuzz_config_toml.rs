//! Fuzz target for `lintreport.toml` loading.
//!
//! Malformed config must surface as an error, never a panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_toml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use lintreport_settings::{Overrides, load};

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = load(text, Overrides::default());
});
