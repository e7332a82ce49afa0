//! Pure report construction (no IO).
//!
//! Input: checker output text and an effective config resolved elsewhere.
//! Output: diagnostics, per-file reports, and the aggregate index.

#![forbid(unsafe_code)]

pub mod category;
pub mod classify;
pub mod fingerprint;
pub mod index;
pub mod parse;
pub mod policy;

mod engine;

pub use category::CategoryMatcher;
pub use classify::{Classifier, default_bucket};
pub use engine::{FileInput, build_file_report, compare_rule_counts};
pub use index::{IndexInput, build_index};
pub use parse::{ParsedOutput, parse_output, split_by_path};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
