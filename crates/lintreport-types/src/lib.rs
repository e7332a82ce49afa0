//! Stable DTOs and IDs used across the lintreport workspace.
//!
//! This crate is intentionally boring:
//! - data types for per-file reports and the aggregate index
//! - stable string IDs
//! - canonical repo-relative path handling
//! - explain registry for flake8 rule codes

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod report;

pub use explain::{RuleExplanation, all_codes, generic_remediation, lookup_rule};
pub use path::RepoPath;
pub use report::{
    BucketCounts, CategoryCount, CodeTotal, Diagnostic, FileCategory, FileReport, IndexEntry,
    IndexSummary, LintFailure, LintIndex, LinterMeta, Recommendation, RuleCount, SeverityBucket,
    ToolMeta,
};
