//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - report totals and per-code counts
//! - distribution ordering
//! - bucket presence in recommendations
//! - parser robustness

use crate::classify::{Classifier, default_bucket};
use crate::engine::build_file_report;
use crate::parse::parse_output;
use crate::test_support::file_input;
use lintreport_types::{Diagnostic, RepoPath, SeverityBucket};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Mix of codes from every bucket plus unknown plugin codes.
fn arb_code() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["F401", "F541", "F841", "F821", "F811"]),
        prop::sample::select(vec!["E302", "E402", "E128", "E722", "E741"]),
        prop::sample::select(vec!["W291", "W292", "W293", "E501", "E305"]),
        prop::sample::select(vec!["B950", "SIM102", "C901"]),
    ]
    .prop_map(|s| s.to_string())
}

fn arb_diagnostic() -> impl Strategy<Value = Diagnostic> {
    (arb_code(), 1u32..5000, 1u32..200, "[a-z ]{0,40}").prop_map(|(code, line, col, msg)| {
        Diagnostic {
            path: RepoPath::new("pkg/mod.py"),
            line,
            col,
            code,
            message: msg.trim().to_string(),
        }
    })
}

fn arb_diagnostics() -> impl Strategy<Value = Vec<Diagnostic>> {
    prop::collection::vec(arb_diagnostic(), 0..80)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn total_equals_sum_of_counts(diags in arb_diagnostics()) {
        let n = diags.len() as u32;
        let report = build_file_report(file_input(1, "pkg/mod.py", diags), &Classifier::default());
        prop_assert_eq!(report.total, n);
        prop_assert_eq!(report.total, report.counts.values().sum::<u32>());
        prop_assert_eq!(
            report.total,
            report.distribution.iter().map(|r| r.count).sum::<u32>()
        );
    }

    #[test]
    fn distribution_sorted_by_count_desc_then_code(diags in arb_diagnostics()) {
        let report = build_file_report(file_input(1, "pkg/mod.py", diags), &Classifier::default());
        for pair in report.distribution.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.count > b.count || (a.count == b.count && a.code < b.code),
                "{} ({}) must precede {} ({})", a.code, a.count, b.code, b.count
            );
        }
    }

    #[test]
    fn critical_tier_present_iff_critical_code(diags in arb_diagnostics()) {
        let any_critical = diags
            .iter()
            .any(|d| default_bucket(&d.code) == SeverityBucket::Critical);
        let report = build_file_report(file_input(1, "pkg/mod.py", diags), &Classifier::default());
        let has_tier = report
            .recommendations
            .iter()
            .any(|r| r.bucket == SeverityBucket::Critical);
        prop_assert_eq!(any_critical, has_tier);
    }

    #[test]
    fn parser_recovers_every_rendered_diagnostic(diags in arb_diagnostics()) {
        let input = file_input(1, "pkg/mod.py", diags);
        let parsed = parse_output(&input.raw_output);
        prop_assert_eq!(parsed.diagnostics.len(), input.diagnostics.len());
        prop_assert_eq!(parsed.unrecognized, 0);
    }

    #[test]
    fn parser_never_panics(text in "\\PC{0,400}") {
        let _ = parse_output(&text);
    }
}
