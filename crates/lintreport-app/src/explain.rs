//! The `explain` use case: look up rule code documentation.

use lintreport_domain::Classifier;
use lintreport_types::{RuleExplanation, SeverityBucket, all_codes, generic_remediation, lookup_rule};
use std::fmt::Write;

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Registry entry plus the bucket the code lands in under the active config.
    Found {
        explanation: RuleExplanation,
        bucket: SeverityBucket,
    },
    /// Code unknown to the registry; it is still classified (usually cosmetic).
    NotFound {
        code: String,
        bucket: SeverityBucket,
        available_codes: Vec<&'static str>,
    },
}

pub fn run_explain(code: &str, classifier: &Classifier) -> ExplainOutput {
    let code = code.trim().to_ascii_uppercase();
    let bucket = classifier.bucket(&code);
    match lookup_rule(&code) {
        Some(explanation) => ExplainOutput::Found {
            explanation,
            bucket,
        },
        None => ExplainOutput::NotFound {
            code,
            bucket,
            available_codes: all_codes().collect(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &RuleExplanation, bucket: SeverityBucket) -> String {
    let mut out = String::new();

    out.push_str(exp.code);
    out.push('\n');
    out.push_str(&"=".repeat(exp.code.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    let _ = writeln!(out, "Bucket: {}", bucket.as_str());
    out.push('\n');
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push('\n');

    out
}

/// Format the "not found" message for terminal display.
pub fn format_not_found(code: &str, bucket: SeverityBucket, codes: &[&'static str]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Unknown code: {code}");
    let _ = writeln!(
        out,
        "Bucket: {} (remediation: {})\n",
        bucket.as_str(),
        generic_remediation(bucket)
    );
    out.push_str("Known codes:\n");
    for chunk in codes.chunks(10) {
        let _ = writeln!(out, "  {}", chunk.join(" "));
    }

    out
}
