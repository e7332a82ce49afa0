use crate::classify::Classifier;
use lintreport_types::{
    Diagnostic, FileCategory, FileReport, Recommendation, RepoPath, RuleCount, SeverityBucket,
    generic_remediation, lookup_rule,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Everything the engine needs to build one file's report.
#[derive(Clone, Debug)]
pub struct FileInput {
    pub seq: u32,
    pub path: RepoPath,
    pub category: FileCategory,
    pub diagnostics: Vec<Diagnostic>,
    pub raw_output: String,
    pub analyzed_at: OffsetDateTime,
}

pub fn build_file_report(input: FileInput, classifier: &Classifier) -> FileReport {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut first_message: BTreeMap<&str, &str> = BTreeMap::new();
    for d in &input.diagnostics {
        *counts.entry(d.code.clone()).or_default() += 1;
        first_message
            .entry(d.code.as_str())
            .or_insert(d.message.as_str());
    }

    let mut distribution: Vec<RuleCount> = counts
        .iter()
        .map(|(code, &count)| {
            let description = match lookup_rule(code) {
                Some(exp) => exp.description.to_string(),
                None => first_message
                    .get(code.as_str())
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            };
            RuleCount {
                code: code.clone(),
                count,
                bucket: classifier.bucket(code),
                description,
            }
        })
        .collect();
    distribution.sort_by(compare_rule_counts);

    let recommendations = recommendations_for(&distribution);
    let total = counts.values().sum();

    FileReport {
        seq: input.seq,
        path: input.path,
        category: input.category,
        total,
        counts,
        distribution,
        recommendations,
        diagnostics: input.diagnostics,
        raw_output: input.raw_output,
        analyzed_at: input.analyzed_at,
    }
}

/// Count descending, then code ascending.
pub fn compare_rule_counts(a: &RuleCount, b: &RuleCount) -> std::cmp::Ordering {
    b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code))
}

fn recommendations_for(distribution: &[RuleCount]) -> Vec<Recommendation> {
    let mut out = Vec::new();
    for bucket in SeverityBucket::ALL {
        for row in distribution.iter().filter(|r| r.bucket == bucket) {
            let remediation = lookup_rule(&row.code)
                .map(|exp| exp.remediation)
                .unwrap_or_else(|| generic_remediation(bucket));
            out.push(Recommendation {
                bucket,
                code: row.code.clone(),
                count: row.count,
                remediation: remediation.to_string(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{diagnostics_from_counts, file_input};

    const EXAMPLE: &[(&str, u32)] = &[
        ("W293", 17),
        ("E501", 6),
        ("F401", 2),
        ("E302", 2),
        ("W291", 2),
        ("F541", 2),
        ("E305", 1),
        ("W292", 1),
    ];

    #[test]
    fn example_report_totals_and_ordering() {
        let input = file_input(1, "scripts/deploy.py", diagnostics_from_counts(EXAMPLE));
        let report = build_file_report(input, &Classifier::default());

        assert_eq!(report.total, 33);
        assert_eq!(report.total, report.counts.values().sum::<u32>());

        let order: Vec<(&str, u32)> = report
            .distribution
            .iter()
            .map(|r| (r.code.as_str(), r.count))
            .collect();
        assert_eq!(
            order,
            vec![
                ("W293", 17),
                ("E501", 6),
                ("E302", 2),
                ("F401", 2),
                ("F541", 2),
                ("W291", 2),
                ("E305", 1),
                ("W292", 1),
            ]
        );
    }

    #[test]
    fn example_recommendations_grouped_by_bucket() {
        let input = file_input(1, "scripts/deploy.py", diagnostics_from_counts(EXAMPLE));
        let report = build_file_report(input, &Classifier::default());

        let critical: Vec<&str> = report
            .recommendations
            .iter()
            .filter(|r| r.bucket == SeverityBucket::Critical)
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(critical, vec!["F401", "F541"]);

        let important: Vec<&str> = report
            .recommendations
            .iter()
            .filter(|r| r.bucket == SeverityBucket::Important)
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(important, vec!["E302"]);

        let buckets: Vec<SeverityBucket> = report.recommendations.iter().map(|r| r.bucket).collect();
        let mut sorted = buckets.clone();
        sorted.sort();
        assert_eq!(buckets, sorted, "recommendations follow bucket priority");
        assert!(report.has_bucket(SeverityBucket::Critical));
    }

    #[test]
    fn unknown_code_uses_tool_message_and_generic_remediation() {
        let mut diags = diagnostics_from_counts(&[("B950", 1)]);
        diags[0].message = "line too long (120 > 110 characters)".to_string();
        let report = build_file_report(file_input(2, "a.py", diags), &Classifier::default());

        let row = &report.distribution[0];
        assert_eq!(row.bucket, SeverityBucket::Cosmetic);
        assert_eq!(row.description, "line too long (120 > 110 characters)");
        assert_eq!(
            report.recommendations[0].remediation,
            generic_remediation(SeverityBucket::Cosmetic)
        );
    }

    #[test]
    fn clean_file_has_no_rows() {
        let report = build_file_report(file_input(3, "ok.py", Vec::new()), &Classifier::default());
        assert!(report.is_clean());
        assert!(report.distribution.is_empty());
        assert!(report.recommendations.is_empty());
    }
}
