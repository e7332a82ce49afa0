use crate::fingerprint::fingerprint_for_diagnostic;
use lintreport_types::{
    BucketCounts, CategoryCount, CodeTotal, FileCategory, FileReport, IndexEntry, IndexSummary,
    LintFailure, LintIndex, LinterMeta, SeverityBucket, ToolMeta, ids,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct IndexInput<'a> {
    pub tool: ToolMeta,
    pub linter: LinterMeta,
    pub project: String,
    pub started_at: OffsetDateTime,
    pub finished_at: OffsetDateTime,
    pub reports: &'a [FileReport],
    /// Report file name per sequence number, for reports that were rendered.
    pub report_files: BTreeMap<u32, String>,
    pub failures: Vec<LintFailure>,
    /// Embed full per-file reports in the index.
    pub keep_reports: bool,
}

pub fn build_index(input: IndexInput<'_>) -> LintIndex {
    let mut reports: Vec<&FileReport> = input.reports.iter().collect();
    reports.sort_by_key(|r| r.seq);

    let mut summary = IndexSummary {
        files_scanned: (reports.len() + input.failures.len()) as u32,
        files_failed: input.failures.len() as u32,
        ..IndexSummary::default()
    };
    let mut by_bucket = BucketCounts::default();
    let mut by_category: BTreeMap<FileCategory, (u32, u32)> = BTreeMap::new();
    let mut by_code: BTreeMap<&str, (SeverityBucket, u32, u32)> = BTreeMap::new();

    for r in &reports {
        if r.is_clean() {
            summary.files_clean += 1;
        } else {
            summary.files_with_findings += 1;
        }
        summary.diagnostics_total += r.total;

        let cat = by_category.entry(r.category).or_default();
        cat.0 += 1;
        cat.1 += r.total;

        for row in &r.distribution {
            by_bucket.add(row.bucket, row.count);
            let code = by_code
                .entry(row.code.as_str())
                .or_insert((row.bucket, 0, 0));
            code.1 += row.count;
            code.2 += 1;
        }
    }
    summary.by_bucket = by_bucket;

    let categories = by_category
        .into_iter()
        .map(|(category, (files, diagnostics))| CategoryCount {
            category,
            files,
            diagnostics,
        })
        .collect();

    let mut codes: Vec<CodeTotal> = by_code
        .into_iter()
        .map(|(code, (bucket, count, files))| CodeTotal {
            code: code.to_string(),
            bucket,
            count,
            files,
        })
        .collect();
    codes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

    let entries = reports
        .iter()
        .map(|r| IndexEntry {
            seq: r.seq,
            path: r.path.clone(),
            category: r.category,
            total: r.total,
            report_file: input.report_files.get(&r.seq).cloned(),
            fingerprints: r.diagnostics.iter().map(fingerprint_for_diagnostic).collect(),
        })
        .collect();

    let mut failures = input.failures;
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    LintIndex {
        schema: ids::SCHEMA_INDEX_V1.to_string(),
        tool: input.tool,
        linter: input.linter,
        project: input.project,
        started_at: input.started_at,
        finished_at: input.finished_at,
        summary,
        categories,
        codes,
        entries,
        failures,
        reports: if input.keep_reports {
            reports.into_iter().cloned().collect()
        } else {
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::engine::build_file_report;
    use crate::test_support::{diagnostics_from_counts, file_input};
    use lintreport_types::RepoPath;
    use time::macros::datetime;

    fn input<'a>(reports: &'a [FileReport], failures: Vec<LintFailure>) -> IndexInput<'a> {
        IndexInput {
            tool: ToolMeta {
                name: "lintreport".to_string(),
                version: "0.0.0".to_string(),
            },
            linter: LinterMeta {
                program: "flake8".to_string(),
                version: None,
            },
            project: "demo".to_string(),
            started_at: datetime!(2025-09-14 10:00:00 UTC),
            finished_at: datetime!(2025-09-14 10:01:00 UTC),
            reports,
            report_files: BTreeMap::from([(2, "002_b_py_REPORT.md".to_string())]),
            failures,
            keep_reports: false,
        }
    }

    fn reports() -> Vec<FileReport> {
        let c = Classifier::default();
        let mut bot = file_input(2, "b.py", diagnostics_from_counts(&[("W293", 3), ("F401", 1)]));
        bot.category = FileCategory::Bot;
        vec![
            build_file_report(bot, &c),
            build_file_report(file_input(1, "a.py", Vec::new()), &c),
            build_file_report(
                file_input(3, "c.py", diagnostics_from_counts(&[("W293", 1), ("E302", 2)])),
                &c,
            ),
        ]
    }

    #[test]
    fn summary_counts_files_and_buckets() {
        let reports = reports();
        let failure = LintFailure {
            path: RepoPath::new("broken.py"),
            message: "flake8 exited with status 3".to_string(),
        };
        let index = build_index(input(&reports, vec![failure]));

        assert_eq!(index.schema, ids::SCHEMA_INDEX_V1);
        assert_eq!(index.summary.files_scanned, 4);
        assert_eq!(index.summary.files_with_findings, 2);
        assert_eq!(index.summary.files_clean, 1);
        assert_eq!(index.summary.files_failed, 1);
        assert_eq!(index.summary.diagnostics_total, 7);
        assert_eq!(
            index.summary.by_bucket,
            BucketCounts {
                critical: 1,
                important: 2,
                cosmetic: 4,
            }
        );
        assert!(index.reports.is_empty());
    }

    #[test]
    fn codes_sorted_by_count_then_code() {
        let reports = reports();
        let index = build_index(input(&reports, Vec::new()));
        let codes: Vec<(&str, u32, u32)> = index
            .codes
            .iter()
            .map(|c| (c.code.as_str(), c.count, c.files))
            .collect();
        assert_eq!(codes, vec![("W293", 4, 2), ("E302", 2, 1), ("F401", 1, 1)]);
    }

    #[test]
    fn entries_follow_sequence_and_carry_report_files() {
        let reports = reports();
        let index = build_index(input(&reports, Vec::new()));
        let seqs: Vec<u32> = index.entries.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(index.entries[0].report_file, None);
        assert_eq!(
            index.entries[1].report_file.as_deref(),
            Some("002_b_py_REPORT.md")
        );
        assert_eq!(index.entries[1].fingerprints.len(), 4);

        let cats: Vec<(FileCategory, u32)> = index
            .categories
            .iter()
            .map(|c| (c.category, c.files))
            .collect();
        assert_eq!(cats, vec![(FileCategory::Script, 2), (FileCategory::Bot, 1)]);
    }

    #[test]
    fn keep_reports_embeds_sorted_reports() {
        let reports = reports();
        let mut i = input(&reports, Vec::new());
        i.keep_reports = true;
        let index = build_index(i);
        let seqs: Vec<u32> = index.reports.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }
}
