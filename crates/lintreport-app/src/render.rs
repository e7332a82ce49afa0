//! Conversion from report DTOs to renderable models, plus file output helpers.

use anyhow::Context;
use camino::Utf8Path;
use lintreport_render::{
    RenderableBucket, RenderableCategoryRow, RenderableCodeRow, RenderableEntryRow,
    RenderableFailure, RenderableFileReport, RenderableIndex, RenderableRecommendation,
    RenderableRow, RenderableSummary, RenderableTier,
};
use lintreport_types::{FileReport, LintIndex, SeverityBucket};
use time::OffsetDateTime;
use time::macros::format_description;

/// Run-wide values every per-file report shares.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub project: String,
    pub tool: String,
    pub excerpt_chars: usize,
    pub generated_at: OffsetDateTime,
}

/// `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    ts.format(&fmt).unwrap_or_else(|_| ts.to_string())
}

fn bucket(b: SeverityBucket) -> RenderableBucket {
    match b {
        SeverityBucket::Critical => RenderableBucket::Critical,
        SeverityBucket::Important => RenderableBucket::Important,
        SeverityBucket::Cosmetic => RenderableBucket::Cosmetic,
    }
}

pub fn to_renderable_file(report: &FileReport, settings: &RenderSettings) -> RenderableFileReport {
    let rows = report
        .distribution
        .iter()
        .map(|r| RenderableRow {
            code: r.code.clone(),
            count: r.count,
            description: r.description.clone(),
        })
        .collect();

    let tiers = SeverityBucket::ALL
        .into_iter()
        .map(|b| RenderableTier {
            bucket: bucket(b),
            items: report
                .recommendations
                .iter()
                .filter(|r| r.bucket == b)
                .map(|r| RenderableRecommendation {
                    code: r.code.clone(),
                    count: r.count,
                    remediation: r.remediation.clone(),
                })
                .collect(),
        })
        .filter(|t| !t.items.is_empty())
        .collect();

    RenderableFileReport {
        seq: report.seq,
        path: report.path.as_str().to_string(),
        category: report.category.as_str().to_string(),
        total: report.total,
        rows,
        tiers,
        tool: settings.tool.clone(),
        raw_output: report.raw_output.clone(),
        excerpt_chars: settings.excerpt_chars,
        analyzed_at: format_timestamp(report.analyzed_at),
        generated_at: format_timestamp(settings.generated_at),
        project: settings.project.clone(),
    }
}

pub fn to_renderable_index(index: &LintIndex) -> RenderableIndex {
    let s = &index.summary;
    RenderableIndex {
        project: index.project.clone(),
        tool: index.linter.program.clone(),
        started_at: format_timestamp(index.started_at),
        generated_at: format_timestamp(index.finished_at),
        summary: RenderableSummary {
            files_scanned: s.files_scanned,
            files_with_findings: s.files_with_findings,
            files_clean: s.files_clean,
            files_failed: s.files_failed,
            diagnostics_total: s.diagnostics_total,
            critical: s.by_bucket.critical,
            important: s.by_bucket.important,
            cosmetic: s.by_bucket.cosmetic,
        },
        categories: index
            .categories
            .iter()
            .map(|c| RenderableCategoryRow {
                category: c.category.as_str().to_string(),
                files: c.files,
                diagnostics: c.diagnostics,
            })
            .collect(),
        codes: index
            .codes
            .iter()
            .map(|c| RenderableCodeRow {
                code: c.code.clone(),
                bucket: bucket(c.bucket),
                count: c.count,
                files: c.files,
            })
            .collect(),
        entries: index
            .entries
            .iter()
            .map(|e| RenderableEntryRow {
                seq: e.seq,
                path: e.path.as_str().to_string(),
                category: e.category.as_str().to_string(),
                total: e.total,
                report_file: e.report_file.clone(),
            })
            .collect(),
        failures: index
            .failures
            .iter()
            .map(|f| RenderableFailure {
                path: f.path.as_str().to_string(),
                message: f.message.clone(),
            })
            .collect(),
    }
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
