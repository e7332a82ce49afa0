//! Shared lint -> classify -> render pipeline behind `scan` and `ingest`.

use crate::OutputOptions;
use crate::render::{RenderSettings, to_renderable_file, to_renderable_index, write_text};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use lintreport_domain::policy::{EffectiveConfig, FailOn};
use lintreport_domain::{Classifier, FileInput, IndexInput, build_file_report, build_index, parse_output};
use lintreport_render::{render_file_markdown, render_index_markdown, report_file_name};
use lintreport_repo::SourceFile;
use lintreport_runner::LintTool;
use lintreport_types::{FileReport, LintFailure, LintIndex, LinterMeta, ToolMeta, ids};
use rayon::prelude::*;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Result of a `scan`, `ingest` or re-render run.
#[derive(Clone, Debug)]
pub struct RunOutput {
    pub index: LintIndex,
    pub fail_on: FailOn,
    /// Every file written, in write order (reports first, then the index files).
    pub written: Vec<Utf8PathBuf>,
}

impl RunOutput {
    pub fn exit_code(&self) -> i32 {
        fail_on_exit_code(self.fail_on, &self.index)
    }
}

/// `2` when the fail-on threshold is met, `0` otherwise.
///
/// Files that could not be linted count as findings under `any`.
pub fn fail_on_exit_code(fail_on: FailOn, index: &LintIndex) -> i32 {
    let tripped = match fail_on {
        FailOn::Never => false,
        FailOn::Critical => index.summary.by_bucket.critical > 0,
        FailOn::Any => index.summary.diagnostics_total > 0 || index.summary.files_failed > 0,
    };
    if tripped { 2 } else { 0 }
}

pub(crate) struct PipelineInput<'a> {
    pub root: &'a Utf8Path,
    pub files: Vec<SourceFile>,
    pub tool: &'a dyn LintTool,
    pub linter_version: Option<String>,
    pub effective: &'a EffectiveConfig,
    pub output: &'a OutputOptions,
}

enum Outcome {
    Linted(Box<FileReport>),
    Failed(LintFailure),
}

pub(crate) fn run_pipeline(input: PipelineInput<'_>) -> anyhow::Result<RunOutput> {
    let started_at = OffsetDateTime::now_utc();
    let effective = input.effective;
    let classifier = Classifier::new(effective.severity_overrides.clone());

    info!(
        files = input.files.len(),
        tool = input.tool.name(),
        jobs = input.output.jobs,
        "lint run started"
    );

    // Sequence numbers follow sorted path order, fixed before any work is scheduled.
    let mut files = input.files;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    let numbered: Vec<(u32, SourceFile)> = files
        .into_iter()
        .enumerate()
        .map(|(i, f)| (i as u32 + 1, f))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(input.output.jobs)
        .build()
        .context("build worker pool")?;

    let outcomes: Vec<Outcome> = pool.install(|| {
        numbered
            .par_iter()
            .map(|(seq, file)| lint_one(input.root, input.tool, &classifier, *seq, file))
            .collect()
    });

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Linted(r) => reports.push(*r),
            Outcome::Failed(f) => failures.push(f),
        }
    }
    let finished_at = OffsetDateTime::now_utc();

    let linter = LinterMeta {
        program: input.tool.name().to_string(),
        version: input.linter_version,
    };
    let out = write_outputs(
        &reports,
        failures,
        linter,
        effective,
        input.output,
        started_at,
        finished_at,
    )?;

    let s = &out.index.summary;
    info!(
        scanned = s.files_scanned,
        with_findings = s.files_with_findings,
        failed = s.files_failed,
        diagnostics = s.diagnostics_total,
        out_dir = %input.output.out_dir,
        "lint run finished"
    );
    Ok(out)
}

fn lint_one(
    root: &Utf8Path,
    tool: &dyn LintTool,
    classifier: &Classifier,
    seq: u32,
    file: &SourceFile,
) -> Outcome {
    debug!(seq, path = %file.path, category = %file.category, "linting");

    let output = match tool.lint_file(root, &file.path) {
        Ok(o) => o,
        Err(err) => {
            warn!(path = %file.path, error = %err, "lint failed");
            return Outcome::Failed(LintFailure {
                path: file.path.clone(),
                message: err.to_string(),
            });
        }
    };

    let parsed = parse_output(&output.stdout);
    if parsed.tally_mismatch() {
        warn!(
            path = %file.path,
            parsed = parsed.diagnostics.len(),
            reported = ?parsed.reported_total,
            "checker tally disagrees with parsed diagnostics"
        );
    }
    if parsed.unrecognized > 0 {
        debug!(path = %file.path, lines = parsed.unrecognized, "skipped unrecognized output lines");
    }

    // The checker echoes whatever path it was given; report under the enumerated path.
    let diagnostics = parsed
        .diagnostics
        .into_iter()
        .map(|mut d| {
            d.path = file.path.clone();
            d
        })
        .collect();

    let report = build_file_report(
        FileInput {
            seq,
            path: file.path.clone(),
            category: file.category,
            diagnostics,
            raw_output: output.stdout,
            analyzed_at: OffsetDateTime::now_utc(),
        },
        classifier,
    );
    Outcome::Linted(Box::new(report))
}

/// Render and write per-file reports, `INDEX.md` and optionally `index.json`.
///
/// The report footer timestamp is `finished_at`, so writing the same data twice yields the
/// same bytes.
pub(crate) fn write_outputs(
    reports: &[FileReport],
    failures: Vec<LintFailure>,
    linter: LinterMeta,
    effective: &EffectiveConfig,
    output: &OutputOptions,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> anyhow::Result<RunOutput> {
    std::fs::create_dir_all(&output.out_dir)
        .with_context(|| format!("create directory: {}", output.out_dir))?;

    let settings = RenderSettings {
        project: effective.project.clone(),
        tool: linter.program.clone(),
        excerpt_chars: effective.excerpt_chars,
        generated_at: finished_at,
    };

    let mut written = Vec::new();
    let mut report_files = BTreeMap::new();
    for report in reports {
        if report.is_clean() && !effective.include_clean {
            continue;
        }
        let name = report_file_name(report.seq, report.path.as_str());
        let path = output.out_dir.join(&name);
        write_text(&path, &render_file_markdown(&to_renderable_file(report, &settings)))?;
        debug!(seq = report.seq, file = %name, "report written");
        report_files.insert(report.seq, name);
        written.push(path);
    }

    let index = build_index(IndexInput {
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        linter,
        project: effective.project.clone(),
        started_at,
        finished_at,
        reports,
        report_files,
        failures,
        keep_reports: output.write_json,
    });

    let index_md = output.out_dir.join(ids::INDEX_MARKDOWN);
    write_text(&index_md, &render_index_markdown(&to_renderable_index(&index)))?;
    written.push(index_md);

    if output.write_json {
        let index_json = output.out_dir.join(ids::INDEX_JSON);
        let mut data = serde_json::to_string_pretty(&index).context("serialize index")?;
        data.push('\n');
        write_text(&index_json, &data)?;
        written.push(index_json);
    }

    Ok(RunOutput {
        index,
        fail_on: effective.fail_on,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintreport_runner::{CannedTool, LintOutput, RunnerError};
    use lintreport_settings::Overrides;
    use lintreport_types::{FileCategory, RepoPath};
    use tempfile::TempDir;

    /// Fails for one path and serves canned output for the rest.
    struct FlakyTool {
        inner: CannedTool,
        broken: RepoPath,
    }

    impl LintTool for FlakyTool {
        fn name(&self) -> &str {
            "flake8"
        }

        fn probe(&self) -> Result<Option<String>, RunnerError> {
            Ok(Some("7.1.1".to_string()))
        }

        fn lint_file(&self, root: &Utf8Path, path: &RepoPath) -> Result<LintOutput, RunnerError> {
            if *path == self.broken {
                return Err(RunnerError::Failed {
                    program: "flake8".to_string(),
                    path: path.as_str().to_string(),
                    code: Some(3),
                    stderr: "boom".to_string(),
                });
            }
            self.inner.lint_file(root, path)
        }
    }

    fn source(path: &str, category: FileCategory) -> SourceFile {
        SourceFile {
            path: RepoPath::new(path),
            category,
        }
    }

    fn effective() -> EffectiveConfig {
        lintreport_settings::load("", Overrides::default())
            .expect("defaults resolve")
            .effective
    }

    fn out_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().join("reports")).expect("utf8 path")
    }

    const RECORDED: &str = "\
./b.py:1:1: F401 'os' imported but unused
./b.py:2:1: W293 blank line contains whitespace
./c.py:3:1: E302 expected 2 blank lines, found 1
";

    fn run(jobs: usize, tmp: &TempDir, eff: &EffectiveConfig) -> RunOutput {
        let tool = FlakyTool {
            inner: CannedTool::from_tree_output("flake8", RECORDED),
            broken: RepoPath::new("d.py"),
        };
        let output = OutputOptions {
            out_dir: out_dir(tmp),
            jobs,
            write_json: true,
        };
        run_pipeline(PipelineInput {
            root: Utf8Path::new("."),
            files: vec![
                source("d.py", FileCategory::Other),
                source("c.py", FileCategory::Bot),
                source("a.py", FileCategory::Script),
                source("b.py", FileCategory::Script),
            ],
            tool: &tool,
            linter_version: Some("7.1.1".to_string()),
            effective: eff,
            output: &output,
        })
        .expect("pipeline")
    }

    #[test]
    fn sequence_numbers_follow_path_order_for_any_worker_count() {
        let eff = effective();
        for jobs in [1, 4] {
            let tmp = TempDir::new().expect("temp dir");
            let out = run(jobs, &tmp, &eff);
            let seqs: Vec<(u32, &str)> = out
                .index
                .entries
                .iter()
                .map(|e| (e.seq, e.path.as_str()))
                .collect();
            assert_eq!(seqs, vec![(1, "a.py"), (2, "b.py"), (3, "c.py")]);
            assert_eq!(out.index.failures.len(), 1);
            assert_eq!(out.index.failures[0].path.as_str(), "d.py");
        }
    }

    #[test]
    fn writes_only_reports_with_findings_by_default() {
        let tmp = TempDir::new().expect("temp dir");
        let out = run(2, &tmp, &effective());
        let dir = out_dir(&tmp);
        assert!(dir.join("002_b_py_REPORT.md").exists());
        assert!(dir.join("003_c_py_REPORT.md").exists());
        assert!(!dir.join("001_a_py_REPORT.md").exists());
        assert!(dir.join("INDEX.md").exists());
        assert!(dir.join("index.json").exists());

        let summary = &out.index.summary;
        assert_eq!(summary.files_scanned, 4);
        assert_eq!(summary.files_with_findings, 2);
        assert_eq!(summary.files_clean, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.diagnostics_total, 3);
    }

    #[test]
    fn include_clean_writes_every_report() {
        let tmp = TempDir::new().expect("temp dir");
        let mut eff = effective();
        eff.include_clean = true;
        run(1, &tmp, &eff);
        let md = std::fs::read_to_string(out_dir(&tmp).join("001_a_py_REPORT.md"))
            .expect("clean report");
        assert!(md.contains("✅ ОШИБОК НЕ НАЙДЕНО"));
    }

    #[test]
    fn fail_on_thresholds() {
        let tmp = TempDir::new().expect("temp dir");
        let out = run(1, &tmp, &effective());
        assert_eq!(fail_on_exit_code(FailOn::Never, &out.index), 0);
        assert_eq!(fail_on_exit_code(FailOn::Critical, &out.index), 2);
        assert_eq!(fail_on_exit_code(FailOn::Any, &out.index), 2);

        let mut clean = out.index.clone();
        clean.summary.by_bucket.critical = 0;
        clean.summary.diagnostics_total = 0;
        clean.summary.files_failed = 0;
        assert_eq!(fail_on_exit_code(FailOn::Any, &clean), 0);
        assert_eq!(fail_on_exit_code(FailOn::Critical, &clean), 0);
    }
}
