//! The `ingest` use case: build reports from a recorded whole-tree checker run.

use crate::OutputOptions;
use crate::pipeline::{PipelineInput, RunOutput, run_pipeline};
use anyhow::Context;
use camino::Utf8Path;
use lintreport_domain::{CategoryMatcher, split_by_path};
use lintreport_repo::SourceFile;
use lintreport_runner::CannedTool;
use lintreport_settings::Overrides;
use lintreport_types::RepoPath;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Clone, Debug)]
pub struct IngestInput<'a> {
    /// Root of the recorded run. Absolute paths under it are reported relative to it.
    pub root: &'a Utf8Path,
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Checker stdout, e.g. `flake8 --count --statistics . > lint.txt`.
    pub recorded: &'a str,
    pub output: OutputOptions,
}

/// Only files that appear in the recording are reported; no process is spawned.
pub fn run_ingest(input: IngestInput<'_>) -> anyhow::Result<RunOutput> {
    let resolved = lintreport_settings::load(input.config_text, input.overrides)?;
    let effective = resolved.effective;

    let matcher =
        CategoryMatcher::new(&effective.categories).context("compile category rules")?;
    let tool = CannedTool::new(
        effective.tool.program.clone(),
        recorded_outputs(input.root, input.recorded),
    );
    let files: Vec<SourceFile> = tool
        .paths()
        .map(|p| SourceFile {
            path: p.clone(),
            category: matcher.categorize(p),
        })
        .collect();
    info!(files = files.len(), "recorded output split by file");

    run_pipeline(PipelineInput {
        root: input.root,
        files,
        tool: &tool,
        linter_version: None,
        effective: &effective,
        output: &input.output,
    })
}

/// Per-file recorded output keyed by root-relative path.
fn recorded_outputs(root: &Utf8Path, recorded: &str) -> BTreeMap<RepoPath, String> {
    let mut out: BTreeMap<RepoPath, String> = BTreeMap::new();
    for (path, lines) in split_by_path(recorded) {
        let rel = RepoPath::relative_to(Utf8Path::new(path.as_str()), root);
        out.entry(rel).or_default().push_str(&lines);
    }
    out
}
