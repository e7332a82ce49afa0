//! The `scan` use case: enumerate a tree, run the checker per file, write reports.

use crate::OutputOptions;
use crate::pipeline::{PipelineInput, RunOutput, run_pipeline};
use anyhow::Context;
use camino::Utf8Path;
use lintreport_runner::{Flake8, LintTool};
use lintreport_settings::Overrides;
use tracing::info;

#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    pub root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub output: OutputOptions,
}

pub fn run_scan(input: ScanInput<'_>) -> anyhow::Result<RunOutput> {
    let resolved = lintreport_settings::load(input.config_text, input.overrides)?;
    let effective = resolved.effective;

    let files = lintreport_repo::enumerate_sources(
        input.root,
        &effective.discovery,
        &effective.categories,
    )
    .context("enumerate sources")?;
    info!(root = %input.root, files = files.len(), profile = %effective.profile, "sources enumerated");

    let tool = Flake8::new(effective.tool.clone());
    let version = tool.probe().context("probe checker")?;

    run_pipeline(PipelineInput {
        root: input.root,
        files,
        tool: &tool,
        linter_version: version,
        effective: &effective,
        output: &input.output,
    })
}
