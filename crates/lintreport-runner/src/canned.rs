use crate::{LintOutput, LintTool, RunnerError};
use camino::Utf8Path;
use lintreport_domain::split_by_path;
use lintreport_types::RepoPath;
use std::collections::BTreeMap;

/// Serves pre-recorded checker output instead of spawning a process.
///
/// Files missing from the recording lint clean.
#[derive(Clone, Debug, Default)]
pub struct CannedTool {
    name: String,
    outputs: BTreeMap<RepoPath, String>,
}

impl CannedTool {
    pub fn new(name: impl Into<String>, outputs: BTreeMap<RepoPath, String>) -> Self {
        Self {
            name: name.into(),
            outputs,
        }
    }

    /// Split a whole-tree run into per-file recordings.
    pub fn from_tree_output(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, split_by_path(text))
    }

    /// Paths that have recorded output, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &RepoPath> {
        self.outputs.keys()
    }
}

impl LintTool for CannedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self) -> Result<Option<String>, RunnerError> {
        Ok(None)
    }

    fn lint_file(&self, _root: &Utf8Path, path: &RepoPath) -> Result<LintOutput, RunnerError> {
        Ok(LintOutput {
            stdout: self.outputs.get(path).cloned().unwrap_or_default(),
            exit_code: None,
        })
    }
}
