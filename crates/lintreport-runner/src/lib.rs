//! Runs the external style checker and hands back its raw output.
//!
//! Parsing is not done here; see `lintreport_domain::parse_output`.

#![forbid(unsafe_code)]

mod canned;
mod flake8;

use camino::Utf8Path;
use lintreport_types::RepoPath;

pub use canned::CannedTool;
pub use flake8::Flake8;

/// Raw output of one checker run over one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LintOutput {
    pub stdout: String,
    /// Process exit code; `None` for canned output.
    pub exit_code: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("{program} not found on PATH")]
    ToolNotFound { program: String },

    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed on {path} (exit {}): {stderr}", display_code(.code))]
    Failed {
        program: String,
        path: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string())
}

/// Seam between the pipeline and the checker process.
pub trait LintTool: Send + Sync {
    /// Display name (`flake8`).
    fn name(&self) -> &str;

    /// Check that the tool is runnable; returns its version line when known.
    fn probe(&self) -> Result<Option<String>, RunnerError>;

    /// Lint one file. `path` is relative to `root`.
    fn lint_file(&self, root: &Utf8Path, path: &RepoPath) -> Result<LintOutput, RunnerError>;
}
