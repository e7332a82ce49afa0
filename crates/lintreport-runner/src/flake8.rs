use crate::{LintOutput, LintTool, RunnerError};
use camino::Utf8Path;
use lintreport_domain::policy::ToolPolicy;
use lintreport_types::RepoPath;
use std::io::ErrorKind;
use std::process::Command;
use tracing::{debug, warn};

/// flake8 invoked once per file with `--count --statistics`.
///
/// Exit status 0 means clean and 1 means findings; anything else is a failure.
#[derive(Clone, Debug)]
pub struct Flake8 {
    policy: ToolPolicy,
}

impl Flake8 {
    pub fn new(policy: ToolPolicy) -> Self {
        Self { policy }
    }

    /// Arguments passed after the program name.
    pub fn command_args(&self, path: &RepoPath) -> Vec<String> {
        let mut args = self.policy.args.clone();
        args.push("--count".to_string());
        args.push("--statistics".to_string());
        args.push(format!("--max-line-length={}", self.policy.max_line_length));
        if !self.policy.select.is_empty() {
            args.push(format!("--select={}", self.policy.select.join(",")));
        }
        if !self.policy.ignore.is_empty() {
            // extend, so flake8's own default ignore list stays in effect
            args.push(format!("--extend-ignore={}", self.policy.ignore.join(",")));
        }
        args.push(path.as_str().to_string());
        args
    }

    fn spawn_error(&self, err: std::io::Error) -> RunnerError {
        if err.kind() == ErrorKind::NotFound {
            RunnerError::ToolNotFound {
                program: self.policy.program.clone(),
            }
        } else {
            RunnerError::Spawn {
                program: self.policy.program.clone(),
                source: err,
            }
        }
    }
}

impl LintTool for Flake8 {
    fn name(&self) -> &str {
        &self.policy.program
    }

    fn probe(&self) -> Result<Option<String>, RunnerError> {
        let output = Command::new(&self.policy.program)
            .arg("--version")
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(RunnerError::Failed {
                program: self.policy.program.clone(),
                path: "--version".to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()))
    }

    fn lint_file(&self, root: &Utf8Path, path: &RepoPath) -> Result<LintOutput, RunnerError> {
        debug!(path = %path, program = %self.policy.program, "running checker");

        let output = Command::new(&self.policy.program)
            .args(self.command_args(path))
            .current_dir(root)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let code = output.status.code();
        if !matches!(code, Some(0) | Some(1)) {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(path = %path, ?code, "checker failed");
            return Err(RunnerError::Failed {
                program: self.policy.program.clone(),
                path: path.as_str().to_string(),
                code,
                stderr,
            });
        }

        Ok(LintOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code: code,
        })
    }
}
