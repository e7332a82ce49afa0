use crate::engine::FileInput;
use lintreport_types::{Diagnostic, FileCategory, RepoPath};
use time::macros::datetime;

/// Expand `(code, count)` pairs into diagnostics on consecutive lines of `a.py`.
pub fn diagnostics_from_counts(counts: &[(&str, u32)]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut line = 1;
    for (code, count) in counts {
        for _ in 0..*count {
            out.push(Diagnostic {
                path: RepoPath::new("a.py"),
                line,
                col: 1,
                code: code.to_string(),
                message: format!("{code} message"),
            });
            line += 1;
        }
    }
    out
}

pub fn raw_output(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| {
            format!(
                "./{}:{}:{}: {} {}\n",
                d.path.as_str(),
                d.line,
                d.col,
                d.code,
                d.message
            )
        })
        .collect()
}

pub fn file_input(seq: u32, path: &str, mut diagnostics: Vec<Diagnostic>) -> FileInput {
    for d in &mut diagnostics {
        d.path = RepoPath::new(path);
    }
    FileInput {
        seq,
        path: RepoPath::new(path),
        category: FileCategory::Script,
        raw_output: raw_output(&diagnostics),
        diagnostics,
        analyzed_at: datetime!(2025-09-14 10:30:00 UTC),
    }
}
