//! The `md` use case: re-render Markdown from a saved `index.json`.

use crate::pipeline::RunOutput;
use crate::render::{RenderSettings, to_renderable_file, to_renderable_index, write_text};
use anyhow::Context;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use lintreport_render::{render_file_markdown, render_index_markdown};
use lintreport_settings::Overrides;
use lintreport_types::{LintIndex, ids};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct RerenderInput<'a> {
    /// Contents of an `index.json` written with full per-file data.
    pub index_text: &'a str,
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub out_dir: Utf8PathBuf,
}

/// Rewrites every report listed in the index plus `INDEX.md`.
///
/// Timestamps come from the index, so output matches the original run byte for byte
/// when the excerpt budget is unchanged.
pub fn run_rerender(input: RerenderInput<'_>) -> anyhow::Result<RunOutput> {
    let index: LintIndex = serde_json::from_str(input.index_text).context("parse index json")?;
    if index.schema != ids::SCHEMA_INDEX_V1 {
        anyhow::bail!(
            "unsupported index schema: {} (expected {})",
            index.schema,
            ids::SCHEMA_INDEX_V1
        );
    }
    if index.reports.is_empty() && index.entries.iter().any(|e| e.report_file.is_some()) {
        anyhow::bail!("index has no embedded reports; re-run scan with --write-json");
    }
    for name in index.entries.iter().filter_map(|e| e.report_file.as_deref()) {
        if !is_plain_file_name(name) {
            anyhow::bail!("invalid report file name in index: {name:?}");
        }
    }

    let effective = lintreport_settings::load(input.config_text, input.overrides)?.effective;
    let settings = RenderSettings {
        project: index.project.clone(),
        tool: index.linter.program.clone(),
        excerpt_chars: effective.excerpt_chars,
        generated_at: index.finished_at,
    };

    let by_seq: BTreeMap<u32, _> = index.reports.iter().map(|r| (r.seq, r)).collect();
    let mut written = Vec::new();
    for entry in &index.entries {
        let Some(name) = &entry.report_file else {
            continue;
        };
        let Some(report) = by_seq.get(&entry.seq) else {
            warn!(seq = entry.seq, path = %entry.path, "no embedded report for entry");
            continue;
        };
        let path = input.out_dir.join(name);
        write_text(&path, &render_file_markdown(&to_renderable_file(report, &settings)))?;
        written.push(path);
    }

    let index_md = input.out_dir.join(ids::INDEX_MARKDOWN);
    write_text(&index_md, &render_index_markdown(&to_renderable_index(&index)))?;
    written.push(index_md);

    info!(reports = written.len() - 1, out_dir = %input.out_dir, "reports re-rendered");

    Ok(RunOutput {
        index,
        fail_on: effective.fail_on,
        written,
    })
}

/// A single normal path component: no separators, no `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Utf8Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Utf8Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IngestInput, OutputOptions, run_ingest};
    use camino::Utf8Path;
    use tempfile::TempDir;

    const RECORDED: &str = "\
./a.py:1:1: F401 'os' imported but unused
./b.py:2:1: W293 blank line contains whitespace
./b.py:3:1: W293 blank line contains whitespace
";

    fn dir(tmp: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().join(name)).expect("utf8 path")
    }

    #[test]
    fn rerender_reproduces_original_bytes() {
        let tmp = TempDir::new().expect("temp dir");
        let first = dir(&tmp, "first");
        let out = run_ingest(IngestInput {
            root: Utf8Path::new("."),
            config_text: "",
            overrides: Overrides::default(),
            recorded: RECORDED,
            output: OutputOptions {
                out_dir: first.clone(),
                jobs: 2,
                write_json: true,
            },
        })
        .expect("ingest");
        assert_eq!(out.index.reports.len(), 2);

        let index_text = std::fs::read_to_string(first.join("index.json")).expect("index json");
        let second = dir(&tmp, "second");
        let again = run_rerender(RerenderInput {
            index_text: &index_text,
            config_text: "",
            overrides: Overrides::default(),
            out_dir: second.clone(),
        })
        .expect("rerender");
        assert_eq!(again.written.len(), 3);

        for name in ["001_a_py_REPORT.md", "002_b_py_REPORT.md", "INDEX.md"] {
            let a = std::fs::read_to_string(first.join(name)).expect("first");
            let b = std::fs::read_to_string(second.join(name)).expect("second");
            assert_eq!(a, b, "{name} differs after re-render");
        }
    }

    #[test]
    fn rejects_index_without_reports() {
        let tmp = TempDir::new().expect("temp dir");
        let first = dir(&tmp, "first");
        run_ingest(IngestInput {
            root: Utf8Path::new("."),
            config_text: "",
            overrides: Overrides::default(),
            recorded: RECORDED,
            output: OutputOptions {
                out_dir: first.clone(),
                jobs: 1,
                write_json: true,
            },
        })
        .expect("ingest");

        let text = std::fs::read_to_string(first.join("index.json")).expect("index json");
        let mut value: serde_json::Value = serde_json::from_str(&text).expect("json");
        value
            .as_object_mut()
            .expect("object")
            .remove("reports");
        let stripped = serde_json::to_string(&value).expect("serialize");

        let err = run_rerender(RerenderInput {
            index_text: &stripped,
            config_text: "",
            overrides: Overrides::default(),
            out_dir: dir(&tmp, "second"),
        })
        .expect_err("must fail");
        assert!(format!("{err:#}").contains("--write-json"));
    }

    #[test]
    fn rejects_report_names_that_leave_the_output_directory() {
        let tmp = TempDir::new().expect("temp dir");
        let first = dir(&tmp, "first");
        run_ingest(IngestInput {
            root: Utf8Path::new("."),
            config_text: "",
            overrides: Overrides::default(),
            recorded: RECORDED,
            output: OutputOptions {
                out_dir: first.clone(),
                jobs: 1,
                write_json: true,
            },
        })
        .expect("ingest");

        let text = std::fs::read_to_string(first.join("index.json")).expect("index json");
        let mut value: serde_json::Value = serde_json::from_str(&text).expect("json");
        value["entries"][0]["report_file"] = serde_json::Value::from("../escaped.md");
        let tampered = serde_json::to_string(&value).expect("serialize");

        let second = dir(&tmp, "second");
        let err = run_rerender(RerenderInput {
            index_text: &tampered,
            config_text: "",
            overrides: Overrides::default(),
            out_dir: second.clone(),
        })
        .expect_err("must fail");
        assert!(format!("{err:#}").contains("invalid report file name"));
        assert!(!tmp.path().join("escaped.md").exists());
        assert!(!second.join("INDEX.md").exists());
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("001_a_py_REPORT.md"));
        assert!(!is_plain_file_name("../x.md"));
        assert!(!is_plain_file_name("sub/x.md"));
        assert!(!is_plain_file_name("..\\x.md"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name("/etc/passwd"));
    }
}
