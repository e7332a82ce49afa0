//! Use case orchestration for lintreport.
//!
//! This crate provides the application layer: use cases that coordinate the repo, runner,
//! domain and render layers. It is intentionally thin and delegates heavy lifting to them.
//!
//! The CLI crate depends on this; it only handles argument parsing and process exit codes.

#![forbid(unsafe_code)]

mod explain;
mod ingest;
mod pipeline;
mod render;
mod rerender;
mod scan;

pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use ingest::{IngestInput, run_ingest};
pub use pipeline::{RunOutput, fail_on_exit_code};
pub use render::{format_timestamp, to_renderable_file, to_renderable_index, write_text};
pub use rerender::{RerenderInput, run_rerender};
pub use scan::{ScanInput, run_scan};

/// Output flags shared by `scan` and `ingest`.
#[derive(Clone, Debug, Default)]
pub struct OutputOptions {
    /// Directory receiving reports, `INDEX.md` and (optionally) `index.json`.
    pub out_dir: camino::Utf8PathBuf,
    /// Worker count; `0` lets rayon decide.
    pub jobs: usize,
    /// Write `index.json` with full per-file data embedded.
    pub write_json: bool,
}
