//! Rendering for report surfaces (per-file Markdown reports and the run index).
//!
//! Rendering is pure: timestamps arrive pre-formatted in the renderable model, so the
//! same input always produces the same bytes.

#![forbid(unsafe_code)]

mod excerpt;
mod filename;
mod index;
mod markdown;
mod model;

pub use excerpt::{CONTINUATION_MARKER, truncate_excerpt};
pub use filename::{report_file_name, sanitize_path};
pub use index::render_index_markdown;
pub use markdown::render_file_markdown;
pub use model::{
    RenderableBucket, RenderableCategoryRow, RenderableCodeRow, RenderableEntryRow,
    RenderableFailure, RenderableFileReport, RenderableIndex, RenderableRecommendation,
    RenderableRow, RenderableSummary, RenderableTier,
};
