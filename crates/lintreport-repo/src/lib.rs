//! Repository adapters: walk a source tree and tag each candidate file with a category.
//!
//! This crate is allowed to do filesystem IO. It does not spawn external processes;
//! running the checker is `lintreport-runner`'s job.

#![forbid(unsafe_code)]

mod discover;

use anyhow::Context;
use camino::Utf8Path;
use lintreport_domain::CategoryMatcher;
use lintreport_domain::policy::{CategoryRule, DiscoveryPolicy};
use lintreport_types::{FileCategory, RepoPath};

pub use discover::discover_sources;

/// A file selected for linting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: RepoPath,
    pub category: FileCategory,
}

/// Discover source files under `root` and categorize them, in sorted path order.
pub fn enumerate_sources(
    root: &Utf8Path,
    discovery: &DiscoveryPolicy,
    categories: &[CategoryRule],
) -> anyhow::Result<Vec<SourceFile>> {
    let matcher = CategoryMatcher::new(categories).context("compile category rules")?;
    let paths = discover_sources(root, discovery).context("discover sources")?;
    Ok(paths
        .into_iter()
        .map(|path| SourceFile {
            category: matcher.categorize(&path),
            path,
        })
        .collect())
}
