use lintreport_types::{FileCategory, SeverityBucket};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Never,
    Critical,
    Any,
}

/// How the external checker is invoked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolPolicy {
    pub program: String,
    pub args: Vec<String>,
    pub max_line_length: u32,
    pub select: Vec<String>,
    pub ignore: Vec<String>,
}

/// Which files the enumerator yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryPolicy {
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

/// Ordered path rule; the first rule whose glob matches decides the category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: FileCategory,
    pub patterns: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: FileCategory, patterns: &[&str]) -> Self {
        Self {
            category,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Name shown in report footers and the index title.
    pub project: String,
    pub fail_on: FailOn,
    /// Character budget for the raw checker excerpt.
    pub excerpt_chars: usize,
    /// Render reports for files without findings too.
    pub include_clean: bool,
    pub tool: ToolPolicy,
    pub discovery: DiscoveryPolicy,
    pub severity_overrides: BTreeMap<String, SeverityBucket>,
    pub categories: Vec<CategoryRule>,
}
