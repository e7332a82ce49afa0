#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableBucket {
    Critical,
    Important,
    Cosmetic,
}

impl RenderableBucket {
    /// Tier heading used in the recommendations section.
    pub fn tier_heading(self) -> &'static str {
        match self {
            RenderableBucket::Critical => "🔴 Критические (исправить в первую очередь)",
            RenderableBucket::Important => "🟡 Важные",
            RenderableBucket::Cosmetic => "🟢 Косметические",
        }
    }

    /// Short label used in index tables.
    pub fn label(self) -> &'static str {
        match self {
            RenderableBucket::Critical => "🔴 критическая",
            RenderableBucket::Important => "🟡 важная",
            RenderableBucket::Cosmetic => "🟢 косметическая",
        }
    }
}

/// One row of the distribution table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRow {
    pub code: String,
    pub count: u32,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRecommendation {
    pub code: String,
    pub count: u32,
    pub remediation: String,
}

/// Recommendations of one bucket. Empty tiers are not rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTier {
    pub bucket: RenderableBucket,
    pub items: Vec<RenderableRecommendation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFileReport {
    pub seq: u32,
    pub path: String,
    pub category: String,
    pub total: u32,
    /// Already sorted: count descending, then code.
    pub rows: Vec<RenderableRow>,
    /// Already in priority order.
    pub tiers: Vec<RenderableTier>,
    /// Checker name used in the raw output heading.
    pub tool: String,
    pub raw_output: String,
    pub excerpt_chars: usize,
    pub analyzed_at: String,
    pub generated_at: String,
    pub project: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableSummary {
    pub files_scanned: u32,
    pub files_with_findings: u32,
    pub files_clean: u32,
    pub files_failed: u32,
    pub diagnostics_total: u32,
    pub critical: u32,
    pub important: u32,
    pub cosmetic: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCategoryRow {
    pub category: String,
    pub files: u32,
    pub diagnostics: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCodeRow {
    pub code: String,
    pub bucket: RenderableBucket,
    pub count: u32,
    pub files: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableEntryRow {
    pub seq: u32,
    pub path: String,
    pub category: String,
    pub total: u32,
    /// `None` when no report was written (clean file without `include_clean`).
    pub report_file: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFailure {
    pub path: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableIndex {
    pub project: String,
    pub tool: String,
    pub started_at: String,
    pub generated_at: String,
    pub summary: RenderableSummary,
    pub categories: Vec<RenderableCategoryRow>,
    /// Already sorted; the renderer only applies the row cap.
    pub codes: Vec<RenderableCodeRow>,
    pub entries: Vec<RenderableEntryRow>,
    pub failures: Vec<RenderableFailure>,
}
