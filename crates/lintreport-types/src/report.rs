use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Coarse triage tier for a rule code. Declaration order is the priority order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBucket {
    Critical,
    Important,
    Cosmetic,
}

impl SeverityBucket {
    pub const ALL: [SeverityBucket; 3] = [
        SeverityBucket::Critical,
        SeverityBucket::Important,
        SeverityBucket::Cosmetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityBucket::Critical => "critical",
            SeverityBucket::Important => "important",
            SeverityBucket::Cosmetic => "cosmetic",
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "critical" => Some(SeverityBucket::Critical),
            "important" => Some(SeverityBucket::Important),
            "cosmetic" => Some(SeverityBucket::Cosmetic),
            _ => None,
        }
    }
}

/// Category tag attached to every linted file.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileCategory {
    Script,
    Test,
    Security,
    Bot,
    Microservice,
    AiAgent,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 7] = [
        FileCategory::Script,
        FileCategory::Test,
        FileCategory::Security,
        FileCategory::Bot,
        FileCategory::Microservice,
        FileCategory::AiAgent,
        FileCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Script => "SCRIPT",
            FileCategory::Test => "TEST",
            FileCategory::Security => "SECURITY",
            FileCategory::Bot => "BOT",
            FileCategory::Microservice => "MICROSERVICE",
            FileCategory::AiAgent => "AI_AGENT",
            FileCategory::Other => "OTHER",
        }
    }

    /// Case-insensitive parse of the upper-case tag.
    pub fn parse(v: &str) -> Option<Self> {
        let upper = v.trim().to_ascii_uppercase();
        FileCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lint finding as reported by the external checker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    pub path: RepoPath,
    pub line: u32,
    pub col: u32,
    pub code: String,
    pub message: String,
}

/// One row of the per-code distribution table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleCount {
    pub code: String,
    pub count: u32,
    pub bucket: SeverityBucket,
    pub description: String,
}

/// Remediation guidance for one code within a bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub bucket: SeverityBucket,
    pub code: String,
    pub count: u32,
    pub remediation: String,
}

/// Everything known about one linted file.
///
/// `distribution` is sorted by count descending then code ascending;
/// `recommendations` are grouped in bucket priority order and sorted the same way within a bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileReport {
    pub seq: u32,
    pub path: RepoPath,
    pub category: FileCategory,
    pub total: u32,
    pub counts: BTreeMap<String, u32>,
    pub distribution: Vec<RuleCount>,
    pub recommendations: Vec<Recommendation>,
    pub diagnostics: Vec<Diagnostic>,
    /// Checker stdout for this file, verbatim.
    pub raw_output: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub analyzed_at: OffsetDateTime,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    pub fn has_bucket(&self, bucket: SeverityBucket) -> bool {
        self.distribution.iter().any(|r| r.bucket == bucket)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinterMeta {
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BucketCounts {
    pub critical: u32,
    pub important: u32,
    pub cosmetic: u32,
}

impl BucketCounts {
    pub fn add(&mut self, bucket: SeverityBucket, n: u32) {
        match bucket {
            SeverityBucket::Critical => self.critical += n,
            SeverityBucket::Important => self.important += n,
            SeverityBucket::Cosmetic => self.cosmetic += n,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexSummary {
    pub files_scanned: u32,
    pub files_with_findings: u32,
    pub files_clean: u32,
    pub files_failed: u32,
    pub diagnostics_total: u32,
    pub by_bucket: BucketCounts,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCount {
    pub category: FileCategory,
    pub files: u32,
    pub diagnostics: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CodeTotal {
    pub code: String,
    pub bucket: SeverityBucket,
    pub count: u32,
    /// Number of files in which the code occurs at least once.
    pub files: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexEntry {
    pub seq: u32,
    pub path: RepoPath,
    pub category: FileCategory,
    pub total: u32,
    /// Report file name relative to the output directory; absent for clean files that were not rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,
    /// Stable per-diagnostic fingerprints for trending across runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fingerprints: Vec<String>,
}

/// A file the checker could not be run against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LintFailure {
    pub path: RepoPath,
    pub message: String,
}

/// Aggregate of one run (`lintreport.index.v1`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LintIndex {
    pub schema: String,
    pub tool: ToolMeta,
    pub linter: LinterMeta,
    pub project: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub summary: IndexSummary,
    pub categories: Vec<CategoryCount>,
    pub codes: Vec<CodeTotal>,
    pub entries: Vec<IndexEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<LintFailure>,
    /// Full per-file data, present when the run was asked to keep it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<FileReport>,
}
