//! Stable identifiers for schemas and tools.

// Schemas
pub const SCHEMA_INDEX_V1: &str = "lintreport.index.v1";
pub const SCHEMA_CONFIG_V1: &str = "lintreport.config.v1";

// Tools
pub const TOOL_NAME: &str = "lintreport";
pub const DEFAULT_LINTER: &str = "flake8";

// Output artifacts
pub const INDEX_MARKDOWN: &str = "INDEX.md";
pub const INDEX_JSON: &str = "index.json";
pub const REPORT_SUFFIX: &str = "_REPORT.md";
