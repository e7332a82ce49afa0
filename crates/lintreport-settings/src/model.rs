use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `lintreport.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LintreportConfigV1 {
    /// Optional schema string for tooling (`lintreport.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `default`, `relaxed`, or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Project name shown in report footers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// When to exit non-zero: `never`, `critical`, or `any`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Character budget for the raw checker excerpt in each report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt_chars: Option<u32>,

    /// Also write reports for files without findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_clean: Option<bool>,

    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Map of rule code -> bucket (`critical`, `important`, `cosmetic`).
    #[serde(default)]
    pub severity: BTreeMap<String, String>,

    /// Extra category rules, checked before the built-in ones.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Extra arguments passed before the file path.
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_line_length: Option<u32>,

    #[serde(default)]
    pub select: Vec<String>,

    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiscoveryConfig {
    /// File extensions to lint, without the dot. Replaces the profile default when set.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Globs (relative to the root) appended to the profile's exclude list.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryConfig {
    /// One of SCRIPT, TEST, SECURITY, BOT, MICROSERVICE, AI_AGENT, OTHER.
    pub name: String,

    #[serde(default)]
    pub patterns: Vec<String>,
}
