//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CategoryConfig, DiscoveryConfig, LintreportConfigV1, ToolConfig};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `lintreport.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LintreportConfigV1> {
    let cfg: LintreportConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the pipeline (profile + config file + overrides).
pub fn resolve_config(
    cfg: LintreportConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// Parse `text` when non-blank, otherwise use defaults, then resolve.
pub fn load(text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    use anyhow::Context;

    let cfg = if text.trim().is_empty() {
        LintreportConfigV1::default()
    } else {
        parse_config_toml(text).context("parse config")?
    };
    resolve_config(cfg, overrides).context("resolve config")
}
