use lintreport_domain::category::default_rules;
use lintreport_domain::policy::{DiscoveryPolicy, EffectiveConfig, FailOn, ToolPolicy};
use lintreport_types::ids;
use std::collections::BTreeMap;

pub const DEFAULT_PROJECT: &str = "AI Security Assistant";
pub const DEFAULT_EXCERPT_CHARS: usize = 1000;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "relaxed" => relaxed_profile(),
        "strict" => strict_profile(),
        // default
        _ => default_profile(),
    }
}

fn default_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "default".to_string(),
        project: DEFAULT_PROJECT.to_string(),
        fail_on: FailOn::Never,
        excerpt_chars: DEFAULT_EXCERPT_CHARS,
        include_clean: false,
        tool: flake8(79, Vec::new()),
        discovery: default_discovery(),
        severity_overrides: BTreeMap::new(),
        categories: default_rules(),
    }
}

fn relaxed_profile() -> EffectiveConfig {
    // Black-compatible: longer lines, no complaints about operator line breaks or slice spacing.
    EffectiveConfig {
        profile: "relaxed".to_string(),
        tool: flake8(120, vec!["E203", "W503", "W504"]),
        ..default_profile()
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Critical,
        include_clean: true,
        ..default_profile()
    }
}

fn flake8(max_line_length: u32, ignore: Vec<&str>) -> ToolPolicy {
    ToolPolicy {
        program: ids::DEFAULT_LINTER.to_string(),
        args: Vec::new(),
        max_line_length,
        select: Vec::new(),
        ignore: ignore.into_iter().map(str::to_string).collect(),
    }
}

fn default_discovery() -> DiscoveryPolicy {
    DiscoveryPolicy {
        extensions: vec!["py".to_string()],
        exclude: [
            "**/.git/**",
            "**/.venv/**",
            "**/venv/**",
            "**/__pycache__/**",
            "**/node_modules/**",
            "**/.tox/**",
            "**/build/**",
            "**/dist/**",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
    }
}
