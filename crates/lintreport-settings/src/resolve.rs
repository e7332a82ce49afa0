use crate::{model::LintreportConfigV1, presets};
use anyhow::Context;
use lintreport_domain::category::compile_globs;
use lintreport_domain::policy::{CategoryRule, EffectiveConfig, FailOn};
use lintreport_types::{FileCategory, SeverityBucket};

/// Values supplied on the command line. These win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub project: Option<String>,
    pub fail_on: Option<String>,
    pub excerpt_chars: Option<u32>,
    pub include_clean: Option<bool>,
    pub program: Option<String>,
    pub max_line_length: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: LintreportConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(project) = overrides.project.clone().or(cfg.project.clone()) {
        effective.project = project;
    }

    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    if let Some(n) = overrides.excerpt_chars.or(cfg.excerpt_chars) {
        effective.excerpt_chars = n as usize;
    }

    if let Some(v) = overrides.include_clean.or(cfg.include_clean) {
        effective.include_clean = v;
    }

    // tool
    if let Some(program) = overrides.program.clone().or(cfg.tool.program.clone()) {
        if program.trim().is_empty() {
            anyhow::bail!("tool.program must not be empty");
        }
        effective.tool.program = program;
    }
    if let Some(n) = overrides.max_line_length.or(cfg.tool.max_line_length) {
        if n == 0 {
            anyhow::bail!("tool.max_line_length must be positive");
        }
        effective.tool.max_line_length = n;
    }
    if !cfg.tool.args.is_empty() {
        effective.tool.args = cfg.tool.args.clone();
    }
    if !cfg.tool.select.is_empty() {
        effective.tool.select = normalize_codes("tool.select", &cfg.tool.select)?;
    }
    if !cfg.tool.ignore.is_empty() {
        effective.tool.ignore = normalize_codes("tool.ignore", &cfg.tool.ignore)?;
    }

    // discovery
    if !cfg.discovery.extensions.is_empty() {
        effective.discovery.extensions = cfg
            .discovery
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
    }
    if !cfg.discovery.exclude.is_empty() {
        compile_globs(&cfg.discovery.exclude).context("invalid discovery.exclude glob")?;
        effective
            .discovery
            .exclude
            .extend(cfg.discovery.exclude.iter().cloned());
    }

    // severity overrides
    for (code, bucket_s) in cfg.severity.iter() {
        let code = code.trim().to_ascii_uppercase();
        let bucket = SeverityBucket::parse(bucket_s).with_context(|| {
            format!("unknown bucket for {code}: {bucket_s} (expected critical|important|cosmetic)")
        })?;
        effective.severity_overrides.insert(code, bucket);
    }

    // user category rules are checked before the built-in ones
    if !cfg.categories.is_empty() {
        let mut rules = Vec::with_capacity(cfg.categories.len() + effective.categories.len());
        for c in &cfg.categories {
            let category = FileCategory::parse(&c.name)
                .with_context(|| format!("unknown category: {}", c.name))?;
            compile_globs(&c.patterns)
                .with_context(|| format!("invalid pattern for category {}", c.name))?;
            rules.push(CategoryRule {
                category,
                patterns: c.patterns.clone(),
            });
        }
        rules.append(&mut effective.categories);
        effective.categories = rules;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "never" => Ok(FailOn::Never),
        "critical" => Ok(FailOn::Critical),
        "any" => Ok(FailOn::Any),
        other => anyhow::bail!("unknown fail_on: {other} (expected never|critical|any)"),
    }
}

fn normalize_codes(field: &str, codes: &[String]) -> anyhow::Result<Vec<String>> {
    codes
        .iter()
        .map(|c| {
            let c = c.trim().to_ascii_uppercase();
            // flake8 accepts prefixes such as `E` or `W29` in --select/--ignore.
            let letters = c.bytes().take_while(|b| b.is_ascii_uppercase()).count();
            let ok = (1..=3).contains(&letters) && c.bytes().skip(letters).all(|b| b.is_ascii_digit());
            if ok {
                Ok(c)
            } else {
                anyhow::bail!("invalid code in {field}: {c}")
            }
        })
        .collect()
}
