use crate::policy::CategoryRule;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use lintreport_types::{FileCategory, RepoPath};

/// Compiled, ordered category rules.
#[derive(Clone, Debug)]
pub struct CategoryMatcher {
    rules: Vec<(FileCategory, GlobSet)>,
}

impl CategoryMatcher {
    pub fn new(rules: &[CategoryRule]) -> Result<Self, globset::Error> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            compiled.push((rule.category, compile_globs(&rule.patterns)?));
        }
        Ok(Self { rules: compiled })
    }

    /// First matching rule wins; unmatched paths are `OTHER`.
    pub fn categorize(&self, path: &RepoPath) -> FileCategory {
        self.rules
            .iter()
            .find(|(_, set)| set.is_match(path.as_str()))
            .map(|(c, _)| *c)
            .unwrap_or(FileCategory::Other)
    }
}

/// `*` never crosses `/`; use `**` for any depth. Matching ignores case.
pub fn compile_globs(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(
            GlobBuilder::new(p)
                .literal_separator(true)
                .case_insensitive(true)
                .build()?,
        );
    }
    b.build()
}

/// Built-in rules, checked in this order.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            FileCategory::Test,
            &[
                "**/tests/**",
                "**/test/**",
                "**/test_*.py",
                "**/*_test.py",
                "**/conftest.py",
            ],
        ),
        CategoryRule::new(
            FileCategory::Security,
            &["**/security/**", "**/*security*", "**/*auth*.py"],
        ),
        CategoryRule::new(
            FileCategory::AiAgent,
            &["**/ai_agent*/**", "**/agents/**", "**/*agent*.py"],
        ),
        CategoryRule::new(
            FileCategory::Bot,
            &["**/bot/**", "**/bots/**", "**/*_bot.py", "**/bot_*.py", "**/bot.py"],
        ),
        CategoryRule::new(
            FileCategory::Microservice,
            &["**/microservice*/**", "**/services/**", "**/*_service.py"],
        ),
        CategoryRule::new(FileCategory::Script, &["**/scripts/**", "**/bin/**", "*.py"]),
    ]
}
