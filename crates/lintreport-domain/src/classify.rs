use lintreport_types::SeverityBucket;
use std::collections::BTreeMap;

/// Static rule-code to bucket table.
///
/// Anything not listed (whitespace, line length, unknown plugin codes) is cosmetic.
pub fn default_bucket(code: &str) -> SeverityBucket {
    match code {
        "F401" | "F541" | "F841" | "F821" | "F811" | "E999" => SeverityBucket::Critical,
        "E302" | "E402" | "E128" | "E129" | "E131" | "E261" | "E722" | "E741" | "E712"
        | "E713" => SeverityBucket::Important,
        _ => SeverityBucket::Cosmetic,
    }
}

/// Bucket lookup with per-code overrides from config layered over the static table.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    overrides: BTreeMap<String, SeverityBucket>,
}

impl Classifier {
    pub fn new(overrides: BTreeMap<String, SeverityBucket>) -> Self {
        Self { overrides }
    }

    pub fn bucket(&self, code: &str) -> SeverityBucket {
        self.overrides
            .get(code)
            .copied()
            .unwrap_or_else(|| default_bucket(code))
    }
}
