//! Shared test utilities for the lintreport workspace.
//!
//! This crate exists because `xtask` needs the normalizers at runtime (not behind
//! `#[cfg(test)]`), so a test module inside `lintreport-types` would not suffice.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Markdown line prefixes that are followed by a run-dependent timestamp.
const TIMESTAMP_PREFIXES: &[(&str, &str)] = &[
    ("**Дата анализа:** ", ""),
    ("*🤖 Отчет сгенерирован автоматически: ", "*"),
    ("*🤖 Индекс сгенерирован автоматически: ", "*"),
];

/// Normalize non-deterministic JSON fields of an `index.json` for golden-file comparison.
///
/// 1. **Root-only**: `tool.version` and `linter.version` are replaced with `"__VERSION__"`
///    only when the root object looks like an index (`schema`, `tool`, `linter`, `summary`,
///    `entries`).
///
/// 2. **Recursive**: `started_at`, `finished_at` and `analyzed_at` are normalized at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_index = ["schema", "tool", "linter", "summary", "entries"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_index {
            for key in ["tool", "linter"] {
                if let Some(meta) = obj.get_mut(key).and_then(Value::as_object_mut)
                    && meta.contains_key("version")
                {
                    meta.insert(
                        "version".to_string(),
                        Value::String(VERSION_PLACEHOLDER.to_string()),
                    );
                }
            }
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at", "analyzed_at"] {
                if map.contains_key(key) {
                    map.insert(
                        key.to_string(),
                        Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                    );
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// Replace report and index timestamps in rendered Markdown with `__TIMESTAMP__`.
pub fn normalize_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(b) => (b, "\n"),
            None => (line, ""),
        };
        let replaced = TIMESTAMP_PREFIXES.iter().find_map(|&(prefix, suffix)| {
            body.strip_prefix(prefix)
                .filter(|rest| rest.ends_with(suffix))
                .map(|_| format!("{prefix}{TIMESTAMP_PLACEHOLDER}{suffix}"))
        });
        match replaced {
            Some(r) => out.push_str(&r),
            None => out.push_str(body),
        }
        out.push_str(newline);
    }
    out
}
