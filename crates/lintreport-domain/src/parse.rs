//! Parser for flake8 default-format output.
//!
//! Three line shapes are recognized:
//! - diagnostics: `<path>:<line>:<col>: <CODE> <message>`
//! - `--statistics` tally: `<count>  <CODE> <message>`
//! - `--count` total: a bare integer
//!
//! Anything else is counted as unrecognized and otherwise ignored; it still
//! appears in the raw excerpt because the excerpt is the verbatim output.

use lintreport_types::{Diagnostic, RepoPath};
use std::collections::BTreeMap;

/// Result of parsing one checker run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedOutput {
    /// Diagnostics in output order.
    pub diagnostics: Vec<Diagnostic>,
    /// `--statistics` tally: code -> count.
    pub statistics: BTreeMap<String, u32>,
    /// `--count` total, when present.
    pub reported_total: Option<u32>,
    /// Non-empty lines that matched no known shape.
    pub unrecognized: usize,
}

impl ParsedOutput {
    /// True when the checker's own tally disagrees with the parsed diagnostics.
    ///
    /// Only meaningful when statistics or a total were emitted.
    pub fn tally_mismatch(&self) -> bool {
        let parsed = self.diagnostics.len() as u32;
        if let Some(total) = self.reported_total
            && total != parsed
        {
            return true;
        }
        if !self.statistics.is_empty() {
            let mut by_code: BTreeMap<&str, u32> = BTreeMap::new();
            for d in &self.diagnostics {
                *by_code.entry(d.code.as_str()).or_default() += 1;
            }
            let stats: BTreeMap<&str, u32> = self
                .statistics
                .iter()
                .map(|(k, v)| (k.as_str(), *v))
                .collect();
            return by_code != stats;
        }
        false
    }
}

pub fn parse_output(text: &str) -> ParsedOutput {
    let mut out = ParsedOutput::default();

    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if let Some(d) = parse_diagnostic_line(line) {
            out.diagnostics.push(d);
        } else if let Some((code, count)) = parse_statistics_line(line) {
            *out.statistics.entry(code).or_default() += count;
        } else if let Some(total) = parse_digits(line.trim()) {
            out.reported_total = Some(total);
        } else {
            out.unrecognized += 1;
        }
    }

    out
}

/// Parse one `<path>:<line>:<col>: <CODE> <message>` line.
///
/// The path may itself contain `:` (Windows drive letters), so every colon is
/// tried as the path terminator until the remainder parses.
pub fn parse_diagnostic_line(line: &str) -> Option<Diagnostic> {
    for (idx, _) in line.match_indices(':') {
        if idx == 0 {
            continue;
        }
        if let Some(d) = parse_after_path(&line[..idx], &line[idx + 1..]) {
            return Some(d);
        }
    }
    None
}

fn parse_after_path(path: &str, rest: &str) -> Option<Diagnostic> {
    let (line_s, rest) = rest.split_once(':')?;
    let line = parse_digits(line_s)?;
    let (col_s, rest) = rest.split_once(':')?;
    let col = parse_digits(col_s)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let (code, message) = rest.split_once(' ').unwrap_or((rest, ""));
    if !is_rule_code(code) {
        return None;
    }
    Some(Diagnostic {
        path: RepoPath::new(path),
        line,
        col,
        code: code.to_string(),
        message: message.trim().to_string(),
    })
}

fn parse_statistics_line(line: &str) -> Option<(String, u32)> {
    let mut parts = line.split_whitespace();
    let count = parse_digits(parts.next()?)?;
    let code = parts.next()?;
    if !is_rule_code(code) {
        return None;
    }
    Some((code.to_string(), count))
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// One to three upper-case letters followed by digits (`E501`, `W293`, `SIM102`).
pub fn is_rule_code(s: &str) -> bool {
    let letters = s.bytes().take_while(|b| b.is_ascii_uppercase()).count();
    (1..=3).contains(&letters)
        && s.len() > letters
        && s.bytes().skip(letters).all(|b| b.is_ascii_digit())
}

/// Group the diagnostic lines of a whole-tree run by file.
///
/// Each value holds that file's lines verbatim, newline-terminated, in output
/// order. Statistics and count lines are run-wide and are dropped.
pub fn split_by_path(text: &str) -> BTreeMap<RepoPath, String> {
    let mut out: BTreeMap<RepoPath, String> = BTreeMap::new();
    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');
        if let Some(d) = parse_diagnostic_line(line) {
            let buf = out.entry(d.path).or_default();
            buf.push_str(line);
            buf.push('\n');
        }
    }
    out
}
