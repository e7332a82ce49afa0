/// Line appended after a cut excerpt.
pub const CONTINUATION_MARKER: &str = "...";

/// Cut `raw` to at most `budget` characters (Unicode scalar values).
///
/// Output within budget is returned verbatim. Otherwise the first `budget`
/// characters are kept and the continuation marker follows on its own line.
pub fn truncate_excerpt(raw: &str, budget: usize) -> String {
    match raw.char_indices().nth(budget) {
        None => raw.to_string(),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + CONTINUATION_MARKER.len() + 1);
            out.push_str(&raw[..cut]);
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(CONTINUATION_MARKER);
            out
        }
    }
}
