use lintreport_types::ids::REPORT_SUFFIX;

/// `<seq:03>_<sanitized path>_REPORT.md`.
pub fn report_file_name(seq: u32, path: &str) -> String {
    format!("{seq:03}_{}{REPORT_SUFFIX}", sanitize_path(path))
}

/// Replace every character that is not ASCII alphanumeric, `_` or `-` with `_`.
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
