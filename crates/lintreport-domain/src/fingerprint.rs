use lintreport_types::Diagnostic;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a diagnostic.
///
/// Identity fields:
/// - path (root-relative)
/// - code
/// - line and column
/// - message
pub fn fingerprint_for_diagnostic(d: &Diagnostic) -> String {
    let line = d.line.to_string();
    let col = d.col.to_string();
    let parts = [
        d.path.as_str(),
        d.code.as_str(),
        line.as_str(),
        col.as_str(),
        d.message.as_str(),
    ];
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
