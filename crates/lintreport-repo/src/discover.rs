use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use lintreport_domain::category::compile_globs;
use lintreport_domain::policy::DiscoveryPolicy;
use lintreport_types::RepoPath;
use walkdir::WalkDir;

/// Discover candidate source files under `root`.
///
/// Behavior:
/// - Only regular files whose extension is listed (case-insensitive) are kept.
/// - A file is dropped when its root-relative path matches any exclude glob.
///
/// The result is sorted and deduplicated.
pub fn discover_sources(root: &Utf8Path, policy: &DiscoveryPolicy) -> anyhow::Result<Vec<RepoPath>> {
    let exclude_set = compile_globs(&policy.exclude).context("compile exclude globset")?;

    if !root.is_dir() {
        anyhow::bail!("root is not a directory: {root}");
    }

    let mut out: Vec<RepoPath> = Vec::new();

    for abs in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path().to_path_buf()).ok())
    {
        if !has_extension(&abs, &policy.extensions) {
            continue;
        }
        let rel = RepoPath::relative_to(&abs, root);
        if exclude_set.is_match(rel.as_str()) {
            continue;
        }
        out.push(rel);
    }

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn has_extension(path: &Utf8Path, extensions: &[String]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn policy(exclude: &[&str]) -> DiscoveryPolicy {
        DiscoveryPolicy {
            extensions: vec!["py".to_string()],
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn filters_by_extension_and_sorts() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("z.py"), "");
        write_file(&root.join("a/b.py"), "");
        write_file(&root.join("a/notes.md"), "");
        write_file(&root.join("UPPER.PY"), "");

        let got = discover_sources(&root, &policy(&[])).expect("discover");
        let got: Vec<&str> = got.iter().map(|p| p.as_str()).collect();
        assert_eq!(got, vec!["UPPER.PY", "a/b.py", "z.py"]);
    }

    #[test]
    fn exclude_globs_drop_virtualenvs() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join(".venv/lib/site.py"), "");
        write_file(&root.join("pkg/.venv/x.py"), "");
        write_file(&root.join("pkg/mod.py"), "");

        let got = discover_sources(&root, &policy(&["**/.venv/**"])).expect("discover");
        let got: Vec<&str> = got.iter().map(|p| p.as_str()).collect();
        assert_eq!(got, vec!["pkg/mod.py"]);
    }

    #[test]
    fn root_must_be_a_directory() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("only.py"), "");

        assert!(discover_sources(&root.join("only.py"), &policy(&[])).is_err());
        assert!(discover_sources(&root.join("nope"), &policy(&[])).is_err());
    }
}
