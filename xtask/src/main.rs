//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use lintreport_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|_| std::env::current_dir())
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_index_schema() -> schemars::Schema {
    schema_for!(lintreport_types::LintIndex)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(lintreport_settings::LintreportConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "lintreport.index.v1.json",
            generate: generate_index_schema,
        },
        SchemaSpec {
            filename: "lintreport.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to serialize schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

fn validation_errors(validator: &jsonschema::Validator, value: &serde_json::Value) -> Vec<String> {
    validator
        .iter_errors(value)
        .map(|e| format!("{} at {}", e, e.instance_path()))
        .collect()
}

fn lintreport_bin() -> anyhow::Result<PathBuf> {
    let bin = project_root().join("target").join("debug").join("lintreport");

    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "lintreport binary not found at {}.\n\
            Run `cargo build -p lintreport-cli` first.",
            bin.display()
        );
    }
    Ok(bin)
}

/// Ingest the recorded fixture run and return the parsed `index.json`.
fn ingest_fixture(bin: &Path, jobs: usize) -> anyhow::Result<serde_json::Value> {
    let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
    let out = temp_dir.path().join("out");

    let output = std::process::Command::new(bin)
        .arg("--root")
        .arg(temp_dir.path())
        .arg("ingest")
        .arg("--input")
        .arg(fixtures_dir().join("sample_project.flake8.txt"))
        .arg("--out")
        .arg(&out)
        .arg("--jobs")
        .arg(jobs.to_string())
        .arg("--write-json")
        .output()
        .context("Failed to run lintreport")?;
    if !output.status.success() {
        bail!(
            "lintreport ingest failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let text = fs::read_to_string(out.join("index.json")).context("Failed to read index.json")?;
    serde_json::from_str(&text).context("Failed to parse index.json")
}

/// Check internal invariants of an index that the schema cannot express.
fn index_invariants(index: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let reports = index["reports"].as_array().cloned().unwrap_or_default();

    for report in &reports {
        let path = report["path"].as_str().unwrap_or("?");
        let total = report["total"].as_u64().unwrap_or(0);
        let sum: u64 = report["counts"]
            .as_object()
            .map(|m| m.values().filter_map(|v| v.as_u64()).sum())
            .unwrap_or(0);
        if total != sum {
            errors.push(format!("{path}: total {total} != sum of counts {sum}"));
        }

        let rows = report["distribution"].as_array().cloned().unwrap_or_default();
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ac, bc) = (a["count"].as_u64(), b["count"].as_u64());
            let ordered = ac > bc || (ac == bc && a["code"].as_str() < b["code"].as_str());
            if !ordered {
                errors.push(format!("{path}: distribution out of order at {}", b["code"]));
            }
        }
    }

    let seqs: Vec<u64> = index["entries"]
        .as_array()
        .map(|e| e.iter().filter_map(|x| x["seq"].as_u64()).collect())
        .unwrap_or_default();
    if seqs.iter().enumerate().any(|(i, s)| *s != i as u64 + 1) {
        errors.push(format!("entry sequence numbers are not 1..n: {seqs:?}"));
    }

    errors
}

/// Validate lintreport output against the generated schemas.
///
/// This checks:
/// 1. The example config parses and conforms to the config schema
/// 2. `index.json` from the fixture run conforms to the index schema
/// 3. Index invariants (totals, ordering, sequence numbers)
/// 4. Output is identical for one and several workers (after timestamp normalization)
fn conform() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    let config_validator = compile(&generate_config_schema())?;
    let config_path = fixtures_dir().join("lintreport.example.toml");
    let config_text = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = lintreport_settings::parse_config_toml(&config_text).context("parse example config")?;
    lintreport_settings::resolve_config(config.clone(), Default::default())
        .context("resolve example config")?;
    let config_value = serde_json::to_value(&config).context("serialize example config")?;
    errors.extend(
        validation_errors(&config_validator, &config_value)
            .into_iter()
            .map(|e| format!("lintreport.example.toml: {e}")),
    );
    println!("✓ example config checked");

    let bin = lintreport_bin()?;
    let index_validator = compile(&generate_index_schema())?;
    let sequential = ingest_fixture(&bin, 1)?;
    errors.extend(
        validation_errors(&index_validator, &sequential)
            .into_iter()
            .map(|e| format!("index.json: {e}")),
    );
    errors.extend(index_invariants(&sequential));
    println!("✓ index.json checked against schema");

    let parallel = ingest_fixture(&bin, 4)?;
    if normalize_nondeterministic(sequential) != normalize_nondeterministic(parallel) {
        errors.push("index.json differs between --jobs 1 and --jobs 4".to_string());
    }
    println!("✓ worker count does not change output");

    if errors.is_empty() {
        println!("\n✓ All conformance checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance failed with {} errors", errors.len())
    }
}

/// Codes the classifier places above cosmetic; each needs a registry entry.
const CLASSIFIED_CODES: &[&str] = &[
    "E128", "E129", "E131", "E261", "E302", "E402", "E712", "E713", "E722", "E741", "E999",
    "F401", "F541", "F811", "F821", "F841",
];

fn explain_coverage() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for code in CLASSIFIED_CODES {
        if lintreport_types::lookup_rule(code).is_none() {
            errors.push(format!("Code '{}' has no explanation", code));
        }
    }

    let mut count = 0;
    for code in lintreport_types::all_codes() {
        count += 1;
        match lintreport_types::lookup_rule(code) {
            Some(exp) => {
                if exp.description.trim().is_empty() {
                    errors.push(format!("Code '{}' has empty description", code));
                }
                if exp.remediation.trim().is_empty() {
                    errors.push(format!("Code '{}' has empty remediation", code));
                }
            }
            None => errors.push(format!("Code '{}' is listed but not found", code)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} codes have explanations", count);
        println!("✓ {} classified codes covered", CLASSIFIED_CODES.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate lintreport output against generated schemas");
    eprintln!("  explain-coverage  Validate all classified codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", lintreport_types::ids::SCHEMA_INDEX_V1);
            println!("{}", lintreport_types::ids::SCHEMA_CONFIG_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
