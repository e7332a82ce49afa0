//! CLI entry point for lintreport.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and exit
//! codes. All business logic lives in the `lintreport-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use lintreport_app::{
    ExplainOutput, IngestInput, OutputOptions, RerenderInput, RunOutput, ScanInput,
    format_explanation, format_not_found, run_explain, run_ingest, run_rerender, run_scan,
};
use lintreport_domain::Classifier;
use lintreport_settings::Overrides;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "LINTREPORT_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "lintreport",
    version,
    about = "Per-file flake8 reports and a run index for Python source trees"
)]
struct Cli {
    /// Root of the source tree to lint.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Path to lintreport config TOML (relative paths resolve against --root).
    #[arg(long, default_value = "lintreport.toml")]
    config: Utf8PathBuf,

    /// Override profile (default|relaxed|strict).
    #[arg(long)]
    profile: Option<String>,

    /// Debug logging (overridden by LINTREPORT_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Directory for reports and INDEX.md.
    #[arg(long, default_value = "lint_reports")]
    out: Utf8PathBuf,

    /// Worker threads (0 = one per CPU, 1 = sequential).
    #[arg(long, default_value = "0")]
    jobs: usize,

    /// Also write reports for files without findings.
    #[arg(long)]
    include_clean: bool,

    /// Character budget for the raw checker excerpt in each report.
    #[arg(long)]
    excerpt_chars: Option<u32>,

    /// Write index.json with full per-file data (needed by `md`).
    #[arg(long)]
    write_json: bool,

    /// Exit 2 when findings reach this level (never|critical|any).
    #[arg(long)]
    fail_on: Option<String>,

    /// Project name shown in report footers.
    #[arg(long)]
    project: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enumerate the tree, run flake8 per file, write reports.
    Scan {
        #[command(flatten)]
        output: OutputArgs,

        /// Checker program (default: flake8).
        #[arg(long)]
        program: Option<String>,

        /// Override flake8 --max-line-length.
        #[arg(long)]
        max_line_length: Option<u32>,
    },

    /// Build reports from a saved whole-tree flake8 run (no process is spawned).
    Ingest {
        /// File holding flake8 output (`flake8 --count --statistics . > lint.txt`).
        #[arg(long)]
        input: Utf8PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-render Markdown from an index.json written with --write-json.
    Md {
        /// Path to index.json.
        #[arg(long, default_value = "lint_reports/index.json")]
        reports: Utf8PathBuf,

        /// Output directory.
        #[arg(long, default_value = "lint_reports")]
        out: Utf8PathBuf,
    },

    /// Explain a flake8 rule code with remediation guidance.
    Explain {
        /// Rule code, e.g. E501.
        code: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.cmd {
        Commands::Scan {
            output,
            program,
            max_line_length,
        } => cmd_scan(&cli, output, program.clone(), *max_line_length),
        Commands::Ingest { input, output } => cmd_ingest(&cli, input, output),
        Commands::Md { reports, out } => cmd_md(&cli, reports, out),
        Commands::Explain { code } => cmd_explain(&cli, code),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("lintreport error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Missing config file is allowed (defaults apply).
fn read_config(cli: &Cli) -> String {
    let path = cli.root.join(&cli.config);
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            tracing::debug!(config = %path, "config loaded");
            text
        }
        Err(_) => {
            tracing::debug!(config = %path, "no config file; using profile defaults");
            String::new()
        }
    }
}

fn overrides(cli: &Cli, output: &OutputArgs) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        project: output.project.clone(),
        fail_on: output.fail_on.clone(),
        excerpt_chars: output.excerpt_chars,
        include_clean: output.include_clean.then_some(true),
        ..Overrides::default()
    }
}

fn options(output: &OutputArgs) -> OutputOptions {
    OutputOptions {
        out_dir: output.out.clone(),
        jobs: output.jobs,
        write_json: output.write_json,
    }
}

fn cmd_scan(
    cli: &Cli,
    output: &OutputArgs,
    program: Option<String>,
    max_line_length: Option<u32>,
) -> anyhow::Result<i32> {
    if !cli.root.is_dir() {
        anyhow::bail!("root is not a directory: {}", cli.root);
    }
    let cfg_text = read_config(cli);
    let run = run_scan(ScanInput {
        root: &cli.root,
        config_text: &cfg_text,
        overrides: Overrides {
            program,
            max_line_length,
            ..overrides(cli, output)
        },
        output: options(output),
    })?;
    print_summary(&run, &output.out);
    Ok(run.exit_code())
}

fn cmd_ingest(cli: &Cli, input: &Utf8Path, output: &OutputArgs) -> anyhow::Result<i32> {
    let recorded = std::fs::read_to_string(input)
        .with_context(|| format!("read checker output: {}", input))?;
    let cfg_text = read_config(cli);
    let run = run_ingest(IngestInput {
        root: &cli.root,
        config_text: &cfg_text,
        overrides: overrides(cli, output),
        recorded: &recorded,
        output: options(output),
    })?;
    print_summary(&run, &output.out);
    Ok(run.exit_code())
}

fn cmd_md(cli: &Cli, reports: &Utf8Path, out: &Utf8Path) -> anyhow::Result<i32> {
    let index_text = std::fs::read_to_string(reports)
        .with_context(|| format!("read index: {}", reports))?;
    let cfg_text = read_config(cli);
    let run = run_rerender(RerenderInput {
        index_text: &index_text,
        config_text: &cfg_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
            ..Overrides::default()
        },
        out_dir: out.to_path_buf(),
    })?;
    println!("lintreport: wrote {} files to {}", run.written.len(), out);
    Ok(0)
}

fn cmd_explain(cli: &Cli, code: &str) -> anyhow::Result<i32> {
    let cfg_text = read_config(cli);
    let effective = lintreport_settings::load(
        &cfg_text,
        Overrides {
            profile: cli.profile.clone(),
            ..Overrides::default()
        },
    )?
    .effective;
    let classifier = Classifier::new(effective.severity_overrides);

    match run_explain(code, &classifier) {
        ExplainOutput::Found {
            explanation,
            bucket,
        } => {
            print!("{}", format_explanation(&explanation, bucket));
            Ok(0)
        }
        ExplainOutput::NotFound {
            code,
            bucket,
            available_codes,
        } => {
            eprint!("{}", format_not_found(&code, bucket, &available_codes));
            Ok(1)
        }
    }
}

fn print_summary(run: &RunOutput, out: &Utf8Path) {
    let s = &run.index.summary;
    println!(
        "lintreport: {} files ({} with findings, {} clean, {} failed), {} diagnostics; reports in {}",
        s.files_scanned, s.files_with_findings, s.files_clean, s.files_failed, s.diagnostics_total, out
    );
}
