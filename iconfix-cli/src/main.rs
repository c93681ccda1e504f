mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use iconfix_core::adapters::{FsSourceRepo, GlobSourceLister, ShellVerifier};
use iconfix_core::pipeline::{FixRunOutcome, run_fix};
use iconfix_core::ports::VerifyPort;
use iconfix_core::settings::FixSettings;
use iconfix_render::render_fix_md;
use iconfix_types::report::ToolInfo;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "iconfix",
    version,
    about = "Rewrites wildcard icon imports into narrow named imports."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Detect wildcard imports and report what a fix would do (no writes).
    Scan(RunArgs),
    /// Rewrite offending files in place (use --dry-run to preview).
    Fix(FixArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Output directory for artifacts (default: <repo_root>/artifacts/iconfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Namespace alias to repair (overrides config).
    #[arg(long)]
    alias: Option<String>,

    /// Module the wildcard import pulls from (overrides config).
    #[arg(long)]
    module: Option<String>,

    /// Process every discovered file, not just the configured priority list.
    #[arg(long, default_value_t = false)]
    all: bool,
}

#[derive(Debug, Parser)]
struct FixArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Compute and report everything but write nothing back.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Skip the post-fix verification command.
    #[arg(long, default_value_t = false)]
    no_verify: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Scan(args) => cmd_scan(args),
        Command::Fix(args) => cmd_fix(args),
    };

    match result {
        Ok(any_failed) if any_failed => ExitCode::from(2),
        Ok(_) => ExitCode::from(0),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn cmd_scan(args: RunArgs) -> anyhow::Result<bool> {
    let (settings, _verify) = build_settings(&args, true)?;
    let outcome = run(&settings, None)?;
    print_summary(&outcome, true);
    Ok(outcome.any_failed)
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<bool> {
    let (mut settings, verify_cfg) = build_settings(&args.run, false)?;
    settings.dry_run = args.dry_run;

    let verifier = if args.no_verify || args.dry_run || !verify_cfg.enabled {
        None
    } else {
        Some(ShellVerifier::new(
            verify_cfg.command.clone(),
            settings.repo_root.clone(),
            Duration::from_secs(verify_cfg.timeout_secs),
        ))
    };

    let outcome = run(&settings, verifier.as_ref().map(|v| v as &dyn VerifyPort))?;
    print_summary(&outcome, args.dry_run);
    Ok(outcome.any_failed)
}

fn build_settings(
    args: &RunArgs,
    dry_run: bool,
) -> anyhow::Result<(FixSettings, config::VerifyConfig)> {
    let file_config = config::load_or_default(&args.repo_root).context("load iconfix.toml")?;

    let settings = FixSettings {
        repo_root: args.repo_root.clone(),
        out_dir: args
            .out_dir
            .clone()
            .unwrap_or_else(|| args.repo_root.join("artifacts").join("iconfix")),
        alias: args
            .alias
            .clone()
            .unwrap_or_else(|| file_config.imports.alias.clone()),
        module: args
            .module
            .clone()
            .unwrap_or_else(|| file_config.imports.module.clone()),
        symbols_per_line: file_config.imports.symbols_per_line,
        include: file_config.files.include.clone(),
        priority_files: file_config.files.priority.clone(),
        process_all: args.all || file_config.files.process_all,
        dry_run,
    };

    Ok((settings, file_config.verify))
}

fn run(settings: &FixSettings, verifier: Option<&dyn VerifyPort>) -> anyhow::Result<FixRunOutcome> {
    let repo = FsSourceRepo::new(settings.repo_root.clone());
    let lister = GlobSourceLister::new(settings.repo_root.clone(), settings.include.clone());
    let tool = tool_info();

    let outcome = run_fix(settings, &repo, &lister, verifier, tool).context("run fix pipeline")?;

    write_artifacts(&outcome, &settings.out_dir)?;
    info!("wrote artifacts to {}", settings.out_dir);
    Ok(outcome)
}

fn write_artifacts(outcome: &FixRunOutcome, out_dir: &Utf8Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir))?;

    write_json(&out_dir.join("report.json"), &outcome.report)?;

    let outcomes = serde_json::json!({
        "schema": iconfix_types::schema::ICONFIX_OUTCOMES_V1,
        "outcomes": outcome.outcomes,
    });
    write_json(&out_dir.join("outcomes.json"), &outcomes)?;

    fs::write(
        out_dir.join("fix.md"),
        render_fix_md(&outcome.report, &outcome.outcomes),
    )?;
    fs::write(out_dir.join("patch.diff"), &outcome.patch)?;

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn print_summary(outcome: &FixRunOutcome, dry_run: bool) {
    let summary = &outcome.report.summary;
    let mode = if dry_run { " (dry-run)" } else { "" };

    println!("iconfix{mode}");
    println!(
        "  files: {}  fixed: {}  skipped: {}  failed: {}  unchanged: {}",
        summary.files_total, summary.fixed, summary.skipped, summary.failed, summary.unchanged
    );
    println!("  symbols rewired: {}", summary.symbols_rewired);
    if let Some(savings) = &outcome.report.savings {
        println!(
            "  estimated bundle savings: ~{} KB ({:.1} symbols/file avg)",
            savings.estimated_kb, savings.avg_symbols_per_file
        );
    }
    if let Some(verify) = &outcome.report.verify {
        let label = if verify.passed { "passed" } else { "failed" };
        println!("  verification: {label}");
        if let Some(detail) = &verify.detail {
            println!("    {detail}");
        }
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "iconfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
