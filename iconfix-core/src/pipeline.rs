//! Core fix pipeline, extracted from the CLI.
//!
//! The entry point is I/O-agnostic: all filesystem access goes through the
//! port traits, every file is processed to completion independently, and the
//! running totals are threaded through an explicit accumulator. A failure in
//! one file never aborts the batch.

use crate::ports::{SourceLister, SourceRepo, VerifyPort};
use crate::settings::FixSettings;
use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::Utc;
use iconfix_edit::{ImportRule, TransformOutcome, render_patch, transform_source};
use iconfix_types::outcome::{FileOutcome, FixSummary, SavingsEstimate};
use iconfix_types::report::{
    Counts, IconfixReport, RunInfo, ToolInfo, Verdict, VerdictStatus, VerifyOutcome,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Outcome of [`run_fix`].
pub struct FixRunOutcome {
    pub report: IconfixReport,
    pub outcomes: Vec<FileOutcome>,
    pub patch: String,
    /// True when at least one file classified as failed (exit code 2).
    pub any_failed: bool,
}

/// Run the fix pipeline over the configured worklist.
///
/// Rewritten text is persisted through the repo port only for fixed files
/// and only when `settings.dry_run` is false. The verification hook runs
/// once after the whole batch; its result is recorded in the report and
/// never alters an already-classified outcome.
pub fn run_fix(
    settings: &FixSettings,
    repo: &dyn SourceRepo,
    lister: &dyn SourceLister,
    verifier: Option<&dyn VerifyPort>,
    tool: ToolInfo,
) -> anyhow::Result<FixRunOutcome> {
    let rule = ImportRule::new(&settings.alias, &settings.module)
        .context("build import rule")?
        .with_symbols_per_line(settings.symbols_per_line);

    let started_at = Utc::now();
    let worklist = build_worklist(settings, lister)?;
    info!(files = worklist.len(), "processing worklist");

    let mut outcomes: Vec<FileOutcome> = Vec::new();
    let mut summary = FixSummary::default();
    let mut patch = String::new();

    for path in &worklist {
        let (outcome, fragment, modified) = process_file(&rule, repo, path, settings.dry_run);
        debug!(path = %path, kind = ?outcome.kind, "classified");
        summary.record(&outcome, modified);
        if let Some(fragment) = fragment {
            patch.push_str(&fragment);
        }
        outcomes.push(outcome);
    }

    let verify = verifier.map(|port| match port.verify() {
        Ok(outcome) => outcome,
        Err(e) => VerifyOutcome {
            passed: false,
            detail: Some(format!("{e:#}")),
        },
    });

    let any_failed = summary.failed > 0;
    let report = report_from_run(summary, verify, tool, started_at);

    Ok(FixRunOutcome {
        report,
        outcomes,
        patch,
        any_failed,
    })
}

/// Assemble the worklist: priority files first, then discovery.
///
/// Discovery is consulted when `process_all` is set, or when no priority
/// list is configured at all (a bare run should still cover the repo).
fn build_worklist(
    settings: &FixSettings,
    lister: &dyn SourceLister,
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out: Vec<Utf8PathBuf> = Vec::new();
    let mut seen = std::collections::BTreeSet::new();

    for path in &settings.priority_files {
        let path = Utf8PathBuf::from(path);
        if seen.insert(path.clone()) {
            out.push(path);
        }
    }

    if settings.process_all || settings.priority_files.is_empty() {
        for path in lister.discover().context("discover source files")? {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    Ok(out)
}

fn process_file(
    rule: &ImportRule,
    repo: &dyn SourceRepo,
    path: &Utf8PathBuf,
    dry_run: bool,
) -> (FileOutcome, Option<String>, bool) {
    let text = match repo.read_to_string(path) {
        Ok(text) => text,
        Err(e) => return (FileOutcome::failed(path.as_str(), format!("{e:#}")), None, false),
    };

    match transform_source(rule, &text) {
        TransformOutcome::Unchanged => (FileOutcome::unchanged(path.as_str()), None, false),
        TransformOutcome::Skipped { reason } => {
            (FileOutcome::skipped(path.as_str(), reason), None, false)
        }
        TransformOutcome::Failed { reason } => {
            (FileOutcome::failed(path.as_str(), reason), None, false)
        }
        TransformOutcome::Fixed { symbols, text: new_text } => {
            if !dry_run {
                if let Err(e) = repo.write(path, &new_text) {
                    return (
                        FileOutcome::failed(path.as_str(), format!("write back: {e:#}")),
                        None,
                        false,
                    );
                }
            }

            let mut outcome = FileOutcome::fixed(path.as_str(), symbols.len() as u64);
            outcome.sha256_before = Some(sha256_hex(text.as_bytes()));
            outcome.sha256_after = Some(sha256_hex(new_text.as_bytes()));

            let fragment = render_patch(path, &text, &new_text);
            (outcome, Some(fragment), !dry_run)
        }
    }
}

fn report_from_run(
    summary: FixSummary,
    verify: Option<VerifyOutcome>,
    tool: ToolInfo,
    started_at: chrono::DateTime<Utc>,
) -> IconfixReport {
    let status = if summary.failed > 0 {
        VerdictStatus::Fail
    } else if summary.skipped > 0 {
        VerdictStatus::Warn
    } else {
        VerdictStatus::Pass
    };

    let mut reasons = Vec::new();
    if summary.failed > 0 {
        reasons.push("fix_failures".to_string());
    }
    if summary.skipped > 0 {
        reasons.push("manual_review_needed".to_string());
    }

    let mut report = IconfixReport::new(tool);
    report.run = RunInfo {
        started_at: Some(started_at),
        ended_at: Some(Utc::now()),
    };
    report.verdict = Verdict {
        status,
        counts: Counts {
            fixed: summary.fixed,
            skipped: summary.skipped,
            failed: summary.failed,
        },
        reasons,
    };
    report.savings = SavingsEstimate::from_summary(&summary);
    report.data = Some(serde_json::json!({
        "iconfix": {
            "fix": {
                "files_total": summary.files_total,
                "unchanged": summary.unchanged,
                "fixed": summary.fixed,
                "skipped": summary.skipped,
                "failed": summary.failed,
                "symbols_rewired": summary.symbols_rewired,
                "files_modified": summary.files_modified,
                "fix_performed": summary.files_modified > 0,
            }
        }
    }));
    report.summary = summary;
    report.verify = verify;
    report
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
