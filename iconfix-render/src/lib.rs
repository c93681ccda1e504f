//! Rendering helpers (markdown) for human-readable artifacts.

use iconfix_types::outcome::{FileOutcome, OutcomeKind};
use iconfix_types::report::{IconfixReport, VerdictStatus};

pub fn render_fix_md(report: &IconfixReport, outcomes: &[FileOutcome]) -> String {
    let mut out = String::new();
    out.push_str("# iconfix fix\n\n");
    out.push_str(&format!("- Verdict: `{}`\n", status_label(report.verdict.status)));
    out.push_str(&format!(
        "- Files: {} (fixed {}, skipped {}, failed {}, unchanged {})\n",
        report.summary.files_total,
        report.summary.fixed,
        report.summary.skipped,
        report.summary.failed,
        report.summary.unchanged
    ));
    out.push_str(&format!(
        "- Symbols rewired: {}\n",
        report.summary.symbols_rewired
    ));
    if let Some(savings) = &report.savings {
        out.push_str(&format!(
            "- Estimated bundle savings: ~{} KB ({:.1} symbols/file avg)\n",
            savings.estimated_kb, savings.avg_symbols_per_file
        ));
    }
    if let Some(verify) = &report.verify {
        let label = if verify.passed { "passed" } else { "failed" };
        out.push_str(&format!("- Verification: {}\n", label));
        if let Some(detail) = &verify.detail {
            out.push_str(&format!("  - {}\n", detail));
        }
    }
    out.push('\n');

    out.push_str("## Files\n\n");
    if outcomes.is_empty() {
        out.push_str("_No files processed._\n");
        return out;
    }

    for (i, outcome) in outcomes.iter().enumerate() {
        out.push_str(&format!("### {}. `{}`\n\n", i + 1, outcome.path));
        out.push_str(&format!("- Outcome: `{}`\n", kind_label(outcome.kind)));
        if outcome.symbols_rewired > 0 {
            out.push_str(&format!("- Symbols rewired: {}\n", outcome.symbols_rewired));
        }
        if let Some(detail) = &outcome.detail {
            out.push_str(&format!("- Detail: {}\n", detail));
        }
        if let (Some(before), Some(after)) = (&outcome.sha256_before, &outcome.sha256_after) {
            out.push_str(&format!("- `{}` → `{}`\n", before, after));
        }
        out.push('\n');
    }

    out
}

fn kind_label(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Unchanged => "unchanged",
        OutcomeKind::Fixed => "fixed",
        OutcomeKind::Skipped => "skipped",
        OutcomeKind::Failed => "failed",
    }
}

fn status_label(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Pass => "pass",
        VerdictStatus::Warn => "warn",
        VerdictStatus::Fail => "fail",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconfix_types::outcome::{FixSummary, SavingsEstimate};
    use iconfix_types::report::{ToolInfo, Verdict, VerdictStatus, VerifyOutcome};

    fn report() -> IconfixReport {
        IconfixReport::new(ToolInfo {
            name: "iconfix".to_string(),
            version: Some("0.0.0-test".to_string()),
        })
    }

    #[test]
    fn empty_run_renders_placeholder() {
        let md = render_fix_md(&report(), &[]);
        assert!(md.contains("# iconfix fix"));
        assert!(md.contains("_No files processed._"));
    }

    #[test]
    fn outcomes_render_with_details() {
        let mut report = report();
        report.summary = FixSummary {
            files_total: 2,
            fixed: 1,
            skipped: 1,
            symbols_rewired: 3,
            ..Default::default()
        };
        report.savings = SavingsEstimate::from_summary(&report.summary);
        report.verdict = Verdict {
            status: VerdictStatus::Warn,
            counts: Default::default(),
            reasons: vec![],
        };
        report.verify = Some(VerifyOutcome {
            passed: false,
            detail: Some("2 type errors".to_string()),
        });

        let outcomes = vec![
            FileOutcome::fixed("src/App.tsx", 3),
            FileOutcome::skipped("src/Nav.tsx", "symbols referenced but not detected"),
        ];

        let md = render_fix_md(&report, &outcomes);
        assert!(md.contains("- Verdict: `warn`"));
        assert!(md.contains("### 1. `src/App.tsx`"));
        assert!(md.contains("- Outcome: `fixed`"));
        assert!(md.contains("- Symbols rewired: 3"));
        assert!(md.contains("- Detail: symbols referenced but not detected"));
        assert!(md.contains("- Verification: failed"));
        assert!(md.contains("2 type errors"));
        assert!(md.contains("Estimated bundle savings"));
    }
}
