use serde::{Deserialize, Serialize};

/// Classification of one file after a transform attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// No wildcard import present; the file was left alone.
    Unchanged,
    /// Rewritten and (unless dry-run) written back.
    Fixed,
    /// Wildcard import present but the file needs manual review.
    Skipped,
    /// The rewrite could not be completed; the original text was kept.
    Failed,
}

/// Driver-facing record for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: String,
    pub kind: OutcomeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default)]
    pub symbols_rewired: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

impl FileOutcome {
    pub fn unchanged(path: impl Into<String>) -> Self {
        Self::bare(path, OutcomeKind::Unchanged, None)
    }

    pub fn fixed(path: impl Into<String>, symbols_rewired: u64) -> Self {
        let mut out = Self::bare(path, OutcomeKind::Fixed, None);
        out.symbols_rewired = symbols_rewired;
        out
    }

    pub fn skipped(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::bare(path, OutcomeKind::Skipped, Some(reason.into()))
    }

    pub fn failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::bare(path, OutcomeKind::Failed, Some(reason.into()))
    }

    fn bare(path: impl Into<String>, kind: OutcomeKind, detail: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            detail,
            symbols_rewired: 0,
            sha256_before: None,
            sha256_after: None,
        }
    }
}

/// Running totals across one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub files_total: u64,
    pub unchanged: u64,
    pub fixed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub symbols_rewired: u64,
    pub files_modified: u64,
}

impl FixSummary {
    /// Fold one outcome into the totals. `modified` is true only when the
    /// rewritten text was actually persisted (not a dry-run).
    pub fn record(&mut self, outcome: &FileOutcome, modified: bool) {
        self.files_total += 1;
        match outcome.kind {
            OutcomeKind::Unchanged => self.unchanged += 1,
            OutcomeKind::Fixed => {
                self.fixed += 1;
                self.symbols_rewired += outcome.symbols_rewired;
                if modified {
                    self.files_modified += 1;
                }
            }
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Failed => self.failed += 1,
        }
    }
}

/// Informational bundle-size estimate.
///
/// A wildcard import pulls the library's full icon surface into the bundle
/// (~2.5 MB for the canonical library); a named import costs roughly 3 KB
/// per icon. Purely informational, never load-bearing for correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub estimated_kb: u64,
    pub avg_symbols_per_file: f64,
}

impl SavingsEstimate {
    pub const WILDCARD_COST_KB: u64 = 2500;
    pub const SYMBOL_COST_KB: u64 = 3;

    /// Derive the estimate from batch totals. Returns `None` when nothing
    /// was fixed (there is nothing to estimate).
    pub fn from_summary(summary: &FixSummary) -> Option<Self> {
        if summary.fixed == 0 {
            return None;
        }
        let avg = summary.symbols_rewired as f64 / summary.fixed as f64;
        let named_cost = (avg * Self::SYMBOL_COST_KB as f64) as u64;
        let per_file = Self::WILDCARD_COST_KB.saturating_sub(named_cost);
        Some(Self {
            estimated_kb: per_file * summary.fixed,
            avg_symbols_per_file: avg,
        })
    }
}
