//! One-file transform orchestration.
//!
//! Wires extractor → synthesizer → rewriter over a single file's text and
//! enforces the checks around the import substitution. Total: every input
//! classifies into exactly one outcome, nothing panics, nothing escapes.

use crate::extract::referenced_symbols;
use crate::rewrite::strip_qualifiers;
use crate::rule::ImportRule;
use crate::synth::render_import;
use tracing::debug;

/// Outcome of transforming one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// No wildcard import present; nothing to do.
    Unchanged,
    /// Wildcard import present but the file needs manual review.
    Skipped { reason: String },
    /// The rewrite could not be completed safely; original text kept.
    Failed { reason: String },
    /// Rewritten successfully. `symbols` is the extracted set in
    /// lexicographic order; `text` is the full replacement content.
    Fixed { symbols: Vec<String>, text: String },
}

impl TransformOutcome {
    pub fn symbols_rewired(&self) -> u64 {
        match self {
            TransformOutcome::Fixed { symbols, .. } => symbols.len() as u64,
            _ => 0,
        }
    }
}

/// Transform one file's content according to the rule.
///
/// The single extraction pass feeds both import synthesis and reference
/// rewriting, so the two can never disagree about the symbol set. The
/// substitution itself anchors to [`ImportRule::canonical_import`]; a
/// wildcard import that detection found but substitution could not remove
/// (non-canonical formatting) classifies as `Failed` so it surfaces for
/// manual follow-up instead of being silently left behind.
pub fn transform_source(rule: &ImportRule, text: &str) -> TransformOutcome {
    if !rule.has_wildcard_import(text) {
        return TransformOutcome::Unchanged;
    }

    if rule.wildcard_import_count(text) > 1 {
        return TransformOutcome::Skipped {
            reason: format!(
                "multiple wildcard imports of '{}'; merge them manually",
                rule.module()
            ),
        };
    }

    let symbols = referenced_symbols(rule, text);
    if symbols.is_empty() {
        return TransformOutcome::Skipped {
            reason: "symbols referenced but not detected".to_string(),
        };
    }

    debug!(count = symbols.len(), alias = rule.alias(), "extracted symbols");

    let import = render_import(rule, &symbols);
    let substituted = text.replacen(&rule.canonical_import(), &import, 1);

    let rewritten = match strip_qualifiers(rule, &substituted, &symbols) {
        Ok(t) => t,
        Err(e) => {
            return TransformOutcome::Failed {
                reason: format!("{e:#}"),
            };
        }
    };

    // Postcondition: no trace of the wildcard import may survive a fix.
    if rule.has_wildcard_import(&rewritten) {
        return TransformOutcome::Failed {
            reason: "import substitution did not take effect".to_string(),
        };
    }

    TransformOutcome::Fixed {
        symbols: symbols.into_iter().collect(),
        text: rewritten,
    }
}
