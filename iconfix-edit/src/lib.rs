//! Edit engine for iconfix.
//!
//! Responsibilities:
//! - Extract the set of icon symbols a file references through a namespace alias.
//! - Synthesize the replacement named import (fixed wrapping rule).
//! - Rewrite qualified references to their bare form.
//! - Orchestrate the passes per file, with precondition/postcondition checks
//!   around the import substitution.
//!
//! Everything here is pure text-in/text-out; reading and persisting files is
//! the pipeline's job (`iconfix-core`).

mod extract;
mod patch;
mod rewrite;
mod rule;
mod synth;
mod transform;

pub use extract::referenced_symbols;
pub use patch::render_patch;
pub use rewrite::strip_qualifiers;
pub use rule::{ImportRule, RuleError};
pub use synth::render_import;
pub use transform::{TransformOutcome, transform_source};
