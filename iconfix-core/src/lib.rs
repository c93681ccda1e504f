//! Embeddable core library for iconfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a larger host process or driving from tests.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SourceRepo`](ports::SourceRepo) — read and persist repository files
//! - [`SourceLister`](ports::SourceLister) — discover candidate files
//! - [`VerifyPort`](ports::VerifyPort) — run the post-batch verification hook
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry point
//!
//! - [`run_fix`](pipeline::run_fix) — transform a worklist, producing
//!   per-file outcomes, an aggregate report, and a unified patch

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the rule type so callers don't need iconfix-edit directly.
pub use iconfix_edit::{ImportRule, RuleError};
