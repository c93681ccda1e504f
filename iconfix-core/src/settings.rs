//! Clap-free settings for the fix pipeline.

use camino::Utf8PathBuf;
use iconfix_edit::ImportRule;

/// Default discovery patterns, relative to the repository root.
pub const DEFAULT_INCLUDE: &[&str] = &[
    "src/**/*.tsx",
    "src/**/*.ts",
    "src/**/*.jsx",
    "src/**/*.js",
];

/// Settings for the fix pipeline.
#[derive(Debug, Clone)]
pub struct FixSettings {
    pub repo_root: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,

    // Rule
    pub alias: String,
    pub module: String,
    pub symbols_per_line: usize,

    // Worklist
    pub include: Vec<String>,
    /// Files to process first, in the given order.
    pub priority_files: Vec<String>,
    /// Continue past the priority list into everything discovered. When the
    /// priority list is empty the whole discovery set is processed anyway.
    pub process_all: bool,

    // Behaviour
    pub dry_run: bool,
}

impl Default for FixSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            out_dir: Utf8PathBuf::from("artifacts/iconfix"),
            alias: ImportRule::DEFAULT_ALIAS.to_string(),
            module: ImportRule::DEFAULT_MODULE.to_string(),
            symbols_per_line: ImportRule::DEFAULT_SYMBOLS_PER_LINE,
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            priority_files: Vec::new(),
            process_all: false,
            dry_run: true,
        }
    }
}
