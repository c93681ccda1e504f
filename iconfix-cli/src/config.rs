//! Configuration file loading for iconfix.
//!
//! Discovers and loads `iconfix.toml` from the repository root and merges
//! it with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use iconfix_core::ImportRule;
use iconfix_core::settings::DEFAULT_INCLUDE;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "iconfix.toml";

/// Top-level configuration from iconfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IconfixConfig {
    /// Which import to repair and how to format the replacement.
    pub imports: ImportsConfig,

    /// Worklist settings.
    pub files: FilesConfig,

    /// Post-batch verification settings.
    pub verify: VerifyConfig,
}

/// Imports section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportsConfig {
    /// Namespace alias the wildcard import binds (e.g. `Icons`).
    pub alias: String,

    /// Module the wildcard import pulls from (e.g. `lucide-react`).
    pub module: String,

    /// Wrap threshold: symbols per line in the synthesized import.
    pub symbols_per_line: usize,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            alias: ImportRule::DEFAULT_ALIAS.to_string(),
            module: ImportRule::DEFAULT_MODULE.to_string(),
            symbols_per_line: ImportRule::DEFAULT_SYMBOLS_PER_LINE,
        }
    }
}

/// Files section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Discovery globs, relative to the repository root.
    pub include: Vec<String>,

    /// Files to process first, in order.
    pub priority: Vec<String>,

    /// Continue past the priority list into everything discovered.
    pub process_all: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            priority: Vec::new(),
            process_all: false,
        }
    }
}

/// Verify section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Whether to run the verification command after a fix run.
    pub enabled: bool,

    /// Command to run, argv style.
    pub command: Vec<String>,

    /// Timeout for the verification command.
    pub timeout_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["npm".to_string(), "run".to_string(), "typecheck".to_string()],
            timeout_secs: 60,
        }
    }
}

/// Discover the iconfix.toml config file in the repository root.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an iconfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<IconfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<IconfixConfig> {
    let config: IconfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the repo root, or return defaults if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<IconfixConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(IconfixConfig::default()),
    }
}
