//! Default filesystem-backed port implementations.

use crate::ports::{SourceLister, SourceRepo, VerifyPort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use iconfix_types::report::VerifyOutcome;
use std::collections::BTreeMap;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Filesystem-backed [`SourceRepo`].
#[derive(Debug, Clone)]
pub struct FsSourceRepo {
    root: Utf8PathBuf,
}

impl FsSourceRepo {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    fn abs(&self, rel: &Utf8Path) -> Utf8PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

impl SourceRepo for FsSourceRepo {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(rel);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }

    fn write(&self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        let abs = self.abs(rel);
        fs::write(&abs, contents).with_context(|| format!("write {}", abs))
    }
}

/// In-memory [`SourceRepo`] for embedding and testing.
#[derive(Debug, Default)]
pub struct MemSourceRepo {
    root: Utf8PathBuf,
    files: Mutex<BTreeMap<Utf8PathBuf, String>>,
}

impl MemSourceRepo {
    pub fn new(files: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            files: Mutex::new(
                files
                    .into_iter()
                    .map(|(p, c)| (Utf8PathBuf::from(p), c.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn contents(&self, rel: &str) -> Option<String> {
        self.files
            .lock()
            .expect("lock files")
            .get(Utf8Path::new(rel))
            .cloned()
    }

    pub fn paths(&self) -> Vec<Utf8PathBuf> {
        self.files.lock().expect("lock files").keys().cloned().collect()
    }
}

impl SourceRepo for MemSourceRepo {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
        self.files
            .lock()
            .expect("lock files")
            .get(rel)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("read {}: no such file", rel))
    }

    fn write(&self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        self.files
            .lock()
            .expect("lock files")
            .insert(rel.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Discovers files by glob patterns relative to the repository root.
#[derive(Debug, Clone)]
pub struct GlobSourceLister {
    root: Utf8PathBuf,
    patterns: Vec<String>,
}

impl GlobSourceLister {
    pub fn new(root: Utf8PathBuf, patterns: Vec<String>) -> Self {
        Self { root, patterns }
    }
}

impl SourceLister for GlobSourceLister {
    fn discover(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut out = Vec::new();
        for pattern in &self.patterns {
            let full = self.root.join(pattern);
            debug!(pattern = %full, "scanning sources");
            for entry in glob::glob(full.as_str()).with_context(|| format!("glob {}", full))? {
                let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
                let utf8 = Utf8PathBuf::from_path_buf(path)
                    .map_err(|p| anyhow::anyhow!("non-utf8 path: {}", p.display()))?;
                let rel = utf8
                    .strip_prefix(&self.root)
                    .map(Utf8Path::to_path_buf)
                    .unwrap_or(utf8);
                out.push(rel);
            }
        }

        // Deterministic order matters.
        out.sort();
        out.dedup();
        Ok(out)
    }
}

/// Runs an external verification command (e.g. `npm run typecheck`) with a
/// poll-based timeout.
#[derive(Debug, Clone)]
pub struct ShellVerifier {
    command: Vec<String>,
    cwd: Utf8PathBuf,
    timeout: Duration,
}

impl ShellVerifier {
    const POLL_INTERVAL: Duration = Duration::from_millis(100);
    const DETAIL_LIMIT: usize = 500;

    pub fn new(command: Vec<String>, cwd: Utf8PathBuf, timeout: Duration) -> Self {
        Self {
            command,
            cwd,
            timeout,
        }
    }
}

impl VerifyPort for ShellVerifier {
    fn verify(&self) -> anyhow::Result<VerifyOutcome> {
        let Some((program, args)) = self.command.split_first() else {
            anyhow::bail!("verify command is empty");
        };

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {}", self.command.join(" ")))?;

        // Output is read only after exit; a child that fills the pipe
        // before finishing runs into the timeout.
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait().context("wait for verify command")? {
                let output = child.wait_with_output().context("collect verify output")?;
                let detail = if status.success() {
                    None
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    let text = if stderr.trim().is_empty() {
                        String::from_utf8_lossy(&output.stdout).into_owned()
                    } else {
                        stderr.into_owned()
                    };
                    Some(truncated(text.trim(), Self::DETAIL_LIMIT))
                };
                return Ok(VerifyOutcome {
                    passed: status.success(),
                    detail,
                });
            }

            if Instant::now() >= deadline {
                child.kill().ok();
                child.wait().ok();
                return Ok(VerifyOutcome {
                    passed: false,
                    detail: Some(format!(
                        "verify command timed out after {}s",
                        self.timeout.as_secs()
                    )),
                });
            }

            std::thread::sleep(Self::POLL_INTERVAL);
        }
    }
}

fn truncated(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}
