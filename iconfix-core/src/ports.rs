//! Port traits abstracting all I/O away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use iconfix_types::report::VerifyOutcome;

/// Read/write access to the repository being repaired.
///
/// Paths are repository-relative. Writes replace full file contents; the
/// pipeline never issues partial writes.
pub trait SourceRepo {
    fn root(&self) -> &Utf8Path;

    fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String>;

    fn write(&self, rel: &Utf8Path, contents: &str) -> anyhow::Result<()>;
}

/// Discovery of candidate source files (repository-relative paths).
pub trait SourceLister {
    fn discover(&self) -> anyhow::Result<Vec<Utf8PathBuf>>;
}

/// External verification hook (e.g. a type checker), run once after a batch.
pub trait VerifyPort {
    fn verify(&self) -> anyhow::Result<VerifyOutcome>;
}
