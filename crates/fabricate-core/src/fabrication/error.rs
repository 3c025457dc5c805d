//! Error types for fabrication runs

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can abort a fabrication run
///
/// The two fatal categories callers are expected to distinguish are
/// `BundleNotFound` (packaging misconfiguration, nothing to be done) and
/// `ProjectExists` (the user can pick a different name or base directory).
/// `Io` failures are propagated unchanged with the offending path attached;
/// the run is never retried and partially fabricated trees are left in place.
#[derive(Debug, Error)]
pub enum FabricationError {
    /// The bundled template resources could not be located
    #[error("bundled templates not found (searched {searched:?})")]
    BundleNotFound { searched: Vec<PathBuf> },

    /// No per-user configuration directory exists on this platform
    #[error("unable to determine a configuration directory for this platform")]
    NoConfigDir,

    /// The destination project directory already exists
    #[error("project path already exists: {path}")]
    ProjectExists { path: PathBuf },

    /// A template expected in the cache is missing (likely deleted by the user)
    #[error("template `{name}` not found in cache at {path}")]
    MissingTemplate { name: String, path: PathBuf },

    /// A filesystem operation failed
    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FabricationError {
    /// Attach the offending path to an I/O error
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
