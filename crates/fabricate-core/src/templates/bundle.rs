//! Bundled template resource resolution
//!
//! The read-only `*.template` bundle ships as a `templates/` directory next
//! to the installed binary. An environment variable override points the
//! engine at an un-packaged development tree instead, and callers (tests,
//! `--templates-dir`) can bypass discovery entirely with an explicit path.

use crate::fabrication::FabricationError;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable that, when set, supplies the bundle root directly
pub const TEMPLATES_DIR_ENV: &str = "FABRICATE_TEMPLATES_DIR";

const BUNDLE_DIR_NAME: &str = "templates";

/// Where the bundled templates come from
#[derive(Debug, Clone)]
pub enum BundleSource {
    /// Use this directory directly, no discovery
    Explicit(PathBuf),
    /// Environment override first, then packaged and development locations
    Discover,
}

impl BundleSource {
    /// Resolve the bundle to an existing directory.
    ///
    /// Failure here is a fatal configuration error; the fabrication run
    /// cannot proceed without the bundled templates.
    pub fn resolve(&self) -> Result<PathBuf, FabricationError> {
        match self {
            BundleSource::Explicit(path) => {
                if path.is_dir() {
                    Ok(path.clone())
                } else {
                    Err(FabricationError::BundleNotFound {
                        searched: vec![path.clone()],
                    })
                }
            }
            BundleSource::Discover => Self::discover(),
        }
    }

    fn discover() -> Result<PathBuf, FabricationError> {
        // The override is authoritative: if set but wrong, fail fast rather
        // than silently falling back to a packaged copy
        if let Ok(dir) = std::env::var(TEMPLATES_DIR_ENV) {
            let path = PathBuf::from(dir);
            debug!(path = %path.display(), "using {} override", TEMPLATES_DIR_ENV);
            return if path.is_dir() {
                Ok(path)
            } else {
                Err(FabricationError::BundleNotFound {
                    searched: vec![path],
                })
            };
        }

        let mut searched = Vec::new();
        for location in Self::search_locations() {
            let candidate = location.join(BUNDLE_DIR_NAME);
            if candidate.is_dir() {
                debug!(path = %candidate.display(), "bundled templates found");
                return Ok(candidate);
            }
            searched.push(candidate);
        }

        Err(FabricationError::BundleNotFound { searched })
    }

    /// Candidate parents of the bundle directory: next to the executable
    /// (installed layout), then development locations.
    fn search_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                locations.push(exe_dir.to_path_buf());
                if let Some(parent) = exe_dir.parent() {
                    locations.push(parent.to_path_buf());
                }
            }
        }

        if let Ok(current_dir) = std::env::current_dir() {
            locations.push(current_dir);
        }

        // Workspace root when running from a development tree
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let manifest_path = PathBuf::from(manifest_dir);
            if let Some(crates_dir) = manifest_path.parent() {
                if let Some(workspace_root) = crates_dir.parent() {
                    locations.push(workspace_root.to_path_buf());
                }
            }
            locations.push(manifest_path);
        }

        locations
    }
}
