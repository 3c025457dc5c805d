//! User-editable template cache, seeded once from the bundled resources

use crate::fabrication::FabricationError;
use crate::templates::bundle::BundleSource;
use crate::APPLICATION_NAME;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Suffix every template file carries; stripped when computing destinations
pub const TEMPLATE_SUFFIX: &str = ".template";

const TEMPLATES_DIR_NAME: &str = "templates";

/// The on-disk working copy of the templates.
///
/// Lives in the per-user configuration directory, outside any generated
/// project. Populated at most once from the bundle; after that the cache is
/// authoritative and user edits are never overwritten.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    dir: PathBuf,
}

impl TemplateCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The standard cache location: `<config_dir>/fabricate/templates`
    pub fn default_dir() -> Result<PathBuf, FabricationError> {
        let config_dir = dirs::config_dir().ok_or(FabricationError::NoConfigDir)?;
        Ok(config_dir.join(APPLICATION_NAME).join(TEMPLATES_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a template inside the cache
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Seed the cache from the bundle if it does not exist yet.
    ///
    /// Every `*.template` file found anywhere under the bundle directory is
    /// copied into the flat cache directory under its own filename; the
    /// bundle's subdirectory structure is not preserved. An existing cache
    /// directory makes this a no-op, returning `false`.
    pub fn ensure_populated(&self, bundle: &BundleSource) -> Result<bool, FabricationError> {
        if self.dir.exists() {
            debug!(dir = %self.dir.display(), "template cache already populated");
            return Ok(false);
        }

        let bundle_dir = bundle.resolve()?;

        fs::create_dir_all(&self.dir).map_err(|e| FabricationError::io(&self.dir, e))?;

        let mut copied = 0usize;
        for entry in WalkDir::new(&bundle_dir) {
            let entry = entry.map_err(|e| FabricationError::io(&bundle_dir, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !file_name.ends_with(TEMPLATE_SUFFIX) {
                continue;
            }

            let destination = self.dir.join(file_name.as_ref());
            let contents =
                fs::read(entry.path()).map_err(|e| FabricationError::io(entry.path(), e))?;
            fs::write(&destination, contents).map_err(|e| FabricationError::io(&destination, e))?;
            copied += 1;
        }

        info!(
            dir = %self.dir.display(),
            copied,
            "template cache seeded from {}",
            bundle_dir.display()
        );
        Ok(true)
    }
}
