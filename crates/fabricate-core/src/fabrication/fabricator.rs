//! The fabrication run: twelve ordered steps from project root to
//! virtual-environment script
//!
//! Each step writes to the filesystem and reports exactly one progress
//! message per artifact created or modified. Steps run strictly in order
//! because later templates assume earlier directories exist; the first
//! failure aborts the run, leaving any partially fabricated tree in place.

use crate::fabrication::error::FabricationError;
use crate::fabrication::progress::ProgressSink;
use crate::fabrication::skeleton::SkeletonDirectories;
use crate::project::ProjectDetails;
use crate::templates::bundle::BundleSource;
use crate::templates::cache::{TemplateCache, TEMPLATE_SUFFIX};
use crate::templates::substitute::{self, Token, TokenMap};
#[cfg(unix)]
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Filename of the Python package marker touched in module directories
pub const PACKAGE_MARKER_FILENAME: &str = "__init__.py";

/// Filename of the version pin written at the project root
pub const PYTHON_VERSION_FILENAME: &str = ".python-version";

const VERSION_TEMPLATE: &str = "_version.py.template";
const LOGGING_CONFIGURATION_TEMPLATE: &str = "loggingConfiguration.json.template";
const TEST_LOGGING_CONFIGURATION_TEMPLATE: &str = "testLoggingConfiguration.json.template";
const CIRCLECI_TEMPLATE: &str = "config.yml.template";
#[cfg(unix)]
const VENV_SCRIPT_TEMPLATE: &str = "createVirtualEnv.sh.template";

/// Templates copied byte-for-byte into the project root
const NO_SUBSTITUTION_TEMPLATES: [&str; 3] = [
    "LICENSE.template",
    "requirements.txt.template",
    ".mypy.ini.template",
];

/// Templates rendered against the full token map before landing in the root
const SUBSTITUTION_TEMPLATES: [&str; 4] = [
    "README.md.template",
    ".gitignore.template",
    "pyproject.toml.template",
    ".envrc.template",
];

// gou+rx on the generated shell script
#[cfg(unix)]
const SCRIPT_PERMISSIONS: u32 = 0o555;

/// Drives one complete fabrication run.
///
/// Not re-entrant: one run per instance, on the calling thread. The only
/// state mutated outside the generated tree is the template cache, and only
/// on its first-ever population.
pub struct Fabricator {
    details: ProjectDetails,
    cache: TemplateCache,
}

impl Fabricator {
    pub fn new(details: ProjectDetails, cache: TemplateCache) -> Self {
        Self { details, cache }
    }

    /// Run all steps against `details.base_directory / details.name`.
    ///
    /// Fails with `ProjectExists` before touching anything when the project
    /// root is already present.
    pub fn fabricate(
        &self,
        bundle: &BundleSource,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        let project_root = self.create_project_root(sink)?;

        self.cache.ensure_populated(bundle)?;

        let dirs = SkeletonDirectories::compute(&project_root, &self.details.name);
        info!(root = %project_root.display(), "project skeleton computed");

        self.create_skeleton_directories(&dirs, sink)?;
        self.create_package_markers(&dirs, sink)?;
        self.create_versioning(&dirs, sink)?;
        self.create_logging_configurations(&dirs, sink)?;
        self.create_ci_configuration(&dirs, sink)?;
        self.copy_no_substitution_files(&dirs, sink)?;
        self.render_substitution_files(&dirs, sink)?;
        self.write_python_version_pin(&dirs, sink)?;
        #[cfg(unix)]
        self.install_venv_script(&dirs, sink)?;

        info!(root = %project_root.display(), "fabrication complete");
        Ok(())
    }

    /// Step 1: the fresh-project guard and the root itself
    fn create_project_root(
        &self,
        sink: &mut dyn ProgressSink,
    ) -> Result<PathBuf, FabricationError> {
        let root = self.details.project_root();

        if root.exists() {
            return Err(FabricationError::ProjectExists { path: root });
        }

        fs::create_dir_all(&root).map_err(|e| FabricationError::io(&root, e))?;
        sink.report(&format!("Created: {}", root.display()));
        Ok(root)
    }

    /// Step 4: every skeleton directory except the root, in a fixed order
    fn create_skeleton_directories(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        for dir in dirs.creation_order() {
            fs::create_dir_all(dir).map_err(|e| FabricationError::io(dir, e))?;
            sink.report(&format!("Created: {}", dir.display()));
        }
        debug!("skeleton directories created");
        Ok(())
    }

    /// Step 5: empty package markers in the module-scoped directories
    fn create_package_markers(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        for dir in dirs.package_marker_dirs() {
            let marker = dir.join(PACKAGE_MARKER_FILENAME);
            write_file(&marker, b"")?;
            sink.report(&format!("Created: {}", marker.display()));
        }
        debug!("package marker files created");
        Ok(())
    }

    /// Step 6: `_version.py` plus the version re-export in the module marker
    fn create_versioning(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        let destination = dirs.src_module_dir.join(destination_name(VERSION_TEMPLATE));
        write_file(&destination, &self.read_template(VERSION_TEMPLATE)?)?;
        sink.report(&format!("Created: {}", destination.display()));

        let import_line = format!(
            "from {}._version import __version__\n",
            self.details.module_name()
        );
        let module_marker = dirs.src_module_dir.join(PACKAGE_MARKER_FILENAME);
        write_file(&module_marker, import_line.as_bytes())?;
        sink.report(&format!("Updated: {}", module_marker.display()));

        info!("versioning capability created");
        Ok(())
    }

    /// Step 7: module logging configuration (rendered) and its verbatim
    /// test-suite counterpart
    fn create_logging_configurations(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        let mut tokens = TokenMap::new();
        tokens.insert(Token::ProjectName, self.details.module_name());

        let text = self.read_template_text(LOGGING_CONFIGURATION_TEMPLATE)?;
        let destination = dirs
            .src_module_resources
            .join(destination_name(LOGGING_CONFIGURATION_TEMPLATE));
        write_file(&destination, substitute::render(&text, &tokens).as_bytes())?;
        sink.report(&format!("Created: {}", destination.display()));

        let test_destination = dirs
            .tests_resources
            .join(destination_name(TEST_LOGGING_CONFIGURATION_TEMPLATE));
        write_file(
            &test_destination,
            &self.read_template(TEST_LOGGING_CONFIGURATION_TEMPLATE)?,
        )?;
        sink.report(&format!("Created: {}", test_destination.display()));

        info!("logging configuration files created");
        Ok(())
    }

    /// Step 8: CI configuration, verbatim
    fn create_ci_configuration(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        let destination = dirs.circleci_dir.join(destination_name(CIRCLECI_TEMPLATE));
        write_file(&destination, &self.read_template(CIRCLECI_TEMPLATE)?)?;
        sink.report(&format!("Created: {}", destination.display()));
        Ok(())
    }

    /// Step 9: byte-for-byte root files
    fn copy_no_substitution_files(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        for template in NO_SUBSTITUTION_TEMPLATES {
            let destination = dirs.project_root.join(destination_name(template));
            write_file(&destination, &self.read_template(template)?)?;
            sink.report(&format!("Created: {}", destination.display()));
        }
        Ok(())
    }

    /// Step 10: root files rendered against the full project token map
    fn render_substitution_files(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        let tokens = substitute::project_tokens(&self.details);

        for template in SUBSTITUTION_TEMPLATES {
            let text = self.read_template_text(template)?;
            let destination = dirs.project_root.join(destination_name(template));
            write_file(&destination, substitute::render(&text, &tokens).as_bytes())?;
            sink.report(&format!("Created: {}", destination.display()));
        }
        Ok(())
    }

    /// Step 11: pin the target Python version at the project root
    fn write_python_version_pin(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        let destination = dirs.project_root.join(PYTHON_VERSION_FILENAME);
        write_file(&destination, self.details.python_version.to_string().as_bytes())?;
        sink.report(&format!(
            "Pinned Python version {} at {}",
            self.details.python_version,
            destination.display()
        ));
        Ok(())
    }

    /// Step 12: the dated virtual-environment script, marked executable
    #[cfg(unix)]
    fn install_venv_script(
        &self,
        dirs: &SkeletonDirectories,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), FabricationError> {
        use std::os::unix::fs::PermissionsExt;

        let mut tokens = substitute::date_tokens(&Local::now());
        tokens.insert(Token::PythonVersion, self.details.python_version.to_string());

        let text = self.read_template_text(VENV_SCRIPT_TEMPLATE)?;
        let destination = dirs.project_root.join(destination_name(VENV_SCRIPT_TEMPLATE));
        write_file(&destination, substitute::render(&text, &tokens).as_bytes())?;
        sink.report(&format!("Created: {}", destination.display()));

        fs::set_permissions(&destination, fs::Permissions::from_mode(SCRIPT_PERMISSIONS))
            .map_err(|e| FabricationError::io(&destination, e))?;
        sink.report(&format!("Marked executable: {}", destination.display()));
        Ok(())
    }

    fn read_template(&self, name: &str) -> Result<Vec<u8>, FabricationError> {
        let path = self.cache.template_path(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FabricationError::MissingTemplate {
                    name: name.to_string(),
                    path,
                })
            }
            Err(e) => Err(FabricationError::io(path, e)),
        }
    }

    fn read_template_text(&self, name: &str) -> Result<String, FabricationError> {
        let path = self.cache.template_path(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FabricationError::MissingTemplate {
                    name: name.to_string(),
                    path,
                })
            }
            Err(e) => Err(FabricationError::io(path, e)),
        }
    }
}

/// Destination filename of a template: its name with the suffix stripped
fn destination_name(template: &str) -> &str {
    template.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(template)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), FabricationError> {
    fs::write(path, contents).map_err(|e| FabricationError::io(path, e))
}

/// How many progress messages one successful run produces.
///
/// 1 root + 7 directories + 4 markers + 2 versioning + 2 logging configs +
/// 1 CI + 3 verbatim root files + 4 rendered root files + 1 version pin,
/// plus the script write and its permission change on Unix.
pub fn expected_progress_count() -> usize {
    let base = 1 + 7 + 4 + 2 + 2 + 1 + NO_SUBSTITUTION_TEMPLATES.len() + SUBSTITUTION_TEMPLATES.len() + 1;
    if cfg!(unix) {
        base + 2
    } else {
        base
    }
}
