//! Project metadata collected by the wizard

use semver::Version;
use std::path::PathBuf;

/// Everything the fabricator needs to know about the project being created.
///
/// Built once by the caller (wizard or CLI flags) and treated as immutable
/// for the duration of a fabrication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    /// Project name, used verbatim as the project directory name
    pub name: String,

    /// Owner full name, substituted into generated files
    pub owner_name: String,

    /// Owner email address, substituted into generated files
    pub owner_email: String,

    /// One-line project description
    pub description: String,

    /// Comma-separated keyword list, passed through as a single value
    pub keywords: String,

    /// Existing directory under which the project directory is created
    pub base_directory: PathBuf,

    /// Target Python version (major.minor.patch)
    pub python_version: Version,
}

impl ProjectDetails {
    /// The importable module name: the project name, lower-cased
    pub fn module_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Where the generated project will live
    pub fn project_root(&self) -> PathBuf {
        self.base_directory.join(&self.name)
    }
}
