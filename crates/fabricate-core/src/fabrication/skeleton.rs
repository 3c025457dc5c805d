//! The fixed directory layout every generated project shares

use std::path::{Path, PathBuf};

const CIRCLECI_DIR_NAME: &str = ".circleci";
const SRC_DIR_NAME: &str = "src";
const TESTS_DIR_NAME: &str = "tests";
const RESOURCES_DIR_NAME: &str = "resources";

/// Fully qualified paths for the skeleton of a project.
///
/// Computed once per fabrication run from the project root and name;
/// pure data, no I/O. The field comments show example values for a
/// project named `DemoProject` rooted at `$HOME/tmp/DemoProject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonDirectories {
    pub project_root: PathBuf,         // $HOME/tmp/DemoProject
    pub circleci_dir: PathBuf,         // project_root/.circleci
    pub src_dir: PathBuf,              // project_root/src
    pub src_module_dir: PathBuf,       // project_root/src/demoproject
    pub src_module_resources: PathBuf, // project_root/src/demoproject/resources
    pub tests_dir: PathBuf,            // project_root/tests
    pub tests_module_dir: PathBuf,     // project_root/tests/demoproject
    pub tests_resources: PathBuf,      // project_root/tests/resources
}

impl SkeletonDirectories {
    /// Compute the layout for a project. The name is lower-cased exactly once
    /// and reused for both module-named directories.
    pub fn compute(project_root: &Path, project_name: &str) -> Self {
        let module_name = project_name.to_lowercase();
        let src_module_dir = project_root.join(SRC_DIR_NAME).join(&module_name);

        Self {
            project_root: project_root.to_path_buf(),
            circleci_dir: project_root.join(CIRCLECI_DIR_NAME),
            src_dir: project_root.join(SRC_DIR_NAME),
            src_module_resources: src_module_dir.join(RESOURCES_DIR_NAME),
            src_module_dir,
            tests_dir: project_root.join(TESTS_DIR_NAME),
            tests_module_dir: project_root.join(TESTS_DIR_NAME).join(&module_name),
            tests_resources: project_root.join(TESTS_DIR_NAME).join(RESOURCES_DIR_NAME),
        }
    }

    /// Every directory that must be created, in creation order.
    /// The project root is excluded; it is created separately up front.
    pub fn creation_order(&self) -> [&PathBuf; 7] {
        [
            &self.circleci_dir,
            &self.src_dir,
            &self.src_module_dir,
            &self.src_module_resources,
            &self.tests_dir,
            &self.tests_module_dir,
            &self.tests_resources,
        ]
    }

    /// The module-scoped directories that receive an empty `__init__.py`
    /// package marker. The root, source root, and CI directory are exempt.
    pub fn package_marker_dirs(&self) -> [&PathBuf; 4] {
        [
            &self.src_module_dir,
            &self.src_module_resources,
            &self.tests_module_dir,
            &self.tests_resources,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_deterministic() {
        let root = Path::new("/home/dev/tmp/DemoProject");
        let first = SkeletonDirectories::compute(root, "DemoProject");
        let second = SkeletonDirectories::compute(root, "DemoProject");
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_segments_are_lowercased() {
        let root = Path::new("/home/dev/tmp/DemoProject");
        let dirs = SkeletonDirectories::compute(root, "DemoProject");

        assert_eq!(dirs.src_module_dir, root.join("src").join("demoproject"));
        assert_eq!(
            dirs.src_module_resources,
            root.join("src").join("demoproject").join("resources")
        );
        assert_eq!(dirs.tests_module_dir, root.join("tests").join("demoproject"));
        assert_eq!(dirs.tests_resources, root.join("tests").join("resources"));
    }

    #[test]
    fn test_creation_order_excludes_project_root() {
        let root = Path::new("/p");
        let dirs = SkeletonDirectories::compute(root, "demo");
        assert!(!dirs.creation_order().contains(&&dirs.project_root));
        assert_eq!(dirs.creation_order().len(), 7);
    }

    #[test]
    fn test_marker_dirs_exempt_root_src_and_ci() {
        let root = Path::new("/p");
        let dirs = SkeletonDirectories::compute(root, "demo");
        let markers = dirs.package_marker_dirs();
        assert!(!markers.contains(&&dirs.project_root));
        assert!(!markers.contains(&&dirs.src_dir));
        assert!(!markers.contains(&&dirs.circleci_dir));
        assert_eq!(markers.len(), 4);
    }
}
