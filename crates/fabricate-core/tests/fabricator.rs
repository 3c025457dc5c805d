//! End-to-end fabrication runs against temporary directories

use fabricate_core::fabrication::{expected_progress_count, CollectingSink, FabricationError};
use fabricate_core::{BundleSource, Fabricator, ProjectDetails, TemplateCache};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BUNDLE_FILES: &[(&str, &str)] = &[
    ("LICENSE.template", "MIT License\n\nCopyright (c) the owner\n"),
    ("requirements.txt.template", "pytest\nmypy\n"),
    (".mypy.ini.template", "[mypy]\nstrict = true\n"),
    (
        "README.md.template",
        "# PROJECT_NAME\n\nDESCRIPTION\n\nMaintained by OWNER_NAME <OWNER_EMAIL>.\nKeywords: KEYWORDS\n",
    ),
    (".gitignore.template", "# PROJECT_NAME\n__pycache__/\n.venv/\n"),
    (
        "pyproject.toml.template",
        "[project]\nname = \"PROJECT_NAME\"\ndescription = \"DESCRIPTION\"\nrequires-python = \">=PYTHON_VERSION\"\nkeywords = [\"KEYWORDS\"]\n",
    ),
    (".envrc.template", "export PROJECT=PROJECT_NAME\n"),
    (
        "loggingConfiguration.json.template",
        "{\n    \"loggers\": {\n        \"PROJECT_NAME\": {\"level\": \"INFO\"}\n    }\n}\n",
    ),
    (
        "testLoggingConfiguration.json.template",
        "{\n    \"loggers\": {\n        \"tests\": {\"level\": \"DEBUG\"}\n    }\n}\n",
    ),
    ("config.yml.template", "version: 2.1\njobs: {}\n"),
    ("_version.py.template", "__version__: str = '0.1.0'\n"),
    (
        "createVirtualEnv.sh.template",
        "#!/bin/bash\n# Generated DAY MONTH_NAME_FULL YEAR\npyenv local PYTHON_VERSION\npython -m venv .venv\n",
    ),
];

struct Fixture {
    bundle_dir: TempDir,
    config_dir: TempDir,
    base_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let bundle_dir = TempDir::new().unwrap();
        for (name, contents) in BUNDLE_FILES {
            fs::write(bundle_dir.path().join(name), contents).unwrap();
        }
        Self {
            bundle_dir,
            config_dir: TempDir::new().unwrap(),
            base_dir: TempDir::new().unwrap(),
        }
    }

    fn bundle(&self) -> BundleSource {
        BundleSource::Explicit(self.bundle_dir.path().to_path_buf())
    }

    fn cache(&self) -> TemplateCache {
        TemplateCache::new(self.config_dir.path().join("templates"))
    }

    fn details(&self, name: &str) -> ProjectDetails {
        ProjectDetails {
            name: name.to_string(),
            owner_name: "Ada Lovelace".to_string(),
            owner_email: "a@b.com".to_string(),
            description: "A demonstration project".to_string(),
            keywords: "demo,skeleton".to_string(),
            base_directory: self.base_dir.path().to_path_buf(),
            python_version: Version::new(3, 12, 4),
        }
    }

    fn fabricate(&self, name: &str) -> (PathBuf, CollectingSink) {
        let details = self.details(name);
        let root = details.project_root();
        let fabricator = Fabricator::new(details, self.cache());
        let mut sink = CollectingSink::default();
        fabricator.fabricate(&self.bundle(), &mut sink).unwrap();
        (root, sink)
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_end_to_end_generated_tree() {
    let fixture = Fixture::new();
    let (root, _) = fixture.fabricate("demoproject");

    let module_init = root.join("src").join("demoproject").join("__init__.py");
    assert!(read(&module_init).contains("demoproject._version"));
    assert!(root.join("src").join("demoproject").join("_version.py").exists());

    assert_eq!(read(&root.join(".python-version")), "3.12.4");

    let tests_init = root.join("tests").join("demoproject").join("__init__.py");
    assert!(tests_init.exists());
    assert_eq!(read(&tests_init), "");

    assert!(root.join("src").join("demoproject").join("resources").is_dir());
    assert!(root.join("tests").join("resources").join("testLoggingConfiguration.json").exists());
    assert!(root.join(".circleci").join("config.yml").exists());
}

#[test]
fn test_substitution_files_have_all_tokens_replaced() {
    let fixture = Fixture::new();
    let (root, _) = fixture.fabricate("DemoProject");

    let readme = read(&root.join("README.md"));
    assert!(readme.contains("# demoproject"));
    assert!(readme.contains("Ada Lovelace <a@b.com>"));
    assert!(readme.contains("Keywords: demo,skeleton"));
    assert!(!readme.contains("PROJECT_NAME"));
    assert!(!readme.contains("OWNER_EMAIL"));

    let pyproject = read(&root.join("pyproject.toml"));
    assert!(pyproject.contains("name = \"demoproject\""));
    assert!(pyproject.contains(">=3.12.4"));

    let logging = read(
        &root
            .join("src")
            .join("demoproject")
            .join("resources")
            .join("loggingConfiguration.json"),
    );
    assert!(logging.contains("\"demoproject\""));
    assert!(!logging.contains("PROJECT_NAME"));
}

#[test]
fn test_no_substitution_files_are_byte_identical() {
    let fixture = Fixture::new();
    let (root, _) = fixture.fabricate("demoproject");

    for (template, contents) in [
        ("LICENSE.template", "LICENSE"),
        ("requirements.txt.template", "requirements.txt"),
        (".mypy.ini.template", ".mypy.ini"),
        ("config.yml.template", ".circleci/config.yml"),
    ]
    .map(|(t, d)| {
        (
            fs::read(fixture.bundle_dir.path().join(t)).unwrap(),
            fs::read(root.join(d)).unwrap(),
        )
    }) {
        assert_eq!(template, contents);
    }
}

#[cfg(unix)]
#[test]
fn test_venv_script_is_rendered_and_executable() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = Fixture::new();
    let (root, _) = fixture.fabricate("demoproject");

    let script = root.join("createVirtualEnv.sh");
    let contents = read(&script);
    assert!(contents.contains("pyenv local 3.12.4"));
    assert!(!contents.contains("MONTH_NAME_FULL"));
    assert!(!contents.contains("DAY "));

    let mode = fs::metadata(&script).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn test_progress_count_matches_artifacts_and_is_stable() {
    let fixture = Fixture::new();
    let (_, first) = fixture.fabricate("projectone");
    let (_, second) = fixture.fabricate("projecttwo");

    assert_eq!(first.messages.len(), expected_progress_count());
    assert_eq!(first.messages.len(), second.messages.len());

    // The root comes first and the remaining messages follow step order
    assert!(first.messages[0].contains("projectone"));
}

#[test]
fn test_fresh_project_guard() {
    let fixture = Fixture::new();
    let colliding = fixture.base_dir.path().join("demoproject");
    fs::create_dir(&colliding).unwrap();
    fs::write(colliding.join("precious.txt"), "do not touch").unwrap();

    let fabricator = Fabricator::new(fixture.details("demoproject"), fixture.cache());
    let mut sink = CollectingSink::default();
    let err = fabricator
        .fabricate(&fixture.bundle(), &mut sink)
        .unwrap_err();

    match err {
        FabricationError::ProjectExists { path } => assert_eq!(path, colliding),
        other => panic!("expected ProjectExists, got {other:?}"),
    }

    // Nothing was created: no progress, no skeleton, no cache seeding
    assert!(sink.messages.is_empty());
    let entries: Vec<_> = fs::read_dir(&colliding).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(!fixture.cache().dir().exists());
}

#[test]
fn test_cache_is_authoritative_after_first_run() {
    let fixture = Fixture::new();
    let (_, _) = fixture.fabricate("firstproject");

    // A user customization of the cached template must drive later runs
    let cached_readme = fixture.cache().template_path("README.md.template");
    fs::write(&cached_readme, "# PROJECT_NAME (custom edition)\n").unwrap();

    let (root, _) = fixture.fabricate("secondproject");
    assert_eq!(read(&root.join("README.md")), "# secondproject (custom edition)\n");
}

#[test]
fn test_missing_cached_template_is_reported_by_name() {
    let fixture = Fixture::new();
    let cache = fixture.cache();
    cache.ensure_populated(&fixture.bundle()).unwrap();
    fs::remove_file(cache.template_path("LICENSE.template")).unwrap();

    let fabricator = Fabricator::new(fixture.details("demoproject"), cache);
    let mut sink = CollectingSink::default();
    let err = fabricator
        .fabricate(&fixture.bundle(), &mut sink)
        .unwrap_err();

    match err {
        FabricationError::MissingTemplate { name, .. } => {
            assert_eq!(name, "LICENSE.template");
        }
        other => panic!("expected MissingTemplate, got {other:?}"),
    }
}

/// The template set shipped at the workspace root must cover every template
/// the fabricator expects.
#[test]
fn test_shipped_templates_are_complete() {
    let shipped = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .map(|workspace| workspace.join("templates"))
        .unwrap();
    assert!(shipped.is_dir(), "missing {}", shipped.display());

    let config_dir = TempDir::new().unwrap();
    let base_dir = TempDir::new().unwrap();
    let details = ProjectDetails {
        name: "demoproject".to_string(),
        owner_name: "Ada Lovelace".to_string(),
        owner_email: "a@b.com".to_string(),
        description: "A demonstration project".to_string(),
        keywords: "demo,skeleton".to_string(),
        base_directory: base_dir.path().to_path_buf(),
        python_version: Version::new(3, 12, 4),
    };
    let root = details.project_root();

    let cache = TemplateCache::new(config_dir.path().join("templates"));
    let fabricator = Fabricator::new(details, cache);
    let mut sink = CollectingSink::default();
    fabricator
        .fabricate(&BundleSource::Explicit(shipped), &mut sink)
        .unwrap();

    assert_eq!(sink.messages.len(), expected_progress_count());
    let readme = read(&root.join("README.md"));
    assert!(readme.contains("demoproject"));
    assert!(!readme.contains("PROJECT_NAME"));
}
