//! Querying pyenv for installed Python versions
//!
//! Thin process wrapper used by the wizard's version page. Fabrication
//! itself never shells out; when pyenv is absent the wizard falls back to
//! manual version entry.

use anyhow::{Context, Result};
use semver::Version;
use std::process::Command;

/// Check whether pyenv is on the PATH
pub fn pyenv_available() -> bool {
    Command::new("pyenv")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// The Python versions pyenv has installed, ascending.
///
/// Non-version lines (`system`, named virtualenvs) are skipped.
pub fn installed_versions() -> Result<Vec<Version>> {
    let output = Command::new("pyenv")
        .args(["versions", "--bare"])
        .output()
        .context("Failed to run pyenv")?;

    if !output.status.success() {
        anyhow::bail!(
            "pyenv versions failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_versions(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_versions(raw: &str) -> Vec<Version> {
    let mut versions: Vec<Version> = raw
        .lines()
        .filter_map(|line| Version::parse(line.trim()).ok())
        .collect();
    versions.sort();
    versions.dedup();
    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_system_and_virtualenv_lines() {
        let raw = "system\n3.10.14\n3.12.4\npyenv-demoproject\n";
        let versions = parse_versions(raw);
        assert_eq!(
            versions,
            vec![Version::new(3, 10, 14), Version::new(3, 12, 4)]
        );
    }

    #[test]
    fn test_parse_sorts_and_dedupes() {
        let raw = "3.12.4\n3.9.1\n3.12.4\n";
        let versions = parse_versions(raw);
        assert_eq!(versions, vec![Version::new(3, 9, 1), Version::new(3, 12, 4)]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_versions("").is_empty());
    }
}
