//! Interactive wizard built on cliclack prompts
//!
//! Collects the project details field by field, pre-filling from the saved
//! settings, then drives a fabrication run with a progress sink that prints
//! one line per artifact.

use anyhow::Result;
use fabricate_core::fabrication::FabricationError;
use fabricate_core::runtime;
use fabricate_core::{BundleSource, Fabricator, ProjectDetails, Settings, TemplateCache};
use semver::Version;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (also the project directory name)
    pub name: Option<String>,

    /// Owner full name
    pub owner_name: Option<String>,

    /// Owner email address
    pub owner_email: Option<String>,

    /// One-line project description
    pub description: Option<String>,

    /// Comma-separated keywords
    pub keywords: Option<String>,

    /// Existing directory the project is created under
    pub base_directory: Option<PathBuf>,

    /// Target Python version
    pub python_version: Option<Version>,

    /// Local directory to use as the template bundle instead of discovery
    pub templates_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the wizard end to end
pub fn run(args: CreateArgs, settings_path: &Path) -> Result<()> {
    cliclack::intro("Fabricate")?;

    let mut settings = Settings::load(settings_path)?;
    let details = collect_details(&args, &settings)?;

    if !args.yes {
        cliclack::log::info(format!(
            "Project: {} ({}), Python {}\nUnder: {}",
            details.name,
            details.module_name(),
            details.python_version,
            details.base_directory.display()
        ))?;

        let proceed = cliclack::confirm("Create this project?")
            .initial_value(true)
            .interact()?;
        if !proceed {
            anyhow::bail!("Fabrication cancelled.");
        }
    }

    let bundle = match &args.templates_dir {
        Some(path) => {
            cliclack::log::info(format!("Using templates from {}", path.display()))?;
            BundleSource::Explicit(path.clone())
        }
        None => BundleSource::Discover,
    };

    let cache = TemplateCache::new(TemplateCache::default_dir()?);
    let fabricator = Fabricator::new(details.clone(), cache);

    let mut sink = |message: &str| {
        let _ = cliclack::log::info(message);
    };

    match fabricator.fabricate(&bundle, &mut sink) {
        Ok(()) => {}
        Err(FabricationError::ProjectExists { path }) => {
            cliclack::log::error(format!("Project path already exists: {}", path.display()))?;
            anyhow::bail!("Pick a different project name or base directory.");
        }
        Err(e) => return Err(e.into()),
    }

    settings.remember(&details);
    if let Err(e) = settings.save(settings_path) {
        cliclack::log::warning(format!("Could not save settings: {e}"))?;
    }

    print_next_steps(&details)?;
    Ok(())
}

fn collect_details(args: &CreateArgs, settings: &Settings) -> Result<ProjectDetails> {
    let name = match &args.name {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ if args.yes => anyhow::bail!("--name is required with --yes"),
        _ => cliclack::input("Project name")
            .placeholder("DemoProject")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err("A project name is required")
                } else {
                    Ok(())
                }
            })
            .interact()?,
    };

    let owner_name = text_field(args.owner_name.as_ref(), "Owner name", &settings.owner_name, args.yes)?;
    let owner_email = text_field(
        args.owner_email.as_ref(),
        "Owner email",
        &settings.owner_email,
        args.yes,
    )?;
    let description = text_field(
        args.description.as_ref(),
        "Description",
        &settings.description,
        args.yes,
    )?;
    let keywords = text_field(
        args.keywords.as_ref(),
        "Keywords (comma-separated)",
        &settings.keywords,
        args.yes,
    )?;

    let base_directory = match &args.base_directory {
        Some(path) => path.clone(),
        None if args.yes => settings.base_directory.clone(),
        None => {
            let input: String = cliclack::input("Projects base directory")
                .default_input(&settings.base_directory.to_string_lossy())
                .interact()?;
            PathBuf::from(input)
        }
    };
    if !base_directory.is_dir() {
        anyhow::bail!("Base directory does not exist: {}", base_directory.display());
    }

    let python_version = select_python_version(args)?;

    Ok(ProjectDetails {
        name,
        owner_name,
        owner_email,
        description,
        keywords,
        base_directory,
        python_version,
    })
}

fn text_field(arg: Option<&String>, prompt: &str, default: &str, yes: bool) -> Result<String> {
    if let Some(value) = arg {
        return Ok(value.clone());
    }
    if yes {
        return Ok(default.to_string());
    }
    let input: String = cliclack::input(prompt)
        .required(false)
        .default_input(default)
        .interact()?;
    Ok(input)
}

fn select_python_version(args: &CreateArgs) -> Result<Version> {
    if let Some(version) = &args.python_version {
        return Ok(version.clone());
    }
    if args.yes {
        anyhow::bail!("--python-version is required with --yes");
    }

    if runtime::pyenv_available() {
        match runtime::installed_versions() {
            Ok(versions) if !versions.is_empty() => {
                let mut select = cliclack::select("Target Python version");
                for (idx, version) in versions.iter().enumerate() {
                    select = select.item(idx, version.to_string(), "");
                }
                select = select.item(versions.len(), "Other", "enter a version manually");

                let chosen: usize = select.interact()?;
                if chosen < versions.len() {
                    return Ok(versions[chosen].clone());
                }
            }
            Ok(_) => {
                cliclack::log::warning("pyenv reports no installed Python versions")?;
            }
            Err(e) => {
                cliclack::log::warning(format!("{e}"))?;
            }
        }
    } else {
        cliclack::log::info("pyenv not found; enter the target version manually")?;
    }

    let input: String = cliclack::input("Target Python version")
        .placeholder("3.12.4")
        .validate(|input: &String| match Version::parse(input) {
            Ok(_) => Ok(()),
            Err(_) => Err("Enter a version as major.minor.patch"),
        })
        .interact()?;
    Ok(Version::parse(&input)?)
}

fn print_next_steps(details: &ProjectDetails) -> Result<()> {
    let mut steps = vec![format!("cd {}", details.project_root().display())];
    if cfg!(unix) {
        steps.push("./createVirtualEnv.sh".to_string());
        steps.push("source .venv/bin/activate".to_string());
    }
    steps.push("Open README.md to get started".to_string());

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;
    Ok(())
}
