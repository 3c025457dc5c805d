//! fabricate CLI - interactive wizard for Python project skeletons

mod wizard;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use fabricate_core::templates::TEMPLATE_SUFFIX;
use fabricate_core::{BundleSource, Settings, TemplateCache};
use semver::Version;
use std::path::{Path, PathBuf};
use wizard::CreateArgs;

#[derive(Parser, Debug)]
#[command(name = "fabricate")]
#[command(about = "Fabricate Python project skeletons from templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project skeleton
    Create(CliCreateArgs),
    /// Show the template cache, seeding it from the bundle when absent
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name (also the project directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Owner full name
    #[arg(long)]
    pub owner_name: Option<String>,

    /// Owner email address
    #[arg(long)]
    pub owner_email: Option<String>,

    /// One-line project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Comma-separated keywords
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Existing directory the project is created under
    #[arg(short, long)]
    pub base_directory: Option<PathBuf>,

    /// Target Python version (major.minor.patch)
    #[arg(short, long)]
    pub python_version: Option<Version>,

    /// Local directory to use as the template bundle (for development use)
    #[arg(long = "templates-dir")]
    pub templates_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            owner_name: args.owner_name,
            owner_email: args.owner_email,
            description: args.description,
            keywords: args.keywords,
            base_directory: args.base_directory,
            python_version: args.python_version,
            templates_dir: args.templates_dir,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Local directory to use as the template bundle (for development use)
    #[arg(long = "templates-dir")]
    pub templates_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings_path = Settings::default_path()?;

    match args.command {
        Some(Command::Create(create_args)) => run_wizard(create_args.into(), &settings_path),
        Some(Command::Templates(templates_args)) => show_templates(&templates_args),
        None => {
            // No subcommand provided, default to the interactive wizard
            run_wizard(CreateArgs::default(), &settings_path)
        }
    }
}

fn run_wizard(args: CreateArgs, settings_path: &Path) -> Result<()> {
    let result = wizard::run(args, settings_path);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

fn show_templates(args: &TemplatesArgs) -> Result<()> {
    let cache = TemplateCache::new(TemplateCache::default_dir()?);
    let bundle = match &args.templates_dir {
        Some(path) => BundleSource::Explicit(path.clone()),
        None => BundleSource::Discover,
    };

    if cache.ensure_populated(&bundle)? {
        println!(
            "{} {}",
            "Seeded template cache at".green().bold(),
            cache.dir().display()
        );
    } else {
        println!("{} {}", "Template cache:".cyan().bold(), cache.dir().display());
    }
    println!();

    let mut names: Vec<String> = std::fs::read_dir(cache.dir())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(TEMPLATE_SUFFIX))
        .collect();
    names.sort();

    for name in &names {
        println!("  {} {}", "->".blue(), name);
    }

    println!();
    println!("Edit these files to customize future projects.");

    Ok(())
}
