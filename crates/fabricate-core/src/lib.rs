//! Fabricate Core - template-driven Python project skeleton fabrication
//!
//! This library generates a complete Python project directory tree (sources,
//! tests, CI config, packaging metadata, logging configuration, version
//! stub) from a set of `*.template` files with token substitution. It is
//! designed to sit behind any front end; the `fabricate` binary wraps it in
//! an interactive terminal wizard.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Template handling** - bundle resolution, the user-editable template
//!   cache, and the token substitution engine
//! - **Fabrication** - the pure skeleton layout and the twelve-step
//!   `Fabricator` run with its per-artifact progress contract
//! - **Ambient support** - persisted wizard defaults and pyenv probing for
//!   the version page
//!
//! # Example usage
//!
//! ```ignore
//! use fabricate_core::{BundleSource, Fabricator, ProjectDetails, TemplateCache};
//!
//! let cache = TemplateCache::new(TemplateCache::default_dir()?);
//! let fabricator = Fabricator::new(details, cache);
//! let mut sink = |message: &str| println!("{message}");
//! fabricator.fabricate(&BundleSource::Discover, &mut sink)?;
//! ```

pub mod fabrication;
pub mod project;
pub mod runtime;
pub mod settings;
pub mod templates;

// Re-export main types for convenience
pub use fabrication::{FabricationError, Fabricator, ProgressSink, SkeletonDirectories};
pub use project::ProjectDetails;
pub use settings::Settings;
pub use templates::{BundleSource, TemplateCache, Token, TokenMap};

/// Application name, used for the configuration directory and the CLI
pub const APPLICATION_NAME: &str = "fabricate";
