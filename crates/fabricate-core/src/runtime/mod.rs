//! Detection of locally installed Python toolchains

pub mod pyenv;

pub use pyenv::{installed_versions, pyenv_available};
