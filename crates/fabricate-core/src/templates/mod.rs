//! Template handling: bundle resolution, the user-editable cache, and
//! token substitution

pub mod bundle;
pub mod cache;
pub mod substitute;

pub use bundle::{BundleSource, TEMPLATES_DIR_ENV};
pub use cache::{TemplateCache, TEMPLATE_SUFFIX};
pub use substitute::{
    date_tokens, project_tokens, render, render_strict, Token, TokenMap, UnresolvedToken,
};
