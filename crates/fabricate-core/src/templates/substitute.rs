//! Token substitution for template text
//!
//! A placeholder is a bare `UPPERCASE_WITH_UNDERSCORES` identifier bounded
//! by non-word characters. Rendering replaces every occurrence of a known
//! token with its value; anything else, including token-shaped words that
//! are not in the vocabulary, passes through untouched. The permissive
//! default tolerates partial and user-customized templates; the strict
//! variant exists for test suites that want typos to fail fast.

use crate::project::ProjectDetails;
use chrono::{DateTime, Datelike, Local};
use std::collections::BTreeMap;
use thiserror::Error;

/// The fixed token vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Token {
    ProjectName,
    PythonVersion,
    OwnerName,
    OwnerEmail,
    Description,
    Keywords,
    Day,
    MonthNameFull,
    Year,
}

impl Token {
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::ProjectName => "PROJECT_NAME",
            Token::PythonVersion => "PYTHON_VERSION",
            Token::OwnerName => "OWNER_NAME",
            Token::OwnerEmail => "OWNER_EMAIL",
            Token::Description => "DESCRIPTION",
            Token::Keywords => "KEYWORDS",
            Token::Day => "DAY",
            Token::MonthNameFull => "MONTH_NAME_FULL",
            Token::Year => "YEAR",
        }
    }

    fn from_name(name: &str) -> Option<Token> {
        match name {
            "PROJECT_NAME" => Some(Token::ProjectName),
            "PYTHON_VERSION" => Some(Token::PythonVersion),
            "OWNER_NAME" => Some(Token::OwnerName),
            "OWNER_EMAIL" => Some(Token::OwnerEmail),
            "DESCRIPTION" => Some(Token::Description),
            "KEYWORDS" => Some(Token::Keywords),
            "DAY" => Some(Token::Day),
            "MONTH_NAME_FULL" => Some(Token::MonthNameFull),
            "YEAR" => Some(Token::Year),
            _ => None,
        }
    }
}

/// Token values for one fabrication run
pub type TokenMap = BTreeMap<Token, String>;

/// A recognized token was left unresolved while rendering in strict mode
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unresolved token `{name}`")]
pub struct UnresolvedToken {
    pub name: String,
}

/// The full per-project token set.
///
/// `PROJECT_NAME` carries the lower-cased module name, which is what the
/// packaging and logging templates expect.
pub fn project_tokens(details: &ProjectDetails) -> TokenMap {
    let mut tokens = TokenMap::new();
    tokens.insert(Token::ProjectName, details.module_name());
    tokens.insert(Token::PythonVersion, details.python_version.to_string());
    tokens.insert(Token::OwnerName, details.owner_name.clone());
    tokens.insert(Token::OwnerEmail, details.owner_email.clone());
    tokens.insert(Token::Description, details.description.clone());
    tokens.insert(Token::Keywords, details.keywords.clone());
    tokens
}

/// Date tokens for templates that embed a generation date
pub fn date_tokens(now: &DateTime<Local>) -> TokenMap {
    let mut tokens = TokenMap::new();
    tokens.insert(Token::Day, now.day().to_string());
    tokens.insert(Token::MonthNameFull, now.format("%B").to_string());
    tokens.insert(Token::Year, now.year().to_string());
    tokens
}

/// Replace every known token; unknown placeholders are left untouched
pub fn render(text: &str, tokens: &TokenMap) -> String {
    match render_inner(text, tokens, false) {
        Ok(rendered) => rendered,
        // Unreachable: permissive rendering never errors
        Err(_) => text.to_string(),
    }
}

/// Like `render`, but any vocabulary token absent from the map is an error
pub fn render_strict(text: &str, tokens: &TokenMap) -> Result<String, UnresolvedToken> {
    render_inner(text, tokens, true)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn render_inner(text: &str, tokens: &TokenMap, strict: bool) -> Result<String, UnresolvedToken> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < bytes.len() {
        let starts_candidate =
            bytes[i].is_ascii_uppercase() && (i == 0 || !is_word_byte(bytes[i - 1]));

        if starts_candidate {
            let mut end = i + 1;
            while end < bytes.len()
                && (bytes[end].is_ascii_uppercase()
                    || bytes[end].is_ascii_digit()
                    || bytes[end] == b'_')
            {
                end += 1;
            }

            let candidate = &text[i..end];
            let bounded = end == bytes.len() || !is_word_byte(bytes[end]);

            if bounded {
                if let Some(token) = Token::from_name(candidate) {
                    match tokens.get(&token) {
                        Some(value) => {
                            out.push_str(value);
                            i = end;
                            continue;
                        }
                        None if strict => {
                            return Err(UnresolvedToken {
                                name: candidate.to_string(),
                            });
                        }
                        None => {}
                    }
                }
            }

            out.push_str(candidate);
            i = end;
        } else {
            // Skip ahead to the next possible candidate start; everything in
            // between is literal text (boundaries are safe because candidate
            // starts are ASCII)
            let mut j = i + 1;
            while j < bytes.len()
                && !(bytes[j].is_ascii_uppercase() && !is_word_byte(bytes[j - 1]))
            {
                j += 1;
            }
            out.push_str(&text[i..j]);
            i = j;
        }
    }

    Ok(out)
}
