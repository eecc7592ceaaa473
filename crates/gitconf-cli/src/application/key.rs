//! Dotted configuration keys as typed on the command line.
//!
//! `core.editor` names variable `editor` in section `core`.  With more than
//! one dot, the first dot ends the section and the last dot starts the
//! variable name, so `url.https://example.com/.insteadOf` names variable
//! `insteadOf` in `[url "https://example.com/"]`.

use gitconf_core::{is_valid_variable_name, ConfigError, NameKind, SectionKey};
use thiserror::Error;

/// A parsed `section[.subsection].name` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey {
    pub section: SectionKey,
    pub name: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum KeyError {
    #[error("key does not contain a section: {0}")]
    MissingSection(String),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Parses a dotted key.
///
/// # Errors
///
/// - [`KeyError::MissingSection`] if `key` has no dot.
/// - [`KeyError::Invalid`] if a component is not a valid name.
pub fn parse_key(key: &str) -> Result<ConfigKey, KeyError> {
    let (section, rest) = key
        .split_once('.')
        .ok_or_else(|| KeyError::MissingSection(key.to_string()))?;

    let (section, name) = match rest.rsplit_once('.') {
        Some((sub, name)) => (SectionKey::with_subsection(section, sub)?, name),
        None => (SectionKey::new(section)?, rest),
    };

    if !is_valid_variable_name(name) {
        return Err(ConfigError::InvalidName {
            kind: NameKind::Variable,
            name: name.to_string(),
        }
        .into());
    }

    Ok(ConfigKey {
        section,
        name: name.to_string(),
    })
}
