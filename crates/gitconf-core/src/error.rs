//! Error type shared by every operation in the crate.

use std::fmt;

use thiserror::Error;

/// Which grammar a rejected name was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Section,
    Subsection,
    Variable,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameKind::Section => "section",
            NameKind::Subsection => "subsection",
            NameKind::Variable => "variable",
        })
    }
}

/// Errors produced while parsing, querying or mutating configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// The text violates the configuration grammar.  The whole parse is void.
    #[error("malformed config at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A name passed to `set` or a `SectionKey` constructor failed validation.
    #[error("invalid {kind} name: {name:?}")]
    InvalidName { kind: NameKind, name: String },

    /// No backend defines the requested variable.
    #[error("no value for {name:?} in section [{section}]")]
    NotFound { section: String, name: String },

    /// The stored value is not one of the recognised boolean tokens.
    #[error("invalid boolean value {value:?} for {name:?}")]
    InvalidValue { name: String, value: String },

    /// `set` was called on a stacked config without a writable backend.
    #[error("stacked config has no writable backend")]
    NoWritableBackend,
}

impl ConfigError {
    /// Returns `true` for the recoverable "key is simply absent" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ConfigError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
