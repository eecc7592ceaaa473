//! Section keys and case-folded names.
//!
//! # Case folding (for beginners)
//!
//! Git treats `[Core]` and `[core]`, or `FileMode` and `filemode`, as the
//! same thing, but when it rewrites a file it keeps the spelling the user
//! typed.  [`FoldedName`] captures both halves of that rule: it carries a
//! lower-cased *lookup* key, used for equality and hashing, next to the
//! *display* spelling, used only when writing text back out.
//!
//! Subsection names are the exception: `[branch "Main"]` and
//! `[branch "main"]` are two different sections, so subsections are plain
//! case-sensitive strings.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec::escape;
use crate::domain::names::{is_valid_section_name, is_valid_subsection_name};
use crate::error::{ConfigError, NameKind, Result};

/// A name compared case-insensitively but displayed as first written.
#[derive(Debug, Clone, Eq)]
pub struct FoldedName {
    key: String,
    display: String,
}

impl FoldedName {
    /// Wraps `name`, folding a copy to lower case for lookups.
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into();
        Self {
            key: display.to_lowercase(),
            display,
        }
    }

    /// The lower-cased lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The spelling the name was created with.
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl PartialEq for FoldedName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

// Must agree with `Borrow<str>`: hash exactly what `key()` returns.
impl Hash for FoldedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Borrow<str> for FoldedName {
    fn borrow(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for FoldedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Identifies a section: `(section)` or `(section, subsection)`.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::SectionKey;
///
/// let a = SectionKey::new("Core").unwrap();
/// let b = SectionKey::new("core").unwrap();
/// assert_eq!(a, b);
///
/// let main = SectionKey::with_subsection("branch", "main").unwrap();
/// let other = SectionKey::with_subsection("branch", "Main").unwrap();
/// assert_ne!(main, other);
/// assert_eq!(main.to_string(), "branch \"main\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    name: FoldedName,
    subsection: Option<String>,
}

impl SectionKey {
    /// Creates a key from a header name as it appears between `[` and `]`.
    ///
    /// A dotted name is the legacy `[section.subsection]` form: it splits at
    /// the first dot and the subsection is lower-cased, exactly as the parser
    /// reads it back.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] if `name` fails
    /// [`is_valid_section_name`] or has an empty dotted component.
    pub fn new(name: &str) -> Result<Self> {
        check_section(name)?;
        match name.split_once('.') {
            Some((section, subsection)) if !section.is_empty() && !subsection.is_empty() => {
                Self::with_subsection(section, &subsection.to_lowercase())
            }
            Some(_) => Err(ConfigError::InvalidName {
                kind: NameKind::Section,
                name: name.to_string(),
            }),
            None => Ok(Self {
                name: FoldedName::new(name),
                subsection: None,
            }),
        }
    }

    /// Creates a key for `[name "subsection"]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] if either component is invalid.
    pub fn with_subsection(name: &str, subsection: &str) -> Result<Self> {
        check_section(name)?;
        if !is_valid_subsection_name(subsection) {
            return Err(ConfigError::InvalidName {
                kind: NameKind::Subsection,
                name: subsection.to_string(),
            });
        }
        Ok(Self {
            name: FoldedName::new(name),
            subsection: Some(subsection.to_string()),
        })
    }

    /// The section name, as first written.
    pub fn name(&self) -> &str {
        self.name.display()
    }

    /// The subsection, if any.
    pub fn subsection(&self) -> Option<&str> {
        self.subsection.as_deref()
    }

    /// The same section without its subsection.
    ///
    /// Lookups on `(section, subsection)` fall back to this key.
    pub fn parent(&self) -> Option<SectionKey> {
        self.subsection.as_ref().map(|_| SectionKey {
            name: self.name.clone(),
            subsection: None,
        })
    }
}

impl fmt::Display for SectionKey {
    /// Formats the key the way it appears between `[` and `]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subsection {
            Some(sub) => write!(f, "{} \"{}\"", self.name, escape(sub)),
            None => write!(f, "{}", self.name),
        }
    }
}

fn check_section(name: &str) -> Result<()> {
    if is_valid_section_name(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidName {
            kind: NameKind::Section,
            name: name.to_string(),
        })
    }
}
