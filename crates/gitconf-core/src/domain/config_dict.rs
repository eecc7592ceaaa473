//! In-memory configuration store.
//!
//! [`ConfigDict`] maps [`SectionKey`]s to ordered variable tables.  Two
//! orders matter and they are deliberately different:
//!
//! - **Serialization** walks sections and variables in insertion order, so a
//!   file that is read, tweaked and written back keeps its shape.
//! - **Equality** ignores order entirely: two stores are equal when they hold
//!   the same sections and the same name/value pairs.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::domain::names::is_valid_variable_name;
use crate::domain::section::{FoldedName, SectionKey};
use crate::domain::stacked::{ConfigSink, ConfigSource};
use crate::error::{ConfigError, NameKind, Result};

/// Variables of one section, keyed by case-folded name.
type Variables = IndexMap<FoldedName, String>;

/// A value accepted by [`ConfigDict::set`].
///
/// Strings are stored as-is; booleans are normalised to `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue(String);

impl ConfigValue {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for ConfigValue {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self(if value { "true" } else { "false" }.to_string())
    }
}

/// Interprets a Git boolean token, case-insensitively.
///
/// Returns `None` for anything that is not one of
/// `true`/`yes`/`on`/`1` or `false`/`no`/`off`/`0`.
pub fn parse_boolean(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// An ordered, case-insensitive configuration mapping.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::{ConfigDict, SectionKey};
///
/// let core = SectionKey::new("core").unwrap();
/// let mut cfg = ConfigDict::new();
/// cfg.set(&core, "FileMode", true).unwrap();
///
/// assert_eq!(cfg.get(&core, "filemode").unwrap(), "true");
/// assert!(cfg.get_boolean(&core, "FILEMODE").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDict {
    sections: IndexMap<SectionKey, Variables>,
}

impl ConfigDict {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `name` in `section`.
    ///
    /// For a key with a subsection the exact subsection is searched first;
    /// if it does not define `name`, the bare section is searched next.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if neither level defines `name`.
    pub fn get(&self, section: &SectionKey, name: &str) -> Result<&str> {
        let folded = name.to_lowercase();
        self.lookup(section, &folded)
            .or_else(|| {
                section
                    .parent()
                    .and_then(|parent| self.lookup(&parent, &folded))
            })
            .ok_or_else(|| ConfigError::NotFound {
                section: section.to_string(),
                name: name.to_string(),
            })
    }

    /// Looks up `name` and interprets it as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the variable is missing and
    /// [`ConfigError::InvalidValue`] if it is not a boolean token.
    pub fn get_boolean(&self, section: &SectionKey, name: &str) -> Result<bool> {
        let value = self.get(section, name)?;
        parse_boolean(value).ok_or_else(|| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Sets `name` in `section`, creating the section if needed.
    ///
    /// An existing variable keeps its position and original spelling; only
    /// its value changes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] if `name` is not a valid variable
    /// name.
    pub fn set(
        &mut self,
        section: &SectionKey,
        name: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<()> {
        if !is_valid_variable_name(name) {
            return Err(ConfigError::InvalidName {
                kind: NameKind::Variable,
                name: name.to_string(),
            });
        }
        self.variables_mut(section)
            .insert(FoldedName::new(name), value.into().into_inner());
        Ok(())
    }

    /// Makes sure `section` exists, even if it ends up with no variables.
    pub fn ensure_section(&mut self, section: &SectionKey) {
        self.variables_mut(section);
    }

    /// Returns `true` if `section` exists (exact match, no fallback).
    pub fn has_section(&self, section: &SectionKey) -> bool {
        self.sections.contains_key(section)
    }

    /// Section keys in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionKey> + '_ {
        self.sections.keys()
    }

    /// `(name, value)` pairs of `section` in insertion order, with names as
    /// first written.  Yields nothing for an unknown section.
    pub fn items<'a>(&'a self, section: &SectionKey) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|vars| vars.iter().map(|(k, v)| (k.display(), v.as_str())))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn lookup(&self, section: &SectionKey, folded: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|vars| vars.get(folded))
            .map(String::as_str)
    }

    fn variables_mut(&mut self, section: &SectionKey) -> &mut Variables {
        self.sections.entry(section.clone()).or_default()
    }
}

impl ConfigSource for ConfigDict {
    fn get(&self, section: &SectionKey, name: &str) -> Result<&str> {
        ConfigDict::get(self, section, name)
    }
}

impl ConfigSink for ConfigDict {
    fn set(&mut self, section: &SectionKey, name: &str, value: ConfigValue) -> Result<()> {
        ConfigDict::set(self, section, name, value)
    }
}

impl FromStr for ConfigDict {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self> {
        crate::parser::parse_str(text)
    }
}

impl fmt::Display for ConfigDict {
    /// Serialises the store in Git config syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::parser::writer::write_config(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> SectionKey {
        SectionKey::new("core").unwrap()
    }

    #[test]
    fn test_empty_dicts_are_equal() {
        assert_eq!(ConfigDict::new(), ConfigDict::new());
        assert!(ConfigDict::new().is_empty());
    }

    #[test]
    fn test_get_set() {
        // Arrange
        let mut cd = ConfigDict::new();
        assert!(matches!(
            cd.get(&core(), "foo"),
            Err(ConfigError::NotFound { .. })
        ));

        // Act / Assert
        cd.set(&core(), "foo", "bla").unwrap();
        assert_eq!(cd.get(&core(), "foo").unwrap(), "bla");
        cd.set(&core(), "foo", "bloe").unwrap();
        assert_eq!(cd.get(&core(), "foo").unwrap(), "bloe");
    }

    #[test]
    fn test_get_boolean() {
        let mut cd = ConfigDict::new();
        cd.set(&core(), "foo", "true").unwrap();
        assert!(cd.get_boolean(&core(), "foo").unwrap());
        cd.set(&core(), "foo", "false").unwrap();
        assert!(!cd.get_boolean(&core(), "foo").unwrap());
        cd.set(&core(), "foo", "invalid").unwrap();
        assert!(matches!(
            cd.get_boolean(&core(), "foo"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_boolean_accepts_all_git_tokens() {
        for token in ["true", "YES", "On", "1"] {
            assert_eq!(parse_boolean(token), Some(true), "{token}");
        }
        for token in ["false", "No", "OFF", "0"] {
            assert_eq!(parse_boolean(token), Some(false), "{token}");
        }
        assert_eq!(parse_boolean(""), None);
        assert_eq!(parse_boolean("2"), None);
    }

    #[test]
    fn test_set_boolean_is_normalised_to_string() {
        let mut cd = ConfigDict::new();
        cd.set(&core(), "bare", false).unwrap();
        assert_eq!(cd.get(&core(), "bare").unwrap(), "false");
    }

    #[test]
    fn test_set_rejects_invalid_variable_name() {
        let mut cd = ConfigDict::new();
        let result = cd.set(&core(), "foo.bar", "x");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidName {
                kind: NameKind::Variable,
                ..
            })
        ));
        assert!(cd.is_empty(), "a rejected set must not create the section");
    }

    #[test]
    fn test_get_is_case_insensitive_and_keeps_first_spelling() {
        let mut cd = ConfigDict::new();
        let mixed = SectionKey::new("Core").unwrap();
        cd.set(&mixed, "FileMode", "true").unwrap();
        cd.set(&core(), "filemode", "false").unwrap();

        assert_eq!(cd.get(&core(), "FILEMODE").unwrap(), "false");
        let items: Vec<_> = cd.items(&core()).collect();
        assert_eq!(items, vec![("FileMode", "false")]);
        assert_eq!(cd.sections().next().unwrap().name(), "Core");
    }

    #[test]
    fn test_subsection_lookup_falls_back_to_bare_section() {
        let mut cd = ConfigDict::new();
        cd.set(&core(), "foo", "bar").unwrap();
        let sub = SectionKey::with_subsection("core", "foo").unwrap();
        assert_eq!(cd.get(&sub, "foo").unwrap(), "bar");
    }

    #[test]
    fn test_subsection_value_takes_precedence_over_bare_section() {
        let mut cd = ConfigDict::new();
        let sub = SectionKey::with_subsection("core", "foo").unwrap();
        cd.set(&core(), "foo", "from-bare").unwrap();
        cd.set(&sub, "foo", "from-sub").unwrap();
        assert_eq!(cd.get(&sub, "foo").unwrap(), "from-sub");
        assert_eq!(cd.get(&core(), "foo").unwrap(), "from-bare");
    }

    #[test]
    fn test_bare_section_lookup_does_not_see_subsections() {
        let mut cd = ConfigDict::new();
        let sub = SectionKey::with_subsection("branch", "main").unwrap();
        cd.set(&sub, "remote", "origin").unwrap();
        let bare = SectionKey::new("branch").unwrap();
        assert!(cd.get(&bare, "remote").unwrap_err().is_not_found());
    }

    #[test]
    fn test_equality_ignores_order_and_spelling() {
        let mut a = ConfigDict::new();
        a.set(&core(), "a", "1").unwrap();
        a.set(&core(), "b", "2").unwrap();

        let mut b = ConfigDict::new();
        b.set(&SectionKey::new("CORE").unwrap(), "B", "2").unwrap();
        b.set(&core(), "A", "1").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_sees_empty_sections() {
        let mut a = ConfigDict::new();
        a.ensure_section(&core());
        assert_ne!(a, ConfigDict::new());
        assert!(a.has_section(&core()));
        assert_eq!(a.items(&core()).count(), 0);
    }

    #[test]
    fn test_items_for_unknown_section_is_empty() {
        assert_eq!(ConfigDict::new().items(&core()).count(), 0);
    }
}
