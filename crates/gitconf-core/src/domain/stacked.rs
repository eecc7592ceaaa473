//! Layered lookup across several configuration sources.
//!
//! Git reads configuration from several places: the repository's own
//! `.git/config`, the user's `~/.gitconfig`, the system-wide
//! `/etc/gitconfig`.  A [`StackedConfig`] holds those *backends* in priority
//! order and answers each lookup from the first backend that defines the key.
//!
//! Backends are anything implementing [`ConfigSource`]; the stack itself is
//! also a `ConfigSource`, so stacks can be nested.

use crate::domain::config_dict::{parse_boolean, ConfigValue};
use crate::domain::section::SectionKey;
use crate::error::{ConfigError, Result};

/// Read access to a configuration backend.
pub trait ConfigSource {
    /// Returns the value of `name` in `section`.
    ///
    /// Implementations return [`ConfigError::NotFound`] for absent keys.
    fn get(&self, section: &SectionKey, name: &str) -> Result<&str>;

    /// Returns the value of `name` interpreted as a Git boolean.
    fn get_boolean(&self, section: &SectionKey, name: &str) -> Result<bool> {
        let value = self.get(section, name)?;
        parse_boolean(value).ok_or_else(|| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Write access to a configuration backend.
pub trait ConfigSink {
    fn set(&mut self, section: &SectionKey, name: &str, value: ConfigValue) -> Result<()>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn get(&self, section: &SectionKey, name: &str) -> Result<&str> {
        (**self).get(section, name)
    }
}

/// An ordered stack of backends, highest priority first.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::{ConfigDict, ConfigSource, SectionKey, StackedConfig};
///
/// let core = SectionKey::new("core").unwrap();
/// let local = ConfigDict::new();
/// let mut global = ConfigDict::new();
/// global.set(&core, "editor", "vim").unwrap();
///
/// let stack = StackedConfig::new(vec![local, global]);
/// assert_eq!(stack.get(&core, "editor").unwrap(), "vim");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StackedConfig<C> {
    backends: Vec<C>,
    writable: Option<usize>,
}

impl<C> StackedConfig<C> {
    /// Creates a read-only stack over `backends`.
    pub fn new(backends: Vec<C>) -> Self {
        Self {
            backends,
            writable: None,
        }
    }

    /// Marks `backends[index]` as the target of [`StackedConfig::set`].
    ///
    /// An out-of-range index leaves the stack read-only.
    pub fn with_writable(mut self, index: usize) -> Self {
        self.writable = (index < self.backends.len()).then_some(index);
        self
    }

    /// The backends in priority order.
    pub fn backends(&self) -> &[C] {
        &self.backends
    }

    /// The writable backend, if one was designated.
    pub fn writable(&self) -> Option<&C> {
        self.writable.and_then(|i| self.backends.get(i))
    }

    pub fn writable_mut(&mut self) -> Option<&mut C> {
        match self.writable {
            Some(i) => self.backends.get_mut(i),
            None => None,
        }
    }

    /// Consumes the stack, returning its backends.
    pub fn into_backends(self) -> Vec<C> {
        self.backends
    }
}

impl<C: ConfigSource> ConfigSource for StackedConfig<C> {
    /// Returns the value from the first backend that defines `name`.
    ///
    /// Errors other than `NotFound` (for example from a backend that
    /// validates names) stop the search and are returned as-is.
    fn get(&self, section: &SectionKey, name: &str) -> Result<&str> {
        for backend in &self.backends {
            match backend.get(section, name) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }
        Err(ConfigError::NotFound {
            section: section.to_string(),
            name: name.to_string(),
        })
    }
}

impl<C: ConfigSink> StackedConfig<C> {
    /// Writes `name` into the writable backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoWritableBackend`] if none was designated,
    /// or whatever the backend's own `set` returns.
    pub fn set(
        &mut self,
        section: &SectionKey,
        name: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<()> {
        let backend = self.writable_mut().ok_or(ConfigError::NoWritableBackend)?;
        backend.set(section, name, value.into())
    }
}
