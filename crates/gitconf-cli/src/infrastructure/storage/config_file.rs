//! Path-backed configuration files.
//!
//! A [`ConfigFile`] is a [`ConfigDict`] that remembers where it was loaded
//! from, so it can be written back after `set`.  It dereferences to the
//! dict, so every lookup method is available directly.
//!
//! Writes go straight to the target path with `std::fs::write`; there is no
//! locking and no temp-file rename.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use gitconf_core::{
    parse_str, ConfigDict, ConfigError, ConfigSink, ConfigSource, ConfigValue, SectionKey,
};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid Git config text.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// `write_to_path(None)` on a file that was never given a path.
    #[error("config has no associated path to write to")]
    NoPath,

    /// A lookup or update failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A configuration store tied to an optional file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    dict: ConfigDict,
}

impl ConfigFile {
    /// Creates an empty, path-less file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store without a path.
    pub fn from_dict(dict: ConfigDict) -> Self {
        Self { path: None, dict }
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be read (including
    /// when it does not exist) and [`StorageError::Parse`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_at(path, &text)
    }

    /// Like [`ConfigFile::from_path`], but a missing file yields an empty
    /// store that will be created on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for file-system errors other than
    /// "not found", and [`StorageError::Parse`] if the file is malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse_at(path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file absent, starting empty");
                Ok(Self {
                    path: Some(path.to_path_buf()),
                    dict: ConfigDict::new(),
                })
            }
            Err(source) => Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// The path this file was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persists the store to `path`, or to the path it was loaded from.
    ///
    /// Creates the parent directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPath`] if neither path is available and
    /// [`StorageError::Io`] for file-system failures.
    pub fn write_to_path(&self, path: Option<&Path>) -> Result<(), StorageError> {
        let path = path.or(self.path.as_deref()).ok_or(StorageError::NoPath)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, self.dict.to_string()).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "wrote config file");
        Ok(())
    }

    /// Sets `name` in `section` on the in-memory store.
    ///
    /// Nothing is written until [`ConfigFile::write_to_path`] is called.
    pub fn set(
        &mut self,
        section: &SectionKey,
        name: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<(), ConfigError> {
        self.dict.set(section, name, value)
    }

    /// Consumes the file, returning the store.
    pub fn into_dict(self) -> ConfigDict {
        self.dict
    }

    fn parse_at(path: &Path, text: &str) -> Result<Self, StorageError> {
        let dict = parse_str(text).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), sections = dict.len(), "loaded config file");
        Ok(Self {
            path: Some(path.to_path_buf()),
            dict,
        })
    }
}

impl Deref for ConfigFile {
    type Target = ConfigDict;

    fn deref(&self) -> &ConfigDict {
        &self.dict
    }
}

impl DerefMut for ConfigFile {
    fn deref_mut(&mut self) -> &mut ConfigDict {
        &mut self.dict
    }
}

impl ConfigSource for ConfigFile {
    fn get(&self, section: &SectionKey, name: &str) -> Result<&str, ConfigError> {
        self.dict.get(section, name)
    }
}

impl ConfigSink for ConfigFile {
    fn set(&mut self, section: &SectionKey, name: &str, value: ConfigValue) -> Result<(), ConfigError> {
        ConfigFile::set(self, section, name, value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
