//! Default configuration file discovery.
//!
//! Git layers three files under the repository's own config, highest
//! priority first:
//!
//! | Scope  | Path                                                     |
//! |--------|----------------------------------------------------------|
//! | global | `$HOME/.gitconfig`                                       |
//! | XDG    | `$XDG_CONFIG_HOME/git/config` (or `$HOME/.config/git/config`) |
//! | system | `/etc/gitconfig`                                         |
//!
//! Missing files are not an error; they are simply left out of the stack.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use gitconf_core::StackedConfig;
use tracing::debug;

use super::config_file::{ConfigFile, StorageError};

const SYSTEM_CONFIG: &str = "/etc/gitconfig";

/// Returns the default config paths, reading the process environment.
pub fn default_paths() -> Vec<PathBuf> {
    default_paths_from(|name| std::env::var_os(name))
}

/// Returns the default config paths, highest priority first, using `env`
/// to resolve environment variables.
///
/// Variables that are unset or empty count as absent.
pub fn default_paths_from<F>(env: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let var = |name: &str| env(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    let home = var("HOME");
    #[cfg(windows)]
    let home = home.or_else(|| var("USERPROFILE"));

    let mut paths = Vec::with_capacity(3);
    if let Some(home) = &home {
        paths.push(home.join(".gitconfig"));
    }

    let xdg = var("XDG_CONFIG_HOME").or_else(|| home.as_ref().map(|h| h.join(".config")));
    if let Some(xdg) = xdg {
        paths.push(xdg.join("git").join("config"));
    }

    paths.push(PathBuf::from(SYSTEM_CONFIG));
    paths
}

/// Loads every path that exists, in order.
///
/// # Errors
///
/// Missing files are skipped.  Unreadable or malformed files are errors.
pub fn load_backends(paths: &[PathBuf]) -> Result<Vec<ConfigFile>, StorageError> {
    let mut backends = Vec::with_capacity(paths.len());
    for path in paths {
        match ConfigFile::from_path(path) {
            Ok(file) => backends.push(file),
            Err(StorageError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "skipping missing config file");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(backends)
}

/// The read-only stack of the user and system config files.
///
/// # Errors
///
/// See [`load_backends`].
pub fn default_backends() -> Result<StackedConfig<ConfigFile>, StorageError> {
    Ok(StackedConfig::new(load_backends(&default_paths())?))
}

/// The stack Git uses inside a repository: `<repo_dir>/.git/config`
/// (writable, empty if absent) followed by the default backends.
///
/// # Errors
///
/// See [`load_backends`].
pub fn repository_stack(repo_dir: &Path) -> Result<StackedConfig<ConfigFile>, StorageError> {
    let local = ConfigFile::load_or_default(repo_dir.join(".git").join("config"))?;
    let mut backends = vec![local];
    backends.extend(load_backends(&default_paths())?);
    Ok(StackedConfig::new(backends).with_writable(0))
}

/// A stack over a single file, which is also the write target.
///
/// # Errors
///
/// Returns [`StorageError::Parse`] if the file exists but is malformed.
pub fn file_stack(path: &Path) -> Result<StackedConfig<ConfigFile>, StorageError> {
    let file = ConfigFile::load_or_default(path)?;
    Ok(StackedConfig::new(vec![file]).with_writable(0))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
