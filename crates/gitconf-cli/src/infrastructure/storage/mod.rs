//! Storage infrastructure: configuration files on disk.
//!
//! - `config_file` pairs a parsed [`gitconf_core::ConfigDict`] with the path
//!   it came from, and writes it back.
//! - `discovery` works out which files make up the default stack
//!   (`~/.gitconfig`, `$XDG_CONFIG_HOME/git/config`, `/etc/gitconfig`) and
//!   loads the ones that exist.

pub mod config_file;
pub mod discovery;

pub use config_file::{ConfigFile, StorageError};
pub use discovery::{
    default_backends, default_paths, default_paths_from, file_stack, load_backends,
    repository_stack,
};
