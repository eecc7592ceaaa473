//! # gitconf-core
//!
//! Parser, serializer and layered lookup for Git-style configuration files.
//!
//! This crate has no dependencies on the file system or the environment:
//! callers hand it text and get a structured [`ConfigDict`] back, or build a
//! store with `set` and render it to text.  Locating `~/.gitconfig` and
//! friends is the job of the `gitconf-cli` crate.
//!
//! # Architecture overview (for beginners)
//!
//! A Git config file looks like an INI file with a few twists:
//!
//! ```text
//! [core]
//!     filemode = true
//!     bare                      ; a bare key means "true"
//! [branch "main"]               ; quoted subsection, case-sensitive
//!     remote = origin
//!     merge = "refs/heads/main" # inline comment
//! ```
//!
//! The crate is split into three layers:
//!
//! - **`codec`** – Escaping (`\t`, `\n`, `\"`, `\\`) and quoting of values.
//!
//! - **`domain`** – The in-memory model: name validation, [`SectionKey`],
//!   the insertion-ordered [`ConfigDict`] and the priority-ordered
//!   [`StackedConfig`].
//!
//! - **`parser`** – The line scanner that turns text into a `ConfigDict`, and
//!   the writer that turns it back.

pub mod codec;
pub mod domain;
pub mod error;
pub mod parser;

pub use codec::{escape, format_value, parse_value, unescape};
pub use domain::{
    is_valid_section_name, is_valid_subsection_name, is_valid_variable_name, parse_boolean,
    ConfigDict, ConfigSink, ConfigSource, ConfigValue, FoldedName, SectionKey, StackedConfig,
};
pub use error::{ConfigError, NameKind, Result};
pub use parser::{parse_lines, parse_str};
