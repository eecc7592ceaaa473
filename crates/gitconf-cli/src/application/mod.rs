//! Application layer: the use cases behind each `gitconf` subcommand.
//!
//! Nothing here touches the file system.  Commands operate on a
//! [`gitconf_core::StackedConfig`] built by the infrastructure layer, and
//! `main.rs` persists the writable backend afterwards.
//!
//! - **`key`** – Splits a dotted `section.sub.name` key into its parts.
//! - **`commands`** – `get`, `get --bool`, `set` and `list`.

pub mod commands;
pub mod key;

pub use commands::{get_bool, get_value, list_entries, render_entries, set_value, Entry};
pub use key::{parse_key, ConfigKey, KeyError};
