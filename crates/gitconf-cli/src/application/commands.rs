//! Use cases for the `get`, `set` and `list` subcommands.

use std::ops::Deref;

use gitconf_core::{ConfigDict, ConfigSink, ConfigSource, Result, StackedConfig};
use serde::Serialize;

use super::key::ConfigKey;

/// Returns the raw value of `key`.
pub fn get_value<'a, S: ConfigSource>(source: &'a S, key: &ConfigKey) -> Result<&'a str> {
    source.get(&key.section, &key.name)
}

/// Returns the value of `key` as a boolean.
pub fn get_bool<S: ConfigSource>(source: &S, key: &ConfigKey) -> Result<bool> {
    source.get_boolean(&key.section, &key.name)
}

/// Writes `value` into the stack's writable backend.
///
/// Only the in-memory backend changes; the caller persists it.
pub fn set_value<C: ConfigSink>(
    stack: &mut StackedConfig<C>,
    key: &ConfigKey,
    value: &str,
) -> Result<()> {
    stack.set(&key.section, &key.name, value)
}

/// One `key=value` line of `gitconf list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Flattens every backend into entries, lowest priority first, so later
/// entries override earlier ones the way `git config --list` prints them.
///
/// Section and variable names are lower-cased; subsections are kept as-is.
pub fn list_entries<C>(stack: &StackedConfig<C>) -> Vec<Entry>
where
    C: Deref<Target = ConfigDict>,
{
    stack
        .backends()
        .iter()
        .rev()
        .flat_map(|backend| dict_entries(&**backend))
        .collect()
}

/// Renders entries as `key=value` lines, or as a JSON array.
pub fn render_entries(entries: &[Entry], json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(entries);
    }
    Ok(entries
        .iter()
        .map(|e| format!("{}={}\n", e.key, e.value))
        .collect())
}

fn dict_entries(dict: &ConfigDict) -> Vec<Entry> {
    let mut entries = Vec::new();
    for section in dict.sections() {
        let prefix = match section.subsection() {
            Some(sub) => format!("{}.{}", section.name().to_lowercase(), sub),
            None => section.name().to_lowercase(),
        };
        for (name, value) in dict.items(section) {
            entries.push(Entry {
                key: format!("{prefix}.{}", name.to_lowercase()),
                value: value.to_string(),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::key::parse_key;
    use crate::infrastructure::storage::ConfigFile;
    use gitconf_core::ConfigError;

    fn file(text: &str) -> ConfigFile {
        ConfigFile::from_dict(text.parse().unwrap())
    }

    fn stack() -> StackedConfig<ConfigFile> {
        let local = file("[core]\n\teditor = nano\n[Branch \"Main\"]\n\tRemote = origin\n");
        let global = file("[core]\n\teditor = vim\n\tbare = off\n");
        StackedConfig::new(vec![local, global]).with_writable(0)
    }

    // ── get ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_value_prefers_highest_priority_backend() {
        let stack = stack();
        let key = parse_key("core.editor").unwrap();
        assert_eq!(get_value(&stack, &key).unwrap(), "nano");
    }

    #[test]
    fn test_get_value_missing_key_is_not_found() {
        let stack = stack();
        let key = parse_key("core.pager").unwrap();
        assert!(get_value(&stack, &key).unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_bool_reads_lower_backend() {
        let stack = stack();
        let key = parse_key("core.bare").unwrap();
        assert!(!get_bool(&stack, &key).unwrap());
    }

    #[test]
    fn test_get_bool_non_boolean_is_invalid_value() {
        let stack = stack();
        let key = parse_key("core.editor").unwrap();
        assert_eq!(
            get_bool(&stack, &key),
            Err(ConfigError::InvalidValue {
                name: "editor".to_string(),
                value: "nano".to_string(),
            })
        );
    }

    // ── set ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_value_writes_to_writable_backend_only() {
        // Arrange
        let mut stack = stack();
        let key = parse_key("core.pager").unwrap();

        // Act
        set_value(&mut stack, &key, "less").unwrap();

        // Assert
        assert_eq!(stack.backends()[0].get(&key.section, "pager").unwrap(), "less");
        assert!(stack.backends()[1].get(&key.section, "pager").is_err());
    }

    #[test]
    fn test_set_value_on_read_only_stack_fails() {
        let mut stack = StackedConfig::new(vec![file("")]);
        let key = parse_key("core.pager").unwrap();
        assert_eq!(
            set_value(&mut stack, &key, "less"),
            Err(ConfigError::NoWritableBackend)
        );
    }

    // ── list ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_list_entries_lowest_priority_first_with_git_style_keys() {
        let entries = list_entries(&stack());
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["core.editor", "core.bare", "core.editor", "branch.Main.remote"]
        );
        assert_eq!(entries[2].value, "nano");
    }

    #[test]
    fn test_render_entries_as_lines() {
        let entries = vec![Entry {
            key: "core.editor".to_string(),
            value: "vim".to_string(),
        }];
        assert_eq!(render_entries(&entries, false).unwrap(), "core.editor=vim\n");
    }

    #[test]
    fn test_render_entries_as_json() {
        let entries = vec![Entry {
            key: "core.editor".to_string(),
            value: "vim".to_string(),
        }];
        let json = render_entries(&entries, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["key"], "core.editor");
        assert_eq!(parsed[0]["value"], "vim");
    }
}
