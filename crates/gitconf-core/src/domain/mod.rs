//! Configuration model: names, section keys, the store and the stack.
//!
//! Nothing in here touches files or the environment; callers hand in text
//! (via [`crate::parser`]) or build stores with `set`.

pub mod config_dict;
pub mod names;
pub mod section;
pub mod stacked;

pub use config_dict::{parse_boolean, ConfigDict, ConfigValue};
pub use names::{is_valid_section_name, is_valid_subsection_name, is_valid_variable_name};
pub use section::{FoldedName, SectionKey};
pub use stacked::{ConfigSink, ConfigSource, StackedConfig};
