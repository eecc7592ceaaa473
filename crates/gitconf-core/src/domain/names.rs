//! Character grammar for section, subsection and variable names.

/// Returns `true` if `name` is a legal section name.
///
/// Section names are non-empty and made of ASCII alphanumerics, `-` and `.`.
pub fn is_valid_section_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

/// Returns `true` if `name` is a legal variable name.
///
/// Same as a section name, minus the `.`.
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Returns `true` if `name` can be stored as a subsection.
///
/// Subsections are free text, but a newline or NUL cannot be represented
/// inside a quoted header.
pub fn is_valid_subsection_name(name: &str) -> bool {
    !name.contains(['\n', '\0'])
}
