//! Tree-path helpers: child paths and reference names.

use super::PATH_SEPARATOR;

/// Full path of `name` inside `parent`, adding a separator only when `parent`
/// does not already end with one.
pub fn child_path(parent: &str, name: &str) -> String {
    let separator = if parent.ends_with(PATH_SEPARATOR) {
        ""
    } else {
        PATH_SEPARATOR
    };
    format!("{}{}{}", parent, separator, name)
}

/// Final segment of `path` after the last separator (the whole path when it
/// has none). Used as the reference name of a generated ingest spec.
pub fn reference_name(path: &str) -> &str {
    match path.rfind(PATH_SEPARATOR) {
        Some(idx) => &path[idx + PATH_SEPARATOR.len()..],
        None => path,
    }
}
