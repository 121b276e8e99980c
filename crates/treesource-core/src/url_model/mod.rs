//! URL and tree-path modeling.
//!
//! Joins the endpoint base URL with tree paths, collapses duplicate
//! separators, and derives child paths and reference names from paths.

mod normalize;
mod path;

pub use normalize::normalize;
pub use path::{child_path, reference_name};

/// Separator used both in URLs and in tree paths.
pub const PATH_SEPARATOR: &str = "/";

/// Joins `base` and `path` with a separator and normalizes the result.
///
/// # Examples
///
/// - `join("http://host:3000/", "/data/users.csv")` → `"http://host:3000/data/users.csv"`
/// - `join("http://host:3000", "data")` → `"http://host:3000/data"`
pub fn join(base: &str, path: &str) -> String {
    normalize(&format!("{}{}{}", base, PATH_SEPARATOR, path))
}

/// Appends a trailing separator to a base URL that lacks one.
pub fn with_trailing_separator(base: &str) -> String {
    if base.ends_with(PATH_SEPARATOR) {
        base.to_string()
    } else {
        format!("{}{}", base, PATH_SEPARATOR)
    }
}
