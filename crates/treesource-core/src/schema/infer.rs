//! Schema inference from a delimited header line.
//!
//! Splitting is naive: the delimiter is matched literally with no quote or
//! escape handling, so `"a,b",c` yields three tokens.

use super::{Field, Schema, BODY_FIELD, OFFSET_FIELD};

/// Splits `line` on `delimiter`. An empty delimiter yields the whole line.
pub fn split_delimited<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        vec![line]
    } else {
        line.split(delimiter).collect()
    }
}

/// One text field per token of the first line of `text`, trimmed, in order.
///
/// Tokens are neither de-duplicated nor validated; see `Schema::validate_names`.
pub fn from_delimited_header(text: &str, delimiter: &str) -> Schema {
    let header = text.split('\n').next().unwrap_or_default();
    let fields = split_delimited(header, delimiter)
        .into_iter()
        .map(|token| Field::text(token.trim()))
        .collect();
    Schema::new(fields)
}

/// The `{offset: integer, body: text}` schema used when no header is inferred.
pub fn default_schema() -> Schema {
    Schema::new(vec![Field::integer(OFFSET_FIELD), Field::text(BODY_FIELD)])
}

/// Suffix test on the path; content is never inspected.
pub fn is_delimited_file(path: &str, suffix: &str) -> bool {
    !suffix.is_empty() && path.ends_with(suffix)
}
