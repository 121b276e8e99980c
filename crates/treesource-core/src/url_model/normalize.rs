//! Duplicate-separator collapsing that leaves scheme separators alone.

/// Schemes whose `//` separator must survive normalization.
const SCHEMES: [&str; 2] = ["http:", "https:"];

/// Collapses every run of two or more `/` into a single `/`, except a run that
/// directly follows `http:` or `https:` (ASCII case-insensitive), which
/// becomes exactly `//`.
///
/// Pure string function; idempotent.
pub fn normalize(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(idx) = rest.find('/') {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);

        let run = tail.len() - tail.trim_start_matches('/').len();
        if follows_scheme(&out) {
            out.push_str(&tail[..run.min(2)]);
        } else {
            out.push('/');
        }
        rest = &tail[run..];
    }
    out.push_str(rest);
    out
}

fn follows_scheme(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    SCHEMES.iter().any(|scheme| {
        bytes.len() >= scheme.len()
            && bytes[bytes.len() - scheme.len()..].eq_ignore_ascii_case(scheme.as_bytes())
    })
}
