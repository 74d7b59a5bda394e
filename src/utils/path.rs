//! Slash-delimited key path helpers.
//!
//! Keys are always treated as rooted: `a/b`, `/a/b/` and `//a/./b` all
//! normalize to `/a/b`. `..` never climbs above the root.

/// Path separator used by keys
pub const SEPARATOR: char = '/';

/// Root path every key lies under
pub const ROOT: &str = "/";

/// Normalizes a key into its canonical rooted form.
///
/// # Examples
/// ```
/// use kv_watch::path::clean_path;
///
/// assert_eq!(clean_path("a/b/"), "/a/b");
/// assert_eq!(clean_path("//a/./c/../b"), "/a/b");
/// assert_eq!(clean_path(""), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return ROOT.to_string();
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    for segment in segments {
        cleaned.push(SEPARATOR);
        cleaned.push_str(segment);
    }
    cleaned
}

/// Every ancestor of a normalized key, root first, the key itself last.
///
/// `/a/b/c` yields `/`, `/a`, `/a/b`, `/a/b/c`; `/` yields only `/`.
pub fn ancestors(key: &str) -> impl Iterator<Item = &str> {
    let root = std::iter::once(ROOT);
    let rest = key
        .match_indices(SEPARATOR)
        .skip(1)
        .map(move |(i, _)| &key[..i])
        .chain((key.len() > 1).then_some(key));
    root.chain(rest)
}

/// Returns true when `key` equals `prefix` or lies beneath it.
///
/// Both arguments must already be normalized. This is path containment,
/// not string prefix: `/ab` is not under `/a`.
pub fn is_under(
    key: &str,
    prefix: &str,
) -> bool {
    if prefix == ROOT {
        return true;
    }
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}
