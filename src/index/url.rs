//! Source URL construction.

/// Build the retrievable URL for a repository-relative path.
///
/// Each path segment is percent-encoded (everything except `A-Z a-z 0-9 - _ . ~`);
/// the `/` separators are kept. `raw_base` must already end in `/`.
pub fn source_url(raw_base: &str, rel_path: &str) -> String {
    let encoded = rel_path
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");
    format!("{}{}", raw_base, encoded)
}
