//! Narrow candidate URLs down to font files by extension.

use url::Url;

use crate::types::FontFormat;

/// Final `/`-delimited segment of a URL's path (query and fragment excluded).
///
/// Returns `None` for strings that do not parse as absolute URLs. The segment
/// may be empty, e.g. for `https://host/dir/`.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next().unwrap_or("");
    Some(segment.to_string())
}

/// Keep the URLs whose last path segment ends with one of `extensions`.
///
/// Matching is ASCII case-insensitive; extensions may be given with or
/// without a leading dot. Unparseable URLs never match. Order is preserved.
pub fn filter_by_extensions<S: AsRef<str>>(urls: &[String], extensions: &[S]) -> Vec<String> {
    let suffixes: Vec<String> = extensions
        .iter()
        .map(|e| format!(".{}", e.as_ref().trim_start_matches('.').to_ascii_lowercase()))
        .collect();

    urls.iter()
        .filter(|u| match last_path_segment(u) {
            Some(segment) => {
                let segment = segment.to_ascii_lowercase();
                suffixes.iter().any(|s| segment.ends_with(s.as_str()))
            }
            None => false,
        })
        .cloned()
        .collect()
}

/// Keep the URLs matching any extension of the requested formats.
pub fn filter_by_formats(urls: &[String], formats: &[FontFormat]) -> Vec<String> {
    filter_by_extensions(urls, &FontFormat::extensions_of(formats))
}
