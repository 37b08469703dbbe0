//! Regex-based discovery of URL-shaped substrings in arbitrary text.
//!
//! Four pattern classes run independently over the same input and their
//! matches are unioned: absolute `http(s)://` URLs, protocol-relative
//! `//host/...` URLs, bare hostnames with an optional path, and root-relative
//! `/path` references. Matches are cleaned of trailing sentence punctuation
//! and anything too short to be a URL is discarded.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Characters that end a URL match.
const DELIM: &str = r#"\s"'<>{}\\`|^"#;

/// Characters after which a non-absolute pattern may start.
const BOUNDARY: &str = r#"\s"'(=,"#;

/// Trailing characters stripped from every match.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?'];

struct Patterns {
    absolute: Regex,
    protocol_relative: Regex,
    hostname: Regex,
    root_relative: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        absolute: Regex::new(&format!(r"(?i)(https?://[^{DELIM}]+)"))
            .expect("absolute url regex is valid"),
        protocol_relative: Regex::new(&format!(
            r"(?:^|[{BOUNDARY}])(//[^/{DELIM}][^{DELIM}]*)"
        ))
        .expect("protocol-relative regex is valid"),
        hostname: Regex::new(&format!(
            r"(?i)(?:^|[{BOUNDARY}])((?:[a-z0-9](?:[a-z0-9-]{{0,61}}[a-z0-9])?\.)+[a-z]{{2,}}\b(?:/[^{DELIM}]*)?)"
        ))
        .expect("hostname regex is valid"),
        root_relative: Regex::new(&format!(
            r"(?:^|[{BOUNDARY}])(/[^/{DELIM}][^{DELIM}]*)"
        ))
        .expect("root-relative regex is valid"),
    })
}

/// Extract every URL-shaped substring from `text`.
///
/// Overlapping matches from different pattern classes are all kept; only
/// identical cleaned strings collapse.
pub fn extract(text: &str) -> HashSet<String> {
    let p = patterns();
    let mut found = HashSet::new();

    for re in [
        &p.absolute,
        &p.protocol_relative,
        &p.hostname,
        &p.root_relative,
    ] {
        for cap in re.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                if let Some(url) = clean_match(m.as_str()) {
                    found.insert(url);
                }
            }
        }
    }

    found
}

/// Trim, strip trailing punctuation, and reject degenerate matches.
fn clean_match(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_end_matches(TRAILING_PUNCTUATION);
    if cleaned.chars().count() <= 2 {
        return None;
    }
    if cleaned.chars().all(|c| c.is_ascii_punctuation()) {
        return None;
    }
    Some(cleaned.to_string())
}
