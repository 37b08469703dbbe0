//! Core data types shared by every pipeline stage.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A font container type from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    /// Every other format in the catalog.
    All,
    Woff2,
    Woff,
    Ttf,
    Otf,
    Eot,
}

impl FontFormat {
    /// The whole catalog, in display order.
    pub const CATALOG: [FontFormat; 6] = [
        FontFormat::All,
        FontFormat::Woff2,
        FontFormat::Woff,
        FontFormat::Ttf,
        FontFormat::Otf,
        FontFormat::Eot,
    ];

    /// Catalog name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Woff2 => "woff2",
            Self::Woff => "woff",
            Self::Ttf => "ttf",
            Self::Otf => "otf",
            Self::Eot => "eot",
        }
    }

    /// File extensions (without the leading dot) this format stands for.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::All => &["woff2", "woff", "ttf", "otf", "eot"],
            Self::Woff2 => &["woff2"],
            Self::Woff => &["woff"],
            Self::Ttf => &["ttf"],
            Self::Otf => &["otf"],
            Self::Eot => &["eot"],
        }
    }

    /// Union of the extensions of several formats, first occurrence wins.
    pub fn extensions_of(formats: &[FontFormat]) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = Vec::new();
        for format in formats {
            for ext in format.extensions() {
                if !exts.contains(ext) {
                    exts.push(ext);
                }
            }
        }
        exts
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFormat {
    type Err = FontgrabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('.');
        Self::CATALOG
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FontgrabError::UnknownFormat(s.to_string()))
    }
}

/// Result of a single reachability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    pub reachable: bool,
}

/// What happened to one URL handed to the retriever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub url: String,
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Where the file was written, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl DownloadOutcome {
    pub fn saved(url: &str, filename: &str, path: PathBuf) -> Self {
        Self {
            url: url.to_string(),
            filename: filename.to_string(),
            success: true,
            error: None,
            path: Some(path),
        }
    }

    pub fn failed(url: &str, filename: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            filename: filename.to_string(),
            success: false,
            error: Some(error.into()),
            path: None,
        }
    }
}

/// Download outcomes split by success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadReport {
    pub succeeded: Vec<DownloadOutcome>,
    pub failed: Vec<DownloadOutcome>,
}

impl DownloadReport {
    pub fn from_outcomes(outcomes: Vec<DownloadOutcome>) -> Self {
        let (succeeded, failed) = outcomes.into_iter().partition(|o| o.success);
        Self { succeeded, failed }
    }

    /// Zero successes and zero failures: there was nothing to do.
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }
}

/// All errors that can abort a fontgrab run.
#[derive(thiserror::Error, Debug)]
pub enum FontgrabError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown font format: {0}")]
    UnknownFormat(String),

    #[error("Invalid concurrency limit: {0} (must be at least 1)")]
    InvalidConcurrency(usize),

    #[error("No font URLs matching {0} were found on the page")]
    NoCandidates(String),

    #[error("None of the {0} candidate font URLs are reachable")]
    NoReachable(usize),

    #[error("No fonts were selected for download")]
    NothingSelected,
}

/// Convenience result type.
pub type FontgrabResult<T> = Result<T, FontgrabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_aggregates_every_other_format() {
        let mut expected: Vec<&str> = FontFormat::CATALOG
            .iter()
            .filter(|f| **f != FontFormat::All)
            .flat_map(|f| f.extensions().iter().copied())
            .collect();
        expected.sort();
        let mut all = FontFormat::All.extensions().to_vec();
        all.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("WOFF2".parse::<FontFormat>().unwrap(), FontFormat::Woff2);
        assert_eq!(".ttf".parse::<FontFormat>().unwrap(), FontFormat::Ttf);
        assert_eq!("all".parse::<FontFormat>().unwrap(), FontFormat::All);
        assert!(matches!(
            "svg".parse::<FontFormat>(),
            Err(FontgrabError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_extensions_of_dedups() {
        let exts = FontFormat::extensions_of(&[FontFormat::Woff, FontFormat::All]);
        assert_eq!(exts, vec!["woff", "woff2", "ttf", "otf", "eot"]);
    }

    #[test]
    fn test_report_partition() {
        let report = DownloadReport::from_outcomes(vec![
            DownloadOutcome::saved("https://a/x.ttf", "x.ttf", PathBuf::from("/tmp/x.ttf")),
            DownloadOutcome::failed("https://a/y.ttf", "y.ttf", "HTTP 404"),
            DownloadOutcome::saved("https://a/z.ttf", "z.ttf", PathBuf::from("/tmp/z.ttf")),
        ]);
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.succeeded[1].filename, "z.ttf");
        assert!(!report.is_empty());
        assert!(DownloadReport::from_outcomes(Vec::new()).is_empty());
    }
}
