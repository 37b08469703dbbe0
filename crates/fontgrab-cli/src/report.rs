//! Rendering of run results, as text for people or JSON for scripts.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use fontgrab::{DownloadOutcome, DownloadReport, FontFormat};

/// Everything a finished run produced, in stage order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub page_url: String,
    pub output_dir: PathBuf,
    pub formats: Vec<FontFormat>,
    pub discovered: Vec<String>,
    pub candidates: Vec<String>,
    pub reachable: Vec<String>,
    pub selected: Vec<String>,
    pub outcomes: Vec<DownloadOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// The outcomes split into successes and failures.
    pub fn report(&self) -> DownloadReport {
        DownloadReport::from_outcomes(self.outcomes.clone())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-readable outcome list. Failures come first, then successes.
pub fn render_text(report: &DownloadReport) -> String {
    if report.is_empty() {
        return "Nothing to download.\n".to_string();
    }

    let mut out = String::new();
    if !report.failed.is_empty() {
        let _ = writeln!(out, "Failed ({}):", report.failed.len());
        for outcome in &report.failed {
            let reason = outcome.error.as_deref().unwrap_or("unknown error");
            let _ = writeln!(out, "  [!!] {}: {reason}", outcome.filename);
            let _ = writeln!(out, "       {}", outcome.url);
        }
    }
    if !report.succeeded.is_empty() {
        let _ = writeln!(out, "Saved ({}):", report.succeeded.len());
        for outcome in &report.succeeded {
            match &outcome.path {
                Some(path) => {
                    let _ = writeln!(out, "  [OK] {} -> {}", outcome.filename, path.display());
                }
                None => {
                    let _ = writeln!(out, "  [OK] {}", outcome.filename);
                }
            }
        }
    }
    out
}

/// The format catalog with the extensions each entry matches.
pub fn render_formats() -> String {
    let mut out = String::new();
    for format in FontFormat::CATALOG {
        let exts: Vec<String> = format.extensions().iter().map(|e| format!(".{e}")).collect();
        let _ = writeln!(out, "{:<6} {}", format.name(), exts.join(" "));
    }
    out
}
