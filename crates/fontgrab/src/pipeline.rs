//! End-to-end pipeline: discover → filter → probe → retrieve.
//!
//! `FontPipeline` binds one HTTP client to one `PipelineConfig` and exposes
//! each stage separately so a caller can show progress per stage and insert
//! its own selection step between probing and retrieval. Stages that leave
//! nothing to work on return the matching fatal error.

use std::path::PathBuf;

use url::Url;

use crate::filter::filter_by_formats;
use crate::http_client::{HttpClient, DEFAULT_TIMEOUT_MS};
use crate::probe;
use crate::progress::ProgressSender;
use crate::retrieve;
use crate::scanner;
use crate::types::{DownloadOutcome, FontFormat, FontgrabError, FontgrabResult};

/// Default number of requests in flight per batch.
pub const DEFAULT_CONCURRENCY: usize = 30;

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Formats to keep after discovery.
    pub formats: Vec<FontFormat>,
    /// Batch size for probing and downloading.
    pub concurrency: usize,
    /// Directory downloaded fonts are written to.
    pub output_dir: PathBuf,
    /// Per-request timeout.
    pub timeout_ms: u64,
}

impl PipelineConfig {
    /// A config with default formats, concurrency and timeout.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            formats: vec![FontFormat::All],
            concurrency: DEFAULT_CONCURRENCY,
            output_dir: output_dir.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn validate(&self) -> FontgrabResult<()> {
        if self.concurrency == 0 {
            return Err(FontgrabError::InvalidConcurrency(self.concurrency));
        }
        Ok(())
    }

    /// Comma-separated list of requested formats, for messages.
    pub fn formats_label(&self) -> String {
        self.formats
            .iter()
            .map(FontFormat::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse and check a target page URL. Only http and https are accepted.
pub fn parse_page_url(input: &str) -> FontgrabResult<Url> {
    let url = Url::parse(input.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FontgrabError::UnsupportedScheme(other.to_string())),
    }
}

/// A configured pipeline.
pub struct FontPipeline {
    client: HttpClient,
    config: PipelineConfig,
}

impl FontPipeline {
    pub fn new(config: PipelineConfig) -> FontgrabResult<Self> {
        config.validate()?;
        Ok(Self {
            client: HttpClient::new(config.timeout_ms),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Every URL referenced by the page, absolutized, sorted and unique.
    pub async fn discover(&self, page_url: &Url) -> FontgrabResult<Vec<String>> {
        scanner::scan(&self.client, page_url.as_str()).await
    }

    /// Discovered URLs narrowed to the configured formats. Empty is fatal.
    pub fn candidates(&self, discovered: &[String]) -> FontgrabResult<Vec<String>> {
        let candidates = filter_by_formats(discovered, &self.config.formats);
        tracing::info!(
            candidates = candidates.len(),
            discovered = discovered.len(),
            formats = %self.config.formats_label(),
            "filtered by extension"
        );
        if candidates.is_empty() {
            return Err(FontgrabError::NoCandidates(self.config.formats_label()));
        }
        Ok(candidates)
    }

    /// Candidates that answer a HEAD request. Empty is fatal.
    pub async fn probe(
        &self,
        candidates: &[String],
        progress: Option<&ProgressSender>,
    ) -> FontgrabResult<Vec<String>> {
        let reachable = probe::probe(
            &self.client,
            candidates,
            self.config.concurrency,
            progress,
        )
        .await;
        if reachable.is_empty() {
            return Err(FontgrabError::NoReachable(candidates.len()));
        }
        Ok(reachable)
    }

    /// Download the selected URLs. An empty selection is fatal.
    pub async fn retrieve(
        &self,
        selected: &[String],
        progress: Option<&ProgressSender>,
    ) -> FontgrabResult<Vec<DownloadOutcome>> {
        if selected.is_empty() {
            return Err(FontgrabError::NothingSelected);
        }
        retrieve::retrieve(
            &self.client,
            selected,
            &self.config.output_dir,
            self.config.concurrency,
            progress,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_url() {
        assert!(parse_page_url("https://example.com/fonts").is_ok());
        assert!(parse_page_url("  http://example.com  ").is_ok());
        assert!(matches!(
            parse_page_url("ftp://example.com/"),
            Err(FontgrabError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            parse_page_url("example.com"),
            Err(FontgrabError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = PipelineConfig::new("/tmp/fonts");
        config.concurrency = 0;
        assert!(matches!(
            FontPipeline::new(config),
            Err(FontgrabError::InvalidConcurrency(0))
        ));
    }

    #[test]
    fn test_candidates_empty_is_fatal() {
        let mut config = PipelineConfig::new("/tmp/fonts");
        config.formats = vec![FontFormat::Woff2, FontFormat::Ttf];
        let pipeline = FontPipeline::new(config).unwrap();

        let discovered = vec!["https://a.example/style.css".to_string()];
        match pipeline.candidates(&discovered) {
            Err(FontgrabError::NoCandidates(label)) => assert_eq!(label, "woff2, ttf"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_selection_is_fatal() {
        let pipeline = FontPipeline::new(PipelineConfig::new("/tmp/fonts")).unwrap();
        assert!(matches!(
            pipeline.retrieve(&[], None).await,
            Err(FontgrabError::NothingSelected)
        ));
    }
}
