//! Configuration loading and resolution.

use std::path::PathBuf;

use clap::Args;

use fontgrab::http_client::DEFAULT_TIMEOUT_MS;
use fontgrab::{parse_page_url, FontFormat, FontgrabError, PipelineConfig, Url, DEFAULT_CONCURRENCY};

/// Environment variable overriding the default output directory.
pub const OUTPUT_DIR_ENV: &str = "FONTGRAB_OUTPUT_DIR";

/// Arguments of the default (download) command.
#[derive(Args, Debug, Clone)]
pub struct GrabArgs {
    /// Page to scan for font files.
    pub url: Option<String>,

    /// Formats to keep (all, woff2, woff, ttf, otf, eot). Repeat or comma-separate.
    #[arg(short, long = "format", value_delimiter = ',', default_value = "all")]
    pub formats: Vec<FontFormat>,

    /// Number of requests in flight per batch.
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Directory to save fonts in.
    /// Also reads from FONTGRAB_OUTPUT_DIR env var.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Download every reachable font without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Hide progress bars.
    #[arg(long)]
    pub no_progress: bool,
}

/// Errors turning command-line input into a run configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Missing page URL. Usage: fontgrab <URL>")]
    MissingUrl,

    #[error(transparent)]
    Pipeline(#[from] FontgrabError),
}

/// Everything a run needs, validated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub page_url: Url,
    pub pipeline: PipelineConfig,
    /// Ask which fonts to download.
    pub interactive: bool,
    /// Emit the run summary as JSON on stdout.
    pub json: bool,
    pub show_progress: bool,
}

impl RunConfig {
    /// Validate parsed arguments. `--json` implies `--yes` and no progress bars.
    pub fn from_args(args: &GrabArgs, json: bool) -> Result<Self, ConfigError> {
        let raw_url = args.url.as_deref().ok_or(ConfigError::MissingUrl)?;
        let page_url = parse_page_url(raw_url)?;

        let mut formats = args.formats.clone();
        if formats.is_empty() {
            formats.push(FontFormat::All);
        }

        let pipeline = PipelineConfig {
            formats,
            concurrency: args.concurrency,
            output_dir: resolve_output_dir(args.output.as_deref()),
            timeout_ms: args.timeout,
        };
        pipeline.validate()?;

        Ok(Self {
            page_url,
            pipeline,
            interactive: !(args.yes || json),
            json,
            show_progress: !(args.no_progress || json),
        })
    }
}

/// Resolve the output directory: flag, then environment, then the default.
pub fn resolve_output_dir(explicit: Option<&str>) -> PathBuf {
    resolve_output_dir_with(explicit, std::env::var(OUTPUT_DIR_ENV).ok())
}

fn resolve_output_dir_with(explicit: Option<&str>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Some(env_path) = env_value.filter(|v| !v.trim().is_empty()) {
        return PathBuf::from(env_path);
    }

    default_output_dir()
}

fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Downloads")
        .join("fontgrab")
}
