//! fontgrab — find the font files a web page references and download them.
//!
//! The pipeline scans a page's markup, text and JSON-LD for URLs, keeps the
//! ones that look like font files, checks which of them are reachable, and
//! downloads a selection in fixed-size concurrent batches.

pub mod batch;
pub mod extract;
pub mod filter;
pub mod http_client;
pub mod pipeline;
pub mod probe;
pub mod progress;
pub mod retrieve;
pub mod scanner;
pub mod types;

pub use batch::run_batched;
pub use extract::extract;
pub use filter::{filter_by_extensions, filter_by_formats, last_path_segment};
pub use http_client::HttpClient;
pub use pipeline::{parse_page_url, FontPipeline, PipelineConfig, DEFAULT_CONCURRENCY};
pub use scanner::{scan, scan_document};
pub use types::*;
pub use url::Url;
