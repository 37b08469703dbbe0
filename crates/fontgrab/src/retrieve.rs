//! Download confirmed font URLs into an output directory.
//!
//! Every URL yields exactly one `DownloadOutcome`; nothing short of failing
//! to create the output directory aborts the stage. Files are named after
//! the URL's last path segment and overwrite whatever is already there.
//! Two URLs sharing a filename race on the same file; the last write wins.

use std::path::Path;

use crate::batch::run_batched;
use crate::filter::last_path_segment;
use crate::http_client::HttpClient;
use crate::progress::{emit, ProgressEventKind, ProgressSender, Stage};
use crate::types::{DownloadOutcome, FontgrabResult};

/// Filename recorded when none could be derived or the transfer failed.
pub const UNKNOWN_FILENAME: &str = "unknown";

/// Reason recorded for URLs without a usable last path segment.
pub const NO_FILENAME: &str = "no filename found";

/// Download every URL into `output_dir` in batches of `limit`.
///
/// Creates `output_dir` (and its parents) first. Outcomes come back in input
/// order.
pub async fn retrieve(
    client: &HttpClient,
    urls: &[String],
    output_dir: &Path,
    limit: usize,
    progress: Option<&ProgressSender>,
) -> FontgrabResult<Vec<DownloadOutcome>> {
    tokio::fs::create_dir_all(output_dir).await?;

    emit(
        progress,
        Stage::Download,
        ProgressEventKind::StageStarted { total: urls.len() },
    );

    let outcomes = run_batched(urls, limit, move |url| async move {
        let outcome = fetch_and_save(client, url, output_dir).await;
        emit(
            progress,
            Stage::Download,
            ProgressEventKind::ItemFinished {
                url: url.clone(),
                ok: outcome.success,
            },
        );
        outcome
    })
    .await;

    let succeeded = outcomes.iter().filter(|o| o.success).count();
    tracing::info!(
        succeeded,
        failed = outcomes.len() - succeeded,
        dir = %output_dir.display(),
        "download finished"
    );
    emit(
        progress,
        Stage::Download,
        ProgressEventKind::StageCompleted {
            succeeded,
            total: urls.len(),
        },
    );

    Ok(outcomes)
}

/// Fetch one URL and write it to `output_dir`. Never fails; every error is
/// folded into the outcome.
pub async fn fetch_and_save(client: &HttpClient, url: &str, output_dir: &Path) -> DownloadOutcome {
    let filename = match last_path_segment(url) {
        Some(name) if !name.is_empty() => name,
        _ => return DownloadOutcome::failed(url, UNKNOWN_FILENAME, NO_FILENAME),
    };

    let resp = match client.get_bytes(url).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(url, error = %e, "download failed");
            return DownloadOutcome::failed(url, UNKNOWN_FILENAME, e.to_string());
        }
    };

    if !resp.is_success() {
        tracing::warn!(url, status = resp.status, "download rejected");
        return DownloadOutcome::failed(url, &filename, format!("HTTP {}", resp.status));
    }

    let path = output_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&path, &resp.body).await {
        tracing::warn!(url, path = %path.display(), error = %e, "write failed");
        return DownloadOutcome::failed(url, UNKNOWN_FILENAME, e.to_string());
    }

    tracing::debug!(url, path = %path.display(), bytes = resp.body.len(), "saved");
    DownloadOutcome::saved(url, &filename, path)
}
