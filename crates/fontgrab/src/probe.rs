//! Reachability probing: HEAD every candidate, keep the ones that answer.

use crate::batch::run_batched;
use crate::http_client::HttpClient;
use crate::progress::{emit, ProgressEventKind, ProgressSender, Stage};
use crate::types::ProbeResult;

/// HEAD every URL in batches of `limit`, returning a result per URL in input
/// order.
pub async fn probe_all(
    client: &HttpClient,
    urls: &[String],
    limit: usize,
    progress: Option<&ProgressSender>,
) -> Vec<ProbeResult> {
    emit(
        progress,
        Stage::Probe,
        ProgressEventKind::StageStarted { total: urls.len() },
    );

    let results = run_batched(urls, limit, move |url| async move {
        let reachable = client.head_ok(url).await;
        emit(
            progress,
            Stage::Probe,
            ProgressEventKind::ItemFinished {
                url: url.clone(),
                ok: reachable,
            },
        );
        ProbeResult {
            url: url.clone(),
            reachable,
        }
    })
    .await;

    let succeeded = results.iter().filter(|r| r.reachable).count();
    tracing::info!(reachable = succeeded, total = urls.len(), "probe finished");
    emit(
        progress,
        Stage::Probe,
        ProgressEventKind::StageCompleted {
            succeeded,
            total: urls.len(),
        },
    );

    results
}

/// The subset of `urls` that answered a HEAD with a success status, in
/// input order.
pub async fn probe(
    client: &HttpClient,
    urls: &[String],
    limit: usize,
    progress: Option<&ProgressSender>,
) -> Vec<String> {
    probe_all(client, urls, limit, progress)
        .await
        .into_iter()
        .filter(|r| r.reachable)
        .map(|r| r.url)
        .collect()
}
