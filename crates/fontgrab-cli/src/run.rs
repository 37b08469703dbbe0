//! One full command-line run: discover, filter, probe, select, download.

use fontgrab::FontPipeline;

use crate::config::RunConfig;
use crate::progress::StageProgress;
use crate::report::RunSummary;
use crate::select;

/// Run every stage for `config`. Fatal pipeline errors end the run early.
pub async fn run(config: RunConfig) -> anyhow::Result<RunSummary> {
    let quiet = config.json;
    let note = |msg: String| {
        if !quiet {
            eprintln!("{msg}");
        }
    };

    let pipeline = FontPipeline::new(config.pipeline.clone())?;

    note(format!("Scanning {}", config.page_url));
    let discovered = pipeline.discover(&config.page_url).await?;

    let candidates = pipeline.candidates(&discovered)?;
    note(format!(
        "Found {} URLs, {} look like {} fonts",
        discovered.len(),
        candidates.len(),
        config.pipeline.formats_label()
    ));

    let bar = StageProgress::start(config.show_progress);
    let probed = pipeline.probe(&candidates, Some(bar.sender())).await;
    bar.finish().await;
    let reachable = probed?;
    note(format!("{} of {} are reachable", reachable.len(), candidates.len()));

    let selected = if config.interactive {
        let offered = reachable.clone();
        tokio::task::spawn_blocking(move || select::prompt_selection(&offered)).await??
    } else {
        reachable.clone()
    };

    let bar = StageProgress::start(config.show_progress);
    let retrieved = pipeline.retrieve(&selected, Some(bar.sender())).await;
    bar.finish().await;
    let outcomes = retrieved?;

    let succeeded = outcomes.iter().filter(|o| o.success).count();
    tracing::info!(succeeded, total = outcomes.len(), "run finished");

    Ok(RunSummary {
        page_url: config.page_url.to_string(),
        output_dir: config.pipeline.output_dir.clone(),
        formats: config.pipeline.formats.clone(),
        failed: outcomes.len() - succeeded,
        succeeded,
        discovered,
        candidates,
        reachable,
        selected,
        outcomes,
    })
}
