//! Terminal progress bars driven by pipeline progress events.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use fontgrab::progress::{self, ProgressEvent, ProgressEventKind, ProgressReceiver, ProgressSender};

const BAR_TEMPLATE: &str = "{msg:>12} [{bar:30}] {pos}/{len} ({elapsed})";

/// One progress bar for one pipeline stage.
///
/// Hand `sender()` to the stage, then call `finish` once the stage has
/// returned so the bar is drawn to completion before anything else prints.
pub struct StageProgress {
    tx: ProgressSender,
    handle: JoinHandle<()>,
}

impl StageProgress {
    /// Start listening. A disabled bar still drains events but draws nothing.
    pub fn start(enabled: bool) -> Self {
        let (tx, rx) = progress::channel();
        let bar = if enabled {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        let handle = tokio::spawn(drive(bar, rx));
        Self { tx, handle }
    }

    pub fn sender(&self) -> &ProgressSender {
        &self.tx
    }

    /// Close the channel and wait for the bar to finish drawing.
    pub async fn finish(self) {
        drop(self.tx);
        if let Err(e) = self.handle.await {
            tracing::debug!("progress task ended abnormally: {e}");
        }
    }
}

async fn drive(bar: ProgressBar, mut rx: ProgressReceiver) {
    loop {
        match rx.recv().await {
            Ok(event) => apply(&bar, &event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "progress bar lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
    if !bar.is_finished() {
        bar.finish_and_clear();
    }
}

fn apply(bar: &ProgressBar, event: &ProgressEvent) {
    match &event.event {
        ProgressEventKind::StageStarted { total } => {
            bar.set_length(*total as u64);
            bar.set_position(0);
            bar.set_message(event.stage.to_string());
        }
        ProgressEventKind::ItemFinished { .. } => bar.inc(1),
        ProgressEventKind::StageCompleted { succeeded, total } => {
            bar.finish_with_message(format!("{} {succeeded}/{total} ok", event.stage));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontgrab::progress::{emit, Stage};

    #[test]
    fn test_apply_tracks_position() {
        let bar = ProgressBar::hidden();
        let event = |kind| ProgressEvent {
            stage: Stage::Download,
            event: kind,
        };

        apply(&bar, &event(ProgressEventKind::StageStarted { total: 3 }));
        assert_eq!(bar.length(), Some(3));

        for ok in [true, false] {
            apply(
                &bar,
                &event(ProgressEventKind::ItemFinished {
                    url: "https://a.example/x.woff".into(),
                    ok,
                }),
            );
        }
        assert_eq!(bar.position(), 2);

        apply(
            &bar,
            &event(ProgressEventKind::StageCompleted {
                succeeded: 1,
                total: 3,
            }),
        );
        assert!(bar.is_finished());
    }

    #[tokio::test]
    async fn test_finish_returns_after_sender_dropped() {
        let progress = StageProgress::start(false);
        emit(
            Some(progress.sender()),
            Stage::Probe,
            ProgressEventKind::StageStarted { total: 1 },
        );
        progress.finish().await;
    }
}
