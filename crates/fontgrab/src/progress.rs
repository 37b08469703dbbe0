//! Progress events and broadcast channel for stage telemetry.
//!
//! The prober and retriever emit `ProgressEvent`s which flow through a
//! `tokio::sync::broadcast` channel to whoever subscribed (the CLI progress
//! bar, tests). When no subscriber exists, events are silently dropped.

use serde::{Deserialize, Serialize};

/// A progress event emitted by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub event: ProgressEventKind,
}

/// Which stage produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Probe,
    Download,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Probe => write!(f, "Checking"),
            Self::Download => write!(f, "Downloading"),
        }
    }
}

/// The specific kind of progress event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEventKind {
    /// A stage is about to process `total` items.
    StageStarted { total: usize },
    /// One item finished, successfully or not.
    ItemFinished { url: String, ok: bool },
    /// The stage is done; `succeeded` of `total` items went well.
    StageCompleted { succeeded: usize, total: usize },
}

/// Sender handle for emitting progress events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(1024)
}

/// Emit a progress event if a sender is present, ignoring send errors.
pub fn emit(sender: Option<&ProgressSender>, stage: Stage, event: ProgressEventKind) {
    if let Some(tx) = sender {
        let _ = tx.send(ProgressEvent { stage, event });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_receivers_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        emit(Some(&tx), Stage::Probe, ProgressEventKind::StageStarted { total: 1 });
        emit(None, Stage::Probe, ProgressEventKind::StageStarted { total: 1 });
    }

    #[tokio::test]
    async fn test_emit_reaches_subscriber() {
        let (tx, mut rx) = channel();
        emit(
            Some(&tx),
            Stage::Download,
            ProgressEventKind::ItemFinished {
                url: "https://a.example/x.woff".into(),
                ok: true,
            },
        );
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.stage, Stage::Download);
        assert!(matches!(ev.event, ProgressEventKind::ItemFinished { ok: true, .. }));
    }

    #[test]
    fn test_event_json_shape() {
        let ev = ProgressEvent {
            stage: Stage::Probe,
            event: ProgressEventKind::StageCompleted {
                succeeded: 2,
                total: 3,
            },
        };
        let v = serde_json::to_value(&ev).unwrap();
        assert_eq!(v["stage"], "probe");
        assert_eq!(v["event"]["type"], "StageCompleted");
        assert_eq!(v["event"]["succeeded"], 2);
    }
}
