//! fontgrab command-line front end.
//!
//! Parses arguments into a [`config::RunConfig`], drives the core pipeline
//! with progress bars and an optional interactive selection step, and
//! renders the result.

pub mod config;
pub mod progress;
pub mod report;
pub mod run;
pub mod select;

pub use config::{GrabArgs, RunConfig};
pub use report::RunSummary;
pub use run::run;
