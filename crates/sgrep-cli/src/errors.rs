//! Error types for the CLI runtime.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Engine(#[from] sgrep::EngineError),
    #[error("{}: no such file or directory", path.display())]
    MissingPath { path: PathBuf },
    #[error("{}: {source}", path.display())]
    UnsearchableFile {
        path: PathBuf,
        source: sgrep_syntax::SyntaxError,
    },
    #[error("failed to start {jobs} search workers: {source}")]
    WorkerPool {
        jobs: usize,
        source: rayon::ThreadPoolBuildError,
    },
    #[error("failed to write results: {0}")]
    WriteOutput(#[source] std::io::Error),
}
