//! Error types for the CLI runtime.

use std::io;

use thiserror::Error;
use wasmguard_syntax::ProcessError;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("failed to write summary: {0}")]
    Summary(io::Error),
}
