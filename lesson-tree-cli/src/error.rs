use thiserror::Error;

use lesson_tree_lib::{PipelineError, ProbeError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// The HTTP client could not be built
    #[error("Probe setup failed: {0}")]
    Probe(#[from] ProbeError),

    /// The audited site has problems
    #[error("{0}")]
    Unresolved(String),
}

impl CliError {
    pub(crate) fn unresolved(msg: impl Into<String>) -> Self {
        Self::Unresolved(msg.into())
    }
}
