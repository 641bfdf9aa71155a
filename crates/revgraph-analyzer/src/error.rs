//! Analysis-side error types.

use revgraph_core::FormatError;
use thiserror::Error;

/// Failures a producer can report.
///
/// These are collaborator failures (the artifact or the engine), distinct
/// from the core's own `FormatError`/`InvariantError` pair; a producer that
/// succeeds with zero edges returns a normal aggregate, not an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The artifact behind the coordinate could not be obtained.
    #[error("artifact unavailable for {coordinate}")]
    ArtifactUnavailable { coordinate: String },

    /// The analysis engine failed while processing the artifact.
    #[error("analysis engine failure: {message}")]
    EngineFailure { message: String },

    /// No producer is registered under the configured backend name.
    #[error("unknown analyzer backend: '{name}'")]
    UnknownBackend { name: String },

    /// A replayed document could not be decoded into an aggregate.
    #[error("replayed document is invalid: {0}")]
    InvalidDocument(#[from] FormatError),
}
