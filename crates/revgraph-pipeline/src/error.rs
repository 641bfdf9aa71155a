//! Pipeline error types.

use revgraph_analyzer::AnalysisError;
use revgraph_core::FormatError;
use thiserror::Error;

/// Failure to hand a record to the outbound transport.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The outbound channel has no receiver anymore.
    #[error("outbound channel closed")]
    ChannelClosed,
}

/// Anything that can go wrong while processing one inbound record.
///
/// Recorded into the harvester's per-record state; the record itself is
/// never retried (at-most-once processing).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The inbound coordinate message could not be parsed.
    #[error("malformed inbound message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The producer reported an analysis failure.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Encoding or decoding the aggregate failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The produced document could not be published.
    #[error(transparent)]
    Publish(#[from] PublishError),
}
