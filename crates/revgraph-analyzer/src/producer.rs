//! The producer contract every analyzer backend implements.

use revgraph_core::RevisionCallGraph;

use crate::coordinate::Coordinate;
use crate::error::AnalysisError;

/// One call graph generator behind a common contract.
///
/// Multiple engine backends implement this trait and are selected by
/// configuration through the
/// [`ProducerRegistry`](crate::registry::ProducerRegistry); the pipeline
/// never depends on a concrete engine. Producing an aggregate with zero
/// edges is a success; [`AnalysisError`] is reserved for "no result at all".
pub trait CallGraphProducer: std::fmt::Debug {
    /// The generator name recorded into produced aggregates.
    fn generator(&self) -> &str;

    /// Analyzes one resolved artifact and returns its revision call graph.
    ///
    /// `timestamp` is the analysis time in UNIX seconds when the inbound
    /// message carried one; producers propagate it into the aggregate.
    fn produce(
        &self,
        coordinate: &Coordinate,
        timestamp: Option<i64>,
    ) -> Result<RevisionCallGraph, AnalysisError>;
}
