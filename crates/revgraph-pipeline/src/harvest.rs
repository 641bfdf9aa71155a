//! Per-message harvest loop.
//!
//! A [`Harvester`] owns one producer and one publisher and turns inbound
//! coordinate messages into published call graph documents. Each message is
//! handled at most once: on any failure the error is recorded into the
//! harvester's per-record state and the message is dropped, never retried.

use revgraph_analyzer::{CallGraphProducer, Coordinate};
use revgraph_core::RevisionCallGraph;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::publish::{OutboundRecord, Publisher};

/// Inbound coordinate message.
///
/// The optional `date` is the analysis timestamp in unix seconds; when
/// present it is handed to the producer alongside the coordinate.
#[derive(Debug, Deserialize)]
struct InboundMessage {
    forge: String,
    product: String,
    version: String,
    #[serde(default)]
    date: Option<i64>,
}

/// Drives producer and publisher for one inbound stream.
pub struct Harvester {
    producer: Box<dyn CallGraphProducer>,
    publisher: Box<dyn Publisher>,
    last_error: Option<PipelineError>,
    processed: bool,
}

impl Harvester {
    pub fn new(producer: Box<dyn CallGraphProducer>, publisher: Box<dyn Publisher>) -> Self {
        Harvester {
            producer,
            publisher,
            last_error: None,
            processed: false,
        }
    }

    /// Whether the most recent message made it through the whole pipeline.
    pub fn processed(&self) -> bool {
        self.processed
    }

    /// The failure recorded for the most recent message, if any.
    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    /// Handles one inbound coordinate message.
    ///
    /// Returns the produced call graph when analysis succeeded, whether or
    /// not it was published: empty graphs are kept but skipped at the
    /// publish step, and a publish failure is recorded rather than retried.
    pub fn handle_message(&mut self, payload: &str) -> Option<RevisionCallGraph> {
        self.last_error = None;
        self.processed = false;

        let message: InboundMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(err) => {
                self.last_error = Some(PipelineError::Malformed(err));
                return None;
            }
        };
        let coordinate = Coordinate::new(message.forge, message.product, message.version);
        info!(%coordinate, "analyzing revision");

        let mut call_graph = match self.producer.produce(&coordinate, message.date) {
            Ok(call_graph) => call_graph,
            Err(err) => {
                self.last_error = Some(PipelineError::Analysis(err));
                return None;
            }
        };

        if call_graph.is_call_graph_empty() {
            warn!(%coordinate, "empty call graph, skipping publication");
            self.processed = true;
            return Some(call_graph);
        }

        call_graph.sort_internal_calls();
        let record = OutboundRecord {
            key: call_graph.revision_id(),
            payload: call_graph.to_json_string(),
        };
        match self.publisher.publish(record) {
            Ok(()) => self.processed = true,
            Err(err) => self.last_error = Some(PipelineError::Publish(err)),
        }
        Some(call_graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use revgraph_analyzer::AnalysisError;
    use revgraph_core::{CallGraph, ClassHierarchy, MethodId, TypeInfo, Uri};

    use crate::error::PublishError;
    use crate::publish::ChannelPublisher;

    #[derive(Debug)]
    struct StubProducer {
        empty: bool,
        fail: bool,
    }

    impl CallGraphProducer for StubProducer {
        fn generator(&self) -> &str {
            "stub-producer"
        }

        fn produce(
            &self,
            coordinate: &Coordinate,
            timestamp: Option<i64>,
        ) -> Result<RevisionCallGraph, AnalysisError> {
            if self.fail {
                return Err(AnalysisError::EngineFailure {
                    message: "injected".to_string(),
                });
            }
            let mut builder = RevisionCallGraph::builder()
                .forge(coordinate.forge.clone())
                .product(coordinate.product.clone())
                .version(coordinate.version.clone())
                .generator(self.generator());
            if let Some(timestamp) = timestamp {
                builder = builder.timestamp(timestamp);
            }
            if !self.empty {
                let mut info = TypeInfo::new("A.java");
                info.add_method(MethodId(1), Uri::new("id:A#foo"));
                let mut hierarchy = ClassHierarchy::default();
                hierarchy.insert(Uri::new("id:A"), info);
                let mut graph = CallGraph::new();
                graph.add_internal(MethodId(1), MethodId(1));
                builder = builder.hierarchy(hierarchy).graph(graph);
            }
            Ok(builder.build().expect("stub graph is consistent"))
        }
    }

    fn harvester(empty: bool, fail: bool) -> (Harvester, tokio::sync::mpsc::UnboundedReceiver<OutboundRecord>) {
        let (publisher, receiver) = ChannelPublisher::new();
        let harvester = Harvester::new(
            Box::new(StubProducer { empty, fail }),
            Box::new(publisher),
        );
        (harvester, receiver)
    }

    #[test]
    fn successful_message_is_published_under_its_revision_key() {
        let (mut harvester, mut receiver) = harvester(false, false);

        let out = harvester
            .handle_message(r#"{"forge":"mvn","product":"demo","version":"1.0.0","date":1400000000}"#)
            .expect("analysis succeeds");
        assert!(harvester.processed());
        assert!(harvester.last_error().is_none());
        assert_eq!(out.timestamp(), Some(1400000000));

        let record = receiver.try_recv().unwrap();
        assert_eq!(record.key, "mvn!demo$1.0.0");
        assert_eq!(record.payload, out.to_json_string());
    }

    #[test]
    fn empty_graph_is_kept_but_not_published() {
        let (mut harvester, mut receiver) = harvester(true, false);

        let out = harvester
            .handle_message(r#"{"forge":"mvn","product":"demo","version":"1.0.0"}"#)
            .expect("analysis succeeds");
        assert!(out.is_call_graph_empty());
        assert!(harvester.processed());
        assert!(harvester.last_error().is_none());
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn malformed_message_is_recorded_and_dropped() {
        let (mut harvester, mut receiver) = harvester(false, false);

        assert!(harvester.handle_message("not json").is_none());
        assert!(!harvester.processed());
        assert!(matches!(
            harvester.last_error(),
            Some(PipelineError::Malformed(_))
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn producer_failure_is_recorded_and_dropped() {
        let (mut harvester, mut receiver) = harvester(false, true);

        assert!(harvester
            .handle_message(r#"{"forge":"mvn","product":"demo","version":"1.0.0"}"#)
            .is_none());
        assert!(!harvester.processed());
        assert!(matches!(
            harvester.last_error(),
            Some(PipelineError::Analysis(AnalysisError::EngineFailure { .. }))
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn publish_failure_is_recorded_not_retried() {
        let (mut harvester, receiver) = harvester(false, false);
        drop(receiver);

        let out = harvester
            .handle_message(r#"{"forge":"mvn","product":"demo","version":"1.0.0"}"#)
            .expect("analysis still succeeds");
        assert!(!out.is_call_graph_empty());
        assert!(!harvester.processed());
        assert!(matches!(
            harvester.last_error(),
            Some(PipelineError::Publish(PublishError::ChannelClosed))
        ));
    }

    #[test]
    fn a_new_message_clears_the_previous_record_state() {
        let (mut harvester, mut receiver) = harvester(false, false);

        assert!(harvester.handle_message("not json").is_none());
        assert!(harvester.last_error().is_some());

        harvester
            .handle_message(r#"{"forge":"mvn","product":"demo","version":"1.0.0"}"#)
            .expect("analysis succeeds");
        assert!(harvester.processed());
        assert!(harvester.last_error().is_none());
        assert!(receiver.try_recv().is_ok());
    }
}
