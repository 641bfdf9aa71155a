//! Replay backend: re-reads previously encoded call graph documents.
//!
//! Useful for offline pipelines and tests where the heavyweight engines do
//! not run. Documents live under one directory, named by revision key
//! (`<forge>!<product>$<version>.json`).

use std::io;
use std::path::{Path, PathBuf};

use revgraph_core::RevisionCallGraph;

use crate::coordinate::Coordinate;
use crate::error::AnalysisError;
use crate::producer::CallGraphProducer;

/// Producer that replays stored wire documents instead of analyzing bytecode.
#[derive(Debug)]
pub struct ReplayProducer {
    dir: PathBuf,
    generator: String,
}

impl ReplayProducer {
    /// Creates a replay producer rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ReplayProducer {
            dir: dir.into(),
            generator: "replay".to_string(),
        }
    }

    /// The file a coordinate's document is expected at.
    pub fn document_path(&self, coordinate: &Coordinate) -> PathBuf {
        self.dir.join(format!("{coordinate}.json"))
    }

    fn read_document(&self, path: &Path, coordinate: &Coordinate) -> Result<String, AnalysisError> {
        std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                AnalysisError::ArtifactUnavailable {
                    coordinate: coordinate.to_string(),
                }
            } else {
                AnalysisError::EngineFailure {
                    message: format!("failed to read {}: {err}", path.display()),
                }
            }
        })
    }
}

impl CallGraphProducer for ReplayProducer {
    fn generator(&self) -> &str {
        &self.generator
    }

    fn produce(
        &self,
        coordinate: &Coordinate,
        timestamp: Option<i64>,
    ) -> Result<RevisionCallGraph, AnalysisError> {
        let path = self.document_path(coordinate);
        tracing::debug!(path = %path.display(), "replaying stored call graph document");

        let raw = self.read_document(&path, coordinate)?;
        let aggregate = RevisionCallGraph::from_json_str(&raw)?;

        // The stored document wins; the message timestamp only fills a gap.
        match (aggregate.timestamp(), timestamp) {
            (None, Some(stamp)) => {
                let rebuilt = RevisionCallGraph::from_parts(
                    aggregate.forge().to_string(),
                    aggregate.product().to_string(),
                    aggregate.version().to_string(),
                    aggregate.generator().to_string(),
                    Some(stamp),
                    aggregate.depset().clone(),
                    aggregate.hierarchy().clone(),
                    aggregate.graph().clone(),
                )
                .map_err(revgraph_core::FormatError::from)?;
                Ok(rebuilt)
            }
            _ => Ok(aggregate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revgraph_core::{ClassHierarchy, MethodId, TypeInfo, Uri};

    fn stored_aggregate(timestamp: Option<i64>) -> RevisionCallGraph {
        let mut info = TypeInfo::new("A.java");
        info.add_method(MethodId(1), Uri::new("id:A#foo"));
        let mut cha = ClassHierarchy::new();
        cha.insert(Uri::new("id:A"), info);

        let mut builder = RevisionCallGraph::builder()
            .forge("mvn")
            .product("demo")
            .version("1.0.0")
            .generator("replay")
            .hierarchy(cha);
        if let Some(stamp) = timestamp {
            builder = builder.timestamp(stamp);
        }
        builder.build().unwrap()
    }

    #[test]
    fn replays_a_stored_document() {
        let dir = tempfile::tempdir().unwrap();
        let producer = ReplayProducer::new(dir.path());
        let coordinate = Coordinate::new("mvn", "demo", "1.0.0");

        let stored = stored_aggregate(Some(100));
        std::fs::write(
            producer.document_path(&coordinate),
            stored.to_json_string(),
        )
        .unwrap();

        let replayed = producer.produce(&coordinate, None).unwrap();
        assert_eq!(replayed, stored);
    }

    #[test]
    fn missing_document_is_artifact_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let producer = ReplayProducer::new(dir.path());
        let err = producer
            .produce(&Coordinate::new("mvn", "absent", "1.0.0"), None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ArtifactUnavailable { .. }));
    }

    #[test]
    fn corrupt_document_is_an_invalid_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let producer = ReplayProducer::new(dir.path());
        let coordinate = Coordinate::new("mvn", "demo", "1.0.0");
        std::fs::write(producer.document_path(&coordinate), "{not json").unwrap();

        let err = producer.produce(&coordinate, None).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidDocument(_)));
    }

    #[test]
    fn message_timestamp_fills_a_missing_one() {
        let dir = tempfile::tempdir().unwrap();
        let producer = ReplayProducer::new(dir.path());
        let coordinate = Coordinate::new("mvn", "demo", "1.0.0");
        std::fs::write(
            producer.document_path(&coordinate),
            stored_aggregate(None).to_json_string(),
        )
        .unwrap();

        let replayed = producer.produce(&coordinate, Some(1_574_072_773)).unwrap();
        assert_eq!(replayed.timestamp(), Some(1_574_072_773));
    }

    #[test]
    fn stored_timestamp_wins_over_the_message() {
        let dir = tempfile::tempdir().unwrap();
        let producer = ReplayProducer::new(dir.path());
        let coordinate = Coordinate::new("mvn", "demo", "1.0.0");
        std::fs::write(
            producer.document_path(&coordinate),
            stored_aggregate(Some(100)).to_json_string(),
        )
        .unwrap();

        let replayed = producer.produce(&coordinate, Some(200)).unwrap();
        assert_eq!(replayed.timestamp(), Some(100));
    }
}
