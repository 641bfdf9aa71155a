//! Config-driven backend selection.
//!
//! The registry maps backend names to producer factories. The process picks
//! its backend once at startup from [`AnalyzerConfig`]; nothing selects an
//! engine by type or subclass at analysis time.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::producer::CallGraphProducer;
use crate::replay::ReplayProducer;

/// Backend name of the built-in replay producer.
pub const REPLAY_BACKEND: &str = "replay";

/// Analyzer selection and backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Name of the backend to produce call graphs with.
    pub backend: String,
    /// Directory of previously encoded documents for the replay backend.
    pub replay_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            backend: REPLAY_BACKEND.to_string(),
            replay_dir: None,
        }
    }
}

impl AnalyzerConfig {
    /// Reads the configuration from `REVGRAPH_BACKEND` and
    /// `REVGRAPH_REPLAY_DIR`, falling back to the defaults.
    pub fn from_env() -> Self {
        AnalyzerConfig {
            backend: std::env::var("REVGRAPH_BACKEND")
                .unwrap_or_else(|_| REPLAY_BACKEND.to_string()),
            replay_dir: std::env::var("REVGRAPH_REPLAY_DIR").ok().map(PathBuf::from),
        }
    }
}

/// Factory producing a boxed backend from the shared configuration.
pub type ProducerFactory =
    Box<dyn Fn(&AnalyzerConfig) -> Result<Box<dyn CallGraphProducer>, AnalysisError>>;

/// Name-keyed registry of analyzer backends.
pub struct ProducerRegistry {
    factories: BTreeMap<String, ProducerFactory>,
}

impl ProducerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ProducerRegistry {
            factories: BTreeMap::new(),
        }
    }

    /// Creates a registry with the built-in replay backend registered.
    pub fn with_builtin() -> Self {
        let mut registry = ProducerRegistry::new();
        registry.register(REPLAY_BACKEND, |config| {
            let dir = config
                .replay_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(Box::new(ReplayProducer::new(dir)))
        });
        registry
    }

    /// Registers a backend factory under a name, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&AnalyzerConfig) -> Result<Box<dyn CallGraphProducer>, AnalysisError> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Names of all registered backends, in lexical order.
    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiates the backend the configuration names.
    pub fn select(
        &self,
        config: &AnalyzerConfig,
    ) -> Result<Box<dyn CallGraphProducer>, AnalysisError> {
        let factory = self
            .factories
            .get(&config.backend)
            .ok_or_else(|| AnalysisError::UnknownBackend {
                name: config.backend.clone(),
            })?;
        tracing::debug!(backend = %config.backend, "selected analyzer backend");
        factory(config)
    }
}

impl Default for ProducerRegistry {
    fn default() -> Self {
        ProducerRegistry::with_builtin()
    }
}
