//! Producer contract for revision call graphs.
//!
//! The actual bytecode analysis lives in external engines; this crate defines
//! the boundary they plug into: artifact [`Coordinate`]s, the
//! [`CallGraphProducer`] trait, and a name-keyed [`ProducerRegistry`] so the
//! active backend is selected by configuration rather than by subclassing.
//! The built-in [`ReplayProducer`] re-reads previously encoded documents,
//! which is what tests and offline pipelines run against.

pub mod coordinate;
pub mod error;
pub mod producer;
pub mod registry;
pub mod replay;

// Re-export commonly used types
pub use coordinate::Coordinate;
pub use error::AnalysisError;
pub use producer::CallGraphProducer;
pub use registry::{AnalyzerConfig, ProducerRegistry};
pub use replay::ReplayProducer;
