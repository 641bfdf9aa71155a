//! Consumer-side glue around the producer contract.
//!
//! One inbound coordinate message becomes at most one published call graph
//! document: the [`Harvester`](harvest::Harvester) parses the message, runs
//! the configured producer, canonicalizes and encodes the aggregate, and
//! hands it to an explicit [`Publisher`](publish::Publisher) handle created
//! at process start. Delivery is at-most-once; failures are recorded into
//! per-record state, never retried.

pub mod error;
pub mod harvest;
pub mod publish;

// Re-export commonly used types
pub use error::{PipelineError, PublishError};
pub use harvest::Harvester;
pub use publish::{ChannelPublisher, OutboundRecord, Publisher};
