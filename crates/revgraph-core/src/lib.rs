pub mod codec;
pub mod digraph;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod id;
pub mod revision;
pub mod uri;

// Re-export commonly used types
pub use digraph::{CallEdge, CallNode};
pub use error::{FormatError, InvariantError};
pub use graph::{CallGraph, CallSites, InternalCall};
pub use hierarchy::{ClassHierarchy, TypeInfo};
pub use id::MethodId;
pub use revision::{RevisionCallGraph, RevisionCallGraphBuilder};
pub use uri::Uri;
