//! The revision call graph aggregate.
//!
//! [`RevisionCallGraph`] ties together the revision metadata, its class
//! hierarchy, and its call graph. It is produced once per analysis run,
//! either through [`RevisionCallGraph::builder`] or by decoding the wire
//! document, and is immutable afterwards except for the explicit
//! [`sort_internal_calls`](RevisionCallGraph::sort_internal_calls)
//! canonicalization.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::InvariantError;
use crate::graph::CallGraph;
use crate::hierarchy::ClassHierarchy;
use crate::id::MethodId;
use crate::uri::Uri;

/// One revision's complete analysis result.
///
/// Structural invariants (every edge id resolves to a hierarchy entry,
/// method ids unique across the revision) are validated eagerly by every
/// construction path, so lookups through [`all_methods`](Self::all_methods)
/// are total.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionCallGraph {
    forge: String,
    product: String,
    version: String,
    /// Name of the call graph generator that produced this revision.
    generator: String,
    /// Analysis timestamp in seconds since the UNIX epoch. `None` means
    /// unknown, which the wire format expresses by omitting the key.
    timestamp: Option<i64>,
    /// Dependency set. Opaque to this core: round-tripped, never interpreted.
    depset: Value,
    hierarchy: ClassHierarchy,
    graph: CallGraph,
}

impl RevisionCallGraph {
    /// Creates a builder for assembling an aggregate field by field.
    pub fn builder() -> RevisionCallGraphBuilder {
        RevisionCallGraphBuilder::default()
    }

    /// Assembles an aggregate from already-decoded parts, validating the
    /// structural invariants before returning.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        forge: String,
        product: String,
        version: String,
        generator: String,
        timestamp: Option<i64>,
        depset: Value,
        hierarchy: ClassHierarchy,
        graph: CallGraph,
    ) -> Result<Self, InvariantError> {
        validate(&hierarchy, &graph)?;
        Ok(RevisionCallGraph {
            forge,
            product,
            version,
            generator,
            timestamp,
            depset,
            hierarchy,
            graph,
        })
    }

    /// The source ecosystem this revision comes from.
    pub fn forge(&self) -> &str {
        &self.forge
    }

    /// The product name.
    pub fn product(&self) -> &str {
        &self.product
    }

    /// The product version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Name of the producing analyzer.
    pub fn generator(&self) -> &str {
        &self.generator
    }

    /// Analysis timestamp in UNIX seconds, if known.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// The opaque dependency set.
    pub fn depset(&self) -> &Value {
        &self.depset
    }

    /// The class hierarchy covering every type this revision defines.
    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    /// The revision's call graph.
    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// The key this revision publishes under: `forge!product$version`.
    pub fn revision_id(&self) -> String {
        format!("{}!{}${}", self.forge, self.product, self.version)
    }

    /// Flattens the hierarchy into one id-to-identifier map spanning all
    /// types.
    pub fn all_methods(&self) -> BTreeMap<MethodId, &Uri> {
        self.hierarchy.all_methods()
    }

    /// Reorders the internal calls into the canonical order, resolving ids
    /// through the hierarchy. The one permitted post-construction mutation;
    /// idempotent, and required for byte-identical output across runs.
    pub fn sort_internal_calls(&mut self) {
        let methods = self.hierarchy.all_methods();
        self.graph.sort_internal_calls(&methods);
    }

    /// Returns `true` iff the graph holds no edges at all.
    ///
    /// A valid outcome for trivial artifacts; the producing pipeline treats
    /// it as a signal to skip publication, never as an error.
    pub fn is_call_graph_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Checks the structural invariants tying the graph to the hierarchy.
fn validate(hierarchy: &ClassHierarchy, graph: &CallGraph) -> Result<(), InvariantError> {
    let mut seen = BTreeMap::new();
    for (_, info) in hierarchy.iter() {
        for &id in info.methods.keys() {
            if seen.insert(id, ()).is_some() {
                return Err(InvariantError::DuplicateMethodId { id });
            }
        }
    }

    for call in graph.internal_calls() {
        for id in [call.source(), call.target()] {
            if !seen.contains_key(&id) {
                return Err(InvariantError::DanglingMethodId { id });
            }
        }
    }
    for (source, _) in graph.external_calls().keys() {
        if !seen.contains_key(source) {
            return Err(InvariantError::DanglingMethodId { id: *source });
        }
    }
    Ok(())
}

/// Builder for [`RevisionCallGraph`].
#[derive(Debug, Default)]
pub struct RevisionCallGraphBuilder {
    forge: String,
    product: String,
    version: String,
    generator: String,
    timestamp: Option<i64>,
    depset: Option<Value>,
    hierarchy: ClassHierarchy,
    graph: CallGraph,
}

impl RevisionCallGraphBuilder {
    pub fn forge(mut self, forge: impl Into<String>) -> Self {
        self.forge = forge.into();
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn depset(mut self, depset: Value) -> Self {
        self.depset = Some(depset);
        self
    }

    pub fn hierarchy(mut self, hierarchy: ClassHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn graph(mut self, graph: CallGraph) -> Self {
        self.graph = graph;
        self
    }

    /// Validates the assembled aggregate and returns it.
    ///
    /// An omitted depset defaults to an empty list; an omitted timestamp
    /// stays unknown.
    pub fn build(self) -> Result<RevisionCallGraph, InvariantError> {
        RevisionCallGraph::from_parts(
            self.forge,
            self.product,
            self.version,
            self.generator,
            self.timestamp,
            self.depset.unwrap_or_else(|| Value::Array(Vec::new())),
            self.hierarchy,
            self.graph,
        )
    }
}
