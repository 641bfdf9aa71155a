//! Directed-graph projection of an aggregate for downstream traversal.
//!
//! Graph-stitching consumers resolve external edges against other revisions'
//! hierarchies by identifier lookup; this projection gives them a
//! `petgraph::DiGraph` view of one revision with internal methods and
//! external targets as nodes. It is read-only: building it never mutates the
//! aggregate.

use std::collections::BTreeMap;

use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

use crate::id::MethodId;
use crate::revision::RevisionCallGraph;
use crate::uri::Uri;

/// A node in the projected call graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallNode {
    /// A method this revision defines, carrying its local id.
    Internal { id: MethodId, uri: Uri },
    /// A call target outside the revision, addressable only by identifier.
    External { uri: Uri },
}

impl CallNode {
    /// The node's globally unique identifier.
    pub fn uri(&self) -> &Uri {
        match self {
            CallNode::Internal { uri, .. } => uri,
            CallNode::External { uri } => uri,
        }
    }
}

/// An edge in the projected call graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallEdge {
    /// One internal call site. Repeated call sites become parallel edges.
    Internal,
    /// A collapsed external edge with its total call-site count across tags.
    External { sites: u64 },
}

impl RevisionCallGraph {
    /// Projects the aggregate onto a `DiGraph`.
    ///
    /// Every method in the hierarchy becomes an internal node (in id order),
    /// every distinct external target a single external node. Internal call
    /// sites map to parallel edges; external edges are collapsed with their
    /// summed call-site counts.
    pub fn to_digraph(&self) -> DiGraph<CallNode, CallEdge> {
        let mut graph = DiGraph::new();

        let mut internal_nodes = BTreeMap::new();
        for (id, uri) in self.all_methods() {
            let index = graph.add_node(CallNode::Internal {
                id,
                uri: uri.clone(),
            });
            internal_nodes.insert(id, index);
        }

        let mut external_nodes = BTreeMap::new();
        for (_, target) in self.graph().external_calls().keys() {
            external_nodes.entry(target.clone()).or_insert_with(|| {
                graph.add_node(CallNode::External {
                    uri: target.clone(),
                })
            });
        }

        for call in self.graph().internal_calls() {
            if let (Some(&source), Some(&target)) = (
                internal_nodes.get(&call.source()),
                internal_nodes.get(&call.target()),
            ) {
                graph.add_edge(source, target, CallEdge::Internal);
            }
        }

        for (key, sites) in self.graph().external_calls() {
            let (source, target) = (&key.0, &key.1);
            if let (Some(&from), Some(&to)) =
                (internal_nodes.get(source), external_nodes.get(target))
            {
                let total: u64 = sites.values().sum();
                graph.add_edge(from, to, CallEdge::External { sites: total });
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CallGraph;
    use crate::hierarchy::{ClassHierarchy, TypeInfo};

    fn aggregate() -> RevisionCallGraph {
        let mut info = TypeInfo::new("A.java");
        info.add_method(MethodId(1), Uri::new("id:A#foo"));
        info.add_method(MethodId(2), Uri::new("id:A#bar"));
        let mut cha = ClassHierarchy::new();
        cha.insert(Uri::new("id:A"), info);

        let mut graph = CallGraph::new();
        graph.add_internal(MethodId(1), MethodId(1));
        graph.add_internal(MethodId(1), MethodId(2));
        graph.add_internal(MethodId(1), MethodId(2));
        graph.add_external(MethodId(2), Uri::new("id:ext#m"), "invokevirtual");
        graph.add_external(MethodId(2), Uri::new("id:ext#m"), "invokestatic");

        RevisionCallGraph::builder()
            .forge("mvn")
            .product("demo")
            .version("1.0.0")
            .generator("test-gen")
            .hierarchy(cha)
            .graph(graph)
            .build()
            .unwrap()
    }

    #[test]
    fn projection_counts_nodes_and_edges() {
        let digraph = aggregate().to_digraph();
        // 2 internal methods + 1 external target.
        assert_eq!(digraph.node_count(), 3);
        // 3 internal call sites (one duplicated) + 1 collapsed external edge.
        assert_eq!(digraph.edge_count(), 4);
    }

    #[test]
    fn external_edge_sums_call_sites_across_tags() {
        let digraph = aggregate().to_digraph();
        let external_total: Vec<u64> = digraph
            .edge_weights()
            .filter_map(|edge| match edge {
                CallEdge::External { sites } => Some(*sites),
                CallEdge::Internal => None,
            })
            .collect();
        assert_eq!(external_total, vec![2]);
    }

    #[test]
    fn internal_self_call_is_a_self_loop() {
        let digraph = aggregate().to_digraph();
        let loops = digraph
            .edge_indices()
            .filter(|&edge| {
                let (a, b) = digraph.edge_endpoints(edge).unwrap();
                a == b
            })
            .count();
        assert_eq!(loops, 1);
    }

    #[test]
    fn empty_aggregate_projects_methods_only() {
        let mut info = TypeInfo::new("A.java");
        info.add_method(MethodId(1), Uri::new("id:A#foo"));
        let mut cha = ClassHierarchy::new();
        cha.insert(Uri::new("id:A"), info);

        let cg = RevisionCallGraph::builder()
            .forge("mvn")
            .product("demo")
            .version("1.0.0")
            .generator("test-gen")
            .hierarchy(cha)
            .build()
            .unwrap();

        let digraph = cg.to_digraph();
        assert_eq!(digraph.node_count(), 1);
        assert_eq!(digraph.edge_count(), 0);
    }
}
