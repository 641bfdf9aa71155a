//! Internal and external call edge sets of one revision.
//!
//! Internal calls stay within the analyzed artifact and are addressed by
//! per-revision [`MethodId`]s; they form a multiset, one entry per call site.
//! External calls cross into other artifacts and are keyed by the source id
//! plus the target's [`Uri`], with per-edge call-type counts collapsing the
//! (numerous) individual call sites into compact metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::MethodId;
use crate::uri::Uri;

/// One internal call site: `(source, target)` method ids.
///
/// Serializes as a two-element JSON array, matching the wire shape of an
/// `internalCalls` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalCall(pub MethodId, pub MethodId);

impl InternalCall {
    /// The calling method's id.
    pub fn source(&self) -> MethodId {
        self.0
    }

    /// The called method's id.
    pub fn target(&self) -> MethodId {
        self.1
    }
}

/// Per-edge metadata of an external call: call-type tag to occurrence count.
pub type CallSites = BTreeMap<String, u64>;

/// The edge sets of one revision's call graph.
///
/// Accumulates edges during analysis and exposes a caller-invoked
/// canonical ordering for byte-comparable output across independent runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallGraph {
    /// Internal call sites in discovery order. Duplicates allowed.
    internal_calls: Vec<InternalCall>,
    /// External edges keyed by `(source id, target identifier)`. Storage is
    /// bounded by distinct source/target pairs, not call sites.
    external_calls: BTreeMap<(MethodId, Uri), CallSites>,
}

impl CallGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        CallGraph::default()
    }

    /// Reassembles a graph from decoded edge sets.
    pub fn from_parts(
        internal_calls: Vec<InternalCall>,
        external_calls: BTreeMap<(MethodId, Uri), CallSites>,
    ) -> Self {
        CallGraph {
            internal_calls,
            external_calls,
        }
    }

    /// Appends an internal call site. Never deduplicates: each call site is
    /// preserved as its own entry.
    pub fn add_internal(&mut self, source: MethodId, target: MethodId) {
        self.internal_calls.push(InternalCall(source, target));
    }

    /// Records one external call site.
    ///
    /// If the `(source, target)` key already exists, the count for
    /// `call_type` is incremented (or the tag inserted at 1); otherwise a
    /// new edge entry is created with count 1.
    pub fn add_external(&mut self, source: MethodId, target: Uri, call_type: &str) {
        let sites = self.external_calls.entry((source, target)).or_default();
        *sites.entry(call_type.to_string()).or_insert(0) += 1;
    }

    /// Internal call sites in their current order.
    pub fn internal_calls(&self) -> &[InternalCall] {
        &self.internal_calls
    }

    /// External edges and their call-site metadata.
    pub fn external_calls(&self) -> &BTreeMap<(MethodId, Uri), CallSites> {
        &self.external_calls
    }

    /// Reorders the internal calls into the canonical order.
    ///
    /// The sort key is the fully resolved `(source identifier, target
    /// identifier)` pair, tie-broken by the raw `(source id, target id)`
    /// pair, which gives a total, collision-free order for ids of any digit
    /// length. Mutates order only, never ids; idempotent.
    pub fn sort_internal_calls(&mut self, methods: &BTreeMap<MethodId, &Uri>) {
        self.internal_calls.sort_by(|a, b| {
            let key_a = (methods.get(&a.0), methods.get(&a.1), a.0, a.1);
            let key_b = (methods.get(&b.0), methods.get(&b.1), b.0, b.1);
            key_a.cmp(&key_b)
        });
    }

    /// Returns `true` iff both edge collections are empty.
    pub fn is_empty(&self) -> bool {
        self.internal_calls.is_empty() && self.external_calls.is_empty()
    }

    /// Internal call-site count (including duplicates) plus distinct
    /// external edge count.
    pub fn len(&self) -> usize {
        self.internal_calls.len() + self.external_calls.len()
    }
}
