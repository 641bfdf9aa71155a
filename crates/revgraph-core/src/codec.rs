//! JSON wire codec for [`RevisionCallGraph`].
//!
//! Encoding goes through `serde_json::Value`, whose default object
//! representation keeps keys sorted; together with the `BTreeMap`-backed
//! external edge set this makes the encoding deterministic, so independent
//! analyzer runs over identical input produce byte-comparable output (once
//! internal calls are canonicalized). Decoding is strict on every required
//! top-level key and lenient only on `timestamp`, whose absence means
//! "unknown" rather than an error.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::graph::{CallGraph, CallSites, InternalCall};
use crate::hierarchy::{ClassHierarchy, TypeInfo};
use crate::id::MethodId;
use crate::revision::RevisionCallGraph;
use crate::uri::Uri;

impl RevisionCallGraph {
    /// Produces the wire document for this aggregate.
    ///
    /// Always emits `generator`, `depset`, `cha`, and `graph`; emits
    /// `timestamp` only when known, so "unknown" and "time zero" stay
    /// distinguishable.
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("forge".into(), Value::String(self.forge().to_string()));
        doc.insert("product".into(), Value::String(self.product().to_string()));
        doc.insert("version".into(), Value::String(self.version().to_string()));
        doc.insert(
            "generator".into(),
            Value::String(self.generator().to_string()),
        );
        if let Some(timestamp) = self.timestamp() {
            doc.insert("timestamp".into(), Value::from(timestamp));
        }
        doc.insert("depset".into(), self.depset().clone());
        doc.insert("cha".into(), encode_hierarchy(self.hierarchy()));
        doc.insert("graph".into(), encode_graph(self.graph()));
        Value::Object(doc)
    }

    /// The compact textual form of [`to_json`](Self::to_json).
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Decodes an aggregate from its wire document.
    ///
    /// Fails on a missing or mistyped required field and on any structural
    /// invariant violation; a missing `timestamp` decodes to unknown.
    pub fn from_json(document: &Value) -> Result<Self, FormatError> {
        let doc = document.as_object().ok_or(FormatError::WrongType {
            field: "document",
            expected: "object",
        })?;

        let forge = require_str(doc, "forge")?.to_string();
        let product = require_str(doc, "product")?.to_string();
        let version = require_str(doc, "version")?.to_string();
        let generator = require_str(doc, "generator")?.to_string();

        let timestamp = match doc.get("timestamp") {
            None => None,
            Some(value) => Some(value.as_i64().ok_or(FormatError::WrongType {
                field: "timestamp",
                expected: "integer",
            })?),
        };

        let depset = require(doc, "depset")?;
        if !depset.is_array() {
            return Err(FormatError::WrongType {
                field: "depset",
                expected: "array",
            });
        }

        let cha = require(doc, "cha")?;
        if !cha.is_object() {
            return Err(FormatError::WrongType {
                field: "cha",
                expected: "object",
            });
        }
        let hierarchy: ClassHierarchy = serde_json::from_value(cha.clone())
            .map_err(|source| FormatError::MalformedHierarchy { source })?;

        let graph = decode_graph(require(doc, "graph")?)?;

        let aggregate = RevisionCallGraph::from_parts(
            forge,
            product,
            version,
            generator,
            timestamp,
            depset.clone(),
            hierarchy,
            graph,
        )?;
        Ok(aggregate)
    }

    /// Parses and decodes a wire document from its textual form.
    pub fn from_json_str(raw: &str) -> Result<Self, FormatError> {
        let document: Value = serde_json::from_str(raw)?;
        Self::from_json(&document)
    }
}

fn encode_hierarchy(hierarchy: &ClassHierarchy) -> Value {
    let mut cha = Map::new();
    for (uri, info) in hierarchy.iter() {
        cha.insert(uri.to_string(), encode_type(info));
    }
    Value::Object(cha)
}

fn encode_type(info: &TypeInfo) -> Value {
    let mut methods = Map::new();
    for (id, uri) in &info.methods {
        methods.insert(id.to_string(), Value::String(uri.to_string()));
    }

    let mut entry = Map::new();
    entry.insert("sourceFile".into(), Value::String(info.source_file.clone()));
    entry.insert("methods".into(), Value::Object(methods));
    entry.insert("superClasses".into(), encode_uris(&info.super_classes));
    entry.insert("superInterfaces".into(), encode_uris(&info.super_interfaces));
    Value::Object(entry)
}

fn encode_uris(uris: &[Uri]) -> Value {
    Value::Array(
        uris.iter()
            .map(|uri| Value::String(uri.to_string()))
            .collect(),
    )
}

fn encode_graph(graph: &CallGraph) -> Value {
    let internal: Vec<Value> = graph
        .internal_calls()
        .iter()
        .map(|call| {
            Value::Array(vec![
                Value::from(call.source().0),
                Value::from(call.target().0),
            ])
        })
        .collect();

    let mut external = Vec::with_capacity(graph.external_calls().len());
    for (key, sites) in graph.external_calls() {
        let (source, target) = (&key.0, &key.1);
        let mut meta = Map::new();
        for (tag, count) in sites {
            meta.insert(tag.clone(), Value::String(count.to_string()));
        }
        external.push(Value::Array(vec![
            Value::String(source.to_string()),
            Value::String(target.to_string()),
            Value::Object(meta),
        ]));
    }

    let mut obj = Map::new();
    obj.insert("internalCalls".into(), Value::Array(internal));
    obj.insert("externalCalls".into(), Value::Array(external));
    Value::Object(obj)
}

fn require<'a>(doc: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, FormatError> {
    doc.get(field).ok_or(FormatError::MissingField { field })
}

fn require_str<'a>(doc: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, FormatError> {
    require(doc, field)?.as_str().ok_or(FormatError::WrongType {
        field,
        expected: "string",
    })
}

fn decode_graph(value: &Value) -> Result<CallGraph, FormatError> {
    let obj = value.as_object().ok_or(FormatError::WrongType {
        field: "graph",
        expected: "object",
    })?;

    let internal_value = obj
        .get("internalCalls")
        .ok_or(FormatError::MissingField {
            field: "graph.internalCalls",
        })?
        .as_array()
        .ok_or(FormatError::WrongType {
            field: "graph.internalCalls",
            expected: "array",
        })?;

    let mut internal_calls = Vec::with_capacity(internal_value.len());
    for entry in internal_value {
        let pair = entry
            .as_array()
            .filter(|pair| pair.len() == 2)
            .ok_or(FormatError::WrongType {
                field: "graph.internalCalls",
                expected: "[sourceId, targetId] pair",
            })?;
        internal_calls.push(InternalCall(decode_id(&pair[0])?, decode_id(&pair[1])?));
    }

    let external_value = obj
        .get("externalCalls")
        .ok_or(FormatError::MissingField {
            field: "graph.externalCalls",
        })?
        .as_array()
        .ok_or(FormatError::WrongType {
            field: "graph.externalCalls",
            expected: "array",
        })?;

    let mut external_calls = BTreeMap::new();
    for entry in external_value {
        let triple = entry
            .as_array()
            .filter(|triple| triple.len() == 3)
            .ok_or(FormatError::WrongType {
                field: "graph.externalCalls",
                expected: "[sourceId, targetUri, callTypes] triple",
            })?;

        let source_raw = triple[0].as_str().ok_or(FormatError::WrongType {
            field: "graph.externalCalls",
            expected: "string source id",
        })?;
        let source = source_raw
            .parse::<u32>()
            .map(MethodId)
            .map_err(|_| FormatError::InvalidMethodId {
                value: source_raw.to_string(),
            })?;

        let target = Uri::new(triple[1].as_str().ok_or(FormatError::WrongType {
            field: "graph.externalCalls",
            expected: "string target identifier",
        })?);

        let meta = triple[2].as_object().ok_or(FormatError::WrongType {
            field: "graph.externalCalls",
            expected: "call-type object",
        })?;
        let mut sites = CallSites::new();
        for (tag, count_value) in meta {
            let raw = count_value
                .as_str()
                .ok_or_else(|| FormatError::InvalidCount {
                    tag: tag.clone(),
                    value: count_value.to_string(),
                })?;
            let count = raw.parse::<u64>().map_err(|_| FormatError::InvalidCount {
                tag: tag.clone(),
                value: raw.to_string(),
            })?;
            sites.insert(tag.clone(), count);
        }

        external_calls.insert((source, target), sites);
    }

    Ok(CallGraph::from_parts(internal_calls, external_calls))
}

fn decode_id(value: &Value) -> Result<MethodId, FormatError> {
    value
        .as_u64()
        .and_then(|raw| u32::try_from(raw).ok())
        .map(MethodId)
        .ok_or_else(|| FormatError::InvalidMethodId {
            value: value.to_string(),
        })
}
