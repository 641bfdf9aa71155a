//! Core error types for revgraph-core.
//!
//! Two failure kinds originate here: [`FormatError`] for malformed or
//! incomplete wire documents, and [`InvariantError`] for aggregates whose
//! edges reference method ids the class hierarchy does not define. Both use
//! `thiserror` for structured, matchable variants.

use thiserror::Error;

use crate::id::MethodId;

/// Malformed or incomplete wire input.
///
/// Always surfaced to the caller, with the single documented exception of a
/// missing `timestamp` key, which decodes to "unknown" instead of failing.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A required top-level key is absent.
    #[error("missing required field: '{field}'")]
    MissingField { field: &'static str },

    /// A key is present but holds a value of the wrong JSON type.
    #[error("field '{field}' has the wrong type: expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A method id string could not be parsed as a non-negative integer.
    #[error("unparsable method id: '{value}'")]
    InvalidMethodId { value: String },

    /// A call-site count string could not be parsed as a decimal integer.
    #[error("unparsable call count for tag '{tag}': '{value}'")]
    InvalidCount { tag: String, value: String },

    /// A `cha` entry does not match the type shape of the wire format.
    #[error("malformed class hierarchy: {source}")]
    MalformedHierarchy {
        #[source]
        source: serde_json::Error,
    },

    /// The document is not valid JSON at all.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded document violates a structural invariant.
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

/// A structural invariant of the aggregate does not hold.
///
/// Checked eagerly at construction and decode time rather than deferred to
/// lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A call edge references a method id with no entry in any type's
    /// method table.
    #[error("call edge references method id {id} absent from the class hierarchy")]
    DanglingMethodId { id: MethodId },

    /// The same method id appears in more than one type's method table.
    #[error("method id {id} appears in more than one type")]
    DuplicateMethodId { id: MethodId },
}
