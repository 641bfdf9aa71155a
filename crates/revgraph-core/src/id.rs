//! Dense method identifier assigned per revision.
//!
//! A [`MethodId`] is only meaningful inside the class hierarchy of the
//! revision that assigned it. Methods in other revisions are addressed by
//! their globally unique [`Uri`](crate::uri::Uri) instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-revision method identifier.
///
/// Ids are dense non-negative integers, unique within one revision's class
/// hierarchy and never stable across revisions. The wire format writes them
/// both as JSON integers (internal call pairs) and as decimal string keys
/// (method tables), which `serde_json` handles through the transparent `u32`
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(pub u32);

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MethodId {
    fn from(raw: u32) -> Self {
        MethodId(raw)
    }
}
