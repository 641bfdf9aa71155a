//! Opaque global identifier for types and callables.
//!
//! The textual syntax of the identifier scheme belongs to a collaborator
//! format; this crate only relies on [`Uri`] values being globally unique,
//! string-representable, and totally ordered by string comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique, string-ordered identifier.
///
/// Stable across the local [`MethodId`](crate::id::MethodId) assignments of
/// individual revisions, which makes it the only way to address a call target
/// outside the analyzed artifact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    /// Wraps an identifier string. No syntax validation is performed.
    pub fn new(raw: impl Into<String>) -> Self {
        Uri(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(raw: &str) -> Self {
        Uri(raw.to_string())
    }
}

impl From<String> for Uri {
    fn from(raw: String) -> Self {
        Uri(raw)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
