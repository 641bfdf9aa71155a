//! Resolved artifact coordinates handed to a producer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One revision of one product from one forge.
///
/// Deserializes directly from the inbound coordinate message shape
/// (`{"forge", "product", "version"}`); the optional analysis date travels
/// next to it in the message, not inside the coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub forge: String,
    pub product: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(
        forge: impl Into<String>,
        product: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Coordinate {
            forge: forge.into(),
            product: product.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}${}", self.forge, self.product, self.version)
    }
}
