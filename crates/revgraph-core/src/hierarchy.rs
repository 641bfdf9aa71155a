//! Per-type method tables and the revision-wide class hierarchy.
//!
//! [`TypeInfo`] is a pure data holder for one class or interface: its source
//! file, its methods with their per-revision ids, and its inheritance
//! relationships. [`ClassHierarchy`] maps every type the revision defines,
//! keyed by the type's [`Uri`]. Cross-type consistency (id uniqueness,
//! dangling edge ids) is checked by the aggregate, not here.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::MethodId;
use crate::uri::Uri;

/// One class or interface of the revision.
///
/// Field renames match the wire document keys, so the struct deserializes
/// directly from a `cha` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Name of the source file this type was compiled from.
    #[serde(rename = "sourceFile")]
    pub source_file: String,

    /// Methods of this type, keyed by their per-revision id.
    pub methods: IndexMap<MethodId, Uri>,

    /// Classes this type inherits from, in instantiation (linearization)
    /// order: the first entry is the nearest ancestor. The order is
    /// semantically meaningful and must survive encode/decode unchanged.
    #[serde(rename = "superClasses")]
    pub super_classes: SmallVec<[Uri; 4]>,

    /// Interfaces this type or its super classes implement.
    #[serde(rename = "superInterfaces")]
    pub super_interfaces: SmallVec<[Uri; 4]>,
}

impl TypeInfo {
    /// Creates a type with no methods and no inheritance entries.
    pub fn new(source_file: impl Into<String>) -> Self {
        TypeInfo {
            source_file: source_file.into(),
            methods: IndexMap::new(),
            super_classes: SmallVec::new(),
            super_interfaces: SmallVec::new(),
        }
    }

    /// Records a method with its per-revision id.
    pub fn add_method(&mut self, id: MethodId, uri: Uri) {
        self.methods.insert(id, uri);
    }
}

/// Mapping from every type the revision defines to its [`TypeInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassHierarchy {
    types: IndexMap<Uri, TypeInfo>,
}

impl ClassHierarchy {
    /// Creates an empty hierarchy.
    pub fn new() -> Self {
        ClassHierarchy::default()
    }

    /// Inserts a type, replacing any previous entry under the same key.
    pub fn insert(&mut self, uri: Uri, info: TypeInfo) {
        self.types.insert(uri, info);
    }

    /// Looks up a type by its identifier.
    pub fn get(&self, uri: &Uri) -> Option<&TypeInfo> {
        self.types.get(uri)
    }

    /// Iterates over all types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Uri, &TypeInfo)> {
        self.types.iter()
    }

    /// Number of types in the hierarchy.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the hierarchy defines no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Flattens every type's method table into one id-to-identifier map.
    ///
    /// Callers rely on ids being unique within the revision; uniqueness is
    /// validated by the aggregate at construction time, not re-checked here.
    pub fn all_methods(&self) -> BTreeMap<MethodId, &Uri> {
        let mut result = BTreeMap::new();
        for info in self.types.values() {
            for (&id, uri) in &info.methods {
                result.insert(id, uri);
            }
        }
        result
    }
}
