//! This module defines the `Structure` and `StructureRegistry` types. A
//! `Structure` pairs a registered name and compact id with the resolved
//! [`ShapeDescriptor`] the footprint walk consumes; the registry stores all
//! loaded structure types indexed by both name and numeric id.
//!
//! Example:
//! ```rust
//! use multiblock::structure::registry::{Structure, StructureRegistry};
//! use multiblock::structure::shape::ShapeDef;
//!
//! let mut registry = StructureRegistry::default();
//! registry.register(Structure::from_def(&ShapeDef {
//!     name: "kiln".to_string(),
//!     id: 7,
//!     width: 2,
//!     height: 2,
//!     depth: 2,
//!     ..ShapeDef::default()
//! }));
//!
//! assert_eq!(registry.id_for_name("kiln"), Some(7));
//! assert_eq!(registry.get_by_id(7).unwrap().shape.max_cells, 8);
//! ```

use crate::structure::StructureId;
use crate::structure::shape::{ShapeDef, ShapeDescriptor};
use bevy::prelude::Resource;
use std::collections::HashMap;

/// A registered multi-block structure type.
#[derive(Debug, Clone)]
pub struct Structure {
    pub name: String,
    pub id: StructureId,
    pub shape: ShapeDescriptor,
}

impl Structure {
    /// Build a structure type from its RON-level definition, resolving the
    /// shape descriptor once.
    #[must_use]
    pub fn from_def(def: &ShapeDef) -> Self {
        Structure {
            name: def.name.clone(),
            id: def.id,
            shape: ShapeDescriptor::new(def),
        }
    }
}

/// All loaded structure types, indexed by name and by numeric id.
#[derive(Resource, Default, Clone)]
pub struct StructureRegistry {
    pub structures: HashMap<String, Structure>,
    pub names_by_id: HashMap<StructureId, String>,
}

impl StructureRegistry {
    /// Register a structure type, replacing any previous entry with the
    /// same name or id.
    pub fn register(&mut self, structure: Structure) {
        self.names_by_id
            .insert(structure.id, structure.name.clone());
        self.structures.insert(structure.name.clone(), structure);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Structure> {
        self.structures.get(name)
    }

    #[must_use]
    pub fn get_by_id(&self, id: StructureId) -> Option<&Structure> {
        self.names_by_id
            .get(&id)
            .and_then(|name| self.structures.get(name))
    }

    /// Lookup the numeric id for a structure `name`.
    #[must_use]
    pub fn id_for_name(&self, name: &str) -> Option<StructureId> {
        self.structures.get(name).map(|s| s.id)
    }

    /// Number of registered structure types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(name: &str, id: StructureId) -> Structure {
        Structure::from_def(&ShapeDef {
            name: name.to_string(),
            id,
            width: 2,
            height: 1,
            depth: 2,
            ..ShapeDef::default()
        })
    }

    #[test]
    fn register_and_lookup_both_ways() {
        let mut registry = StructureRegistry::default();
        registry.register(structure("altar", 3));
        assert_eq!(registry.id_for_name("altar"), Some(3));
        assert_eq!(registry.get_by_id(3).unwrap().name, "altar");
        assert_eq!(registry.get("altar").unwrap().shape.max_cells, 4);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_lookups_return_none() {
        let registry = StructureRegistry::default();
        assert!(registry.get("nothing").is_none());
        assert!(registry.get_by_id(99).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn reregistering_a_name_replaces_the_entry() {
        let mut registry = StructureRegistry::default();
        registry.register(structure("altar", 3));
        registry.register(structure("altar", 4));
        assert_eq!(registry.id_for_name("altar"), Some(4));
        assert_eq!(registry.get_by_id(4).unwrap().name, "altar");
    }
}
