//! Multi-block structure types and helpers.
//!
//! This module exposes structure shape definitions ([`shape`]), the
//! [`StructureRegistry`] which stores all loaded structure types, the
//! footprint walk and placement operations ([`footprint`]), and the runtime
//! loader/watcher used for hot-reloading structure definitions from RON
//! files.
//!
//! Example:
//!
//! ```rust
//! use bevy::math::IVec3;
//! use multiblock::structure::footprint::Facing;
//! use multiblock::structure::loader as structure_loader;
//! use multiblock::world::GridWorld;
//!
//! // Load structure definitions and place one if the footprint is free
//! let registry = structure_loader::load_structures_from_dir("data/structures");
//! let mut world = GridWorld::new();
//! if let Some(structure) = registry.get("arcane_table") {
//!     let anchor = IVec3::new(0, 10, 0);
//!     if structure.can_place(&mut world, anchor, Facing::North) {
//!         structure.place(&mut world, anchor, Facing::North);
//!     }
//! }
//! ```

pub mod footprint;
pub use footprint::Facing;

/// Compact numeric identifier for a registered structure type.
///
/// Stored in per-cell state, so it is intentionally a small integer rather
/// than a name.
pub type StructureId = u16;

/// Loader/watcher for structure RON files.
pub mod loader;

/// Structure registry and related data structures.
pub mod registry;

/// Shape definitions and resolved descriptors.
pub mod shape;

pub use registry::{Structure, StructureRegistry};
pub use shape::{OffsetConfig, ShapeDef, ShapeDescriptor};
