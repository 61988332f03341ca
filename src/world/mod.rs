//! World cell storage and the host-engine access interface.
//!
//! The footprint walk never talks to a concrete world type. It goes through
//! the [`CellGrid`] trait, which a host engine implements over its own block
//! storage: occupancy queries, per-cell structure state, and the associative
//! back-reference from every non-main cell to its instance's main cell.
//!
//! [`GridWorld`] is the built-in `HashMap`-backed implementation. It is used
//! by the unit tests and benches, and works as-is for hosts that do not keep
//! their own per-cell metadata store.
//!
//! # Example:
//!
//! ```
//! use bevy::math::IVec3;
//! use multiblock::world::{CellGrid, GridWorld, Occupancy};
//!
//! let mut world = GridWorld::new();
//! assert_eq!(world.occupancy(IVec3::new(0, 5, 0)), Occupancy::Free);
//! world.block(IVec3::new(0, 5, 0));
//! assert_eq!(world.occupancy(IVec3::new(0, 5, 0)), Occupancy::Blocked);
//! ```

use crate::structure::StructureId;
use crate::structure::footprint::Facing;
use bevy::math::IVec3;
use bevy::prelude::Resource;
use std::collections::{HashMap, HashSet};

/// Default world vertical bounds, matching a typical 256-cell build height.
pub const DEFAULT_MIN_Y: i32 = 0;
pub const DEFAULT_MAX_Y: i32 = 256;

/// What currently occupies a world cell, from the placement walk's point of
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Nothing here (or a replaceable filler block); a structure cell may be
    /// written.
    Free,
    /// Terrain or an unrelated block; placement over it must fail.
    Blocked,
    /// Part of a placed structure instance. The payload is the position of
    /// that instance's main cell.
    Instance(IVec3),
}

/// Structure metadata stored on a single world cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellState {
    pub structure: StructureId, // Which structure type this cell belongs to.
    pub facing: Facing,         // Facing the instance was placed with.
    pub is_main: bool,          // The single authoritative cell of the instance.
    pub is_model: bool,         // The cell that renders the structure's model.
}

/// Host-engine access interface for the footprint walk.
///
/// The core never caches cell state: every read re-queries the host through
/// this trait, so implementations do not need any invalidation discipline.
/// All methods are expected to be cheap position-keyed lookups.
pub trait CellGrid {
    /// Classify what occupies `pos`. Cells outside the vertical bounds are
    /// reported as [`Occupancy::Blocked`].
    fn occupancy(&self, pos: IVec3) -> Occupancy;

    /// Structure metadata at `pos`, or `None` for cells that carry none
    /// (foreign cells).
    fn cell(&self, pos: IVec3) -> Option<CellState>;

    /// Write structure metadata for `pos`, replacing whatever was there.
    fn set_cell(&mut self, pos: IVec3, state: CellState);

    /// Remove the cell at `pos` entirely, metadata and back-reference
    /// included.
    fn remove_cell(&mut self, pos: IVec3);

    /// The stored back-reference from `pos` to its instance's main cell.
    /// Main cells themselves carry no back-reference.
    fn main_ref(&self, pos: IVec3) -> Option<IVec3>;

    /// Store the back-reference from `pos` to `main`.
    fn set_main_ref(&mut self, pos: IVec3, main: IVec3);

    /// World vertical limits as `(min_y, max_y)`, `max_y` exclusive.
    fn vertical_bounds(&self) -> (i32, i32);
}

/// A single stored cell: structure state plus the optional back-reference.
#[derive(Debug, Clone, Copy)]
struct GridCell {
    state: CellState,
    main_ref: Option<IVec3>,
}

/// In-memory cell store keyed by world position.
///
/// Structure cells live in `cells`; plain unreplaceable terrain is tracked as
/// a position set so tests and demo hosts can stake out obstacles without
/// modelling real blocks.
#[derive(Resource, Default, Clone)]
pub struct GridWorld {
    cells: HashMap<IVec3, GridCell>,
    blocked: HashSet<IVec3>,
    bounds: Option<(i32, i32)>,
}

impl GridWorld {
    /// Create an empty world with the default vertical bounds.
    #[must_use]
    pub fn new() -> Self {
        GridWorld::default()
    }

    /// Create an empty world with explicit vertical bounds.
    ///
    /// # Arguments
    /// * `min_y`, `max_y` - vertical limits, `max_y` exclusive.
    #[must_use]
    pub fn with_bounds(min_y: i32, max_y: i32) -> Self {
        GridWorld {
            bounds: Some((min_y, max_y)),
            ..GridWorld::default()
        }
    }

    /// Mark `pos` as unreplaceable terrain.
    pub fn block(&mut self, pos: IVec3) {
        self.blocked.insert(pos);
    }

    /// Clear terrain at `pos` marked with [`GridWorld::block`].
    pub fn clear(&mut self, pos: IVec3) {
        self.blocked.remove(&pos);
    }

    /// Number of structure cells currently stored.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over the positions of all stored structure cells.
    pub fn positions(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.cells.keys().copied()
    }
}

impl CellGrid for GridWorld {
    fn occupancy(&self, pos: IVec3) -> Occupancy {
        let (min_y, max_y) = self.vertical_bounds();
        if pos.y < min_y || pos.y >= max_y {
            return Occupancy::Blocked;
        }
        if let Some(cell) = self.cells.get(&pos) {
            return match (cell.main_ref, cell.state.is_main) {
                (Some(main), _) => Occupancy::Instance(main),
                (None, true) => Occupancy::Instance(pos),
                // Metadata lost: nothing can claim this cell, treat as foreign
                (None, false) => Occupancy::Blocked,
            };
        }
        if self.blocked.contains(&pos) {
            Occupancy::Blocked
        } else {
            Occupancy::Free
        }
    }

    fn cell(&self, pos: IVec3) -> Option<CellState> {
        self.cells.get(&pos).map(|c| c.state)
    }

    fn set_cell(&mut self, pos: IVec3, state: CellState) {
        // Keep an existing back-reference when restating a cell in place
        let main_ref = self.cells.get(&pos).and_then(|c| c.main_ref);
        self.cells.insert(pos, GridCell { state, main_ref });
    }

    fn remove_cell(&mut self, pos: IVec3) {
        self.cells.remove(&pos);
    }

    fn main_ref(&self, pos: IVec3) -> Option<IVec3> {
        self.cells.get(&pos).and_then(|c| c.main_ref)
    }

    fn set_main_ref(&mut self, pos: IVec3, main: IVec3) {
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.main_ref = Some(main);
        }
    }

    fn vertical_bounds(&self) -> (i32, i32) {
        self.bounds.unwrap_or((DEFAULT_MIN_Y, DEFAULT_MAX_Y))
    }
}
