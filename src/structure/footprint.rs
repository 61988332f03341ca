//! Footprint enumeration and the placement/teardown walk.
//!
//! Everything a structure instance does in the world goes through one
//! rotation-aware traversal, [`Structure::for_each_cell`]: validation runs
//! it with a read-only occupancy check, placement runs it writing cell
//! state, and teardown runs it removing cells. The traversal maps every
//! local coordinate of the shape's bounding box to a world cell according
//! to the placement facing, consults the shape's occupancy rule (full
//! cuboid, hollow shell, or explicit point set) and fires the caller's
//! action on each in-structure cell. The walk result is whether the action
//! counted exactly the shape's required cell total.
//!
//! Local coordinates are always interpreted in the shape's un-rotated
//! frame; only the world-space stepping directions rotate with the facing.
//!
//! # Example:
//!
//! ```
//! use bevy::math::IVec3;
//! use multiblock::structure::footprint::Facing;
//! use multiblock::structure::registry::Structure;
//! use multiblock::structure::shape::ShapeDef;
//! use multiblock::world::GridWorld;
//!
//! let table = Structure::from_def(&ShapeDef {
//!     name: "table".to_string(),
//!     id: 1,
//!     width: 2,
//!     height: 1,
//!     depth: 2,
//!     ..ShapeDef::default()
//! });
//!
//! let mut world = GridWorld::new();
//! let anchor = IVec3::new(0, 4, 0);
//! assert!(table.can_place(&mut world, anchor, Facing::North));
//! assert!(table.place(&mut world, anchor, Facing::North));
//! assert!(table.destroy(&mut world, anchor));
//! ```

use crate::structure::registry::Structure;
use crate::world::{CellGrid, CellState, Occupancy};
use bevy::math::IVec3;

/// One of the four horizontal placement directions.
///
/// World mapping follows the usual voxel convention: north is `-Z`, east is
/// `+X`, south is `+Z`, west is `-X`, up is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// All four facings, in clockwise order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// The facing rotated a quarter turn clockwise (viewed from above).
    #[must_use]
    pub fn clockwise(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// The opposite facing.
    #[must_use]
    pub fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::East => Facing::West,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
        }
    }

    /// Unit step vector for this facing.
    #[must_use]
    pub fn vec(self) -> IVec3 {
        match self {
            Facing::North => IVec3::NEG_Z,
            Facing::East => IVec3::X,
            Facing::South => IVec3::Z,
            Facing::West => IVec3::NEG_X,
        }
    }
}

impl Structure {
    /// Walk every cell of this structure's footprint at `anchor` with the
    /// given `facing`, firing `action` on each in-structure cell.
    ///
    /// The walk starts `block_offset.z` cells opposite the facing and
    /// `block_offset.x` cells along its clockwise direction from `anchor`,
    /// then iterates height (world up), width (counter-clockwise) and depth
    /// (along the facing, stepping before each visit). A candidate cell is
    /// considered at all only when it is free, or already claimed by the
    /// instance anchored at `anchor`.
    ///
    /// Per cell the shape's occupancy rule decides whether `action` fires:
    /// shaped structures fire once per local coordinate listed in their
    /// point set (or when the cell is already an existing main cell of this
    /// structure type), hollow boxes skip interior cells, full cuboids
    /// always fire. A `true` return from `action` counts the cell.
    ///
    /// # Arguments
    /// * `world` - host cell store the walk reads through (and `action` may
    ///   mutate).
    /// * `anchor` - world position the shape's block offset aligns with.
    /// * `facing` - horizontal placement direction.
    /// * `action` - called with `(world, world_cell, local_coordinate)`.
    ///
    /// # Return
    /// `true` iff the number of counted cells equals the shape's
    /// `max_cells` total.
    pub fn for_each_cell<W, F>(
        &self,
        world: &mut W,
        anchor: IVec3,
        facing: Facing,
        mut action: F,
    ) -> bool
    where
        W: CellGrid,
        F: FnMut(&mut W, IVec3, IVec3) -> bool,
    {
        let shape = &self.shape;
        let clockwise = facing.clockwise();
        let start = anchor
            + facing.opposite().vec() * shape.block_offset.z
            + clockwise.vec() * shape.block_offset.x;

        let mut counted = 0usize;
        for h in 0..shape.height {
            let level = start + IVec3::Y * (h + shape.block_offset.y);
            let mut row = level;
            for w in 0..shape.width {
                let mut cell = row;
                row += clockwise.opposite().vec();
                for d in 0..shape.depth {
                    cell += facing.vec();

                    let occupancy = world.occupancy(cell);
                    let ours = occupancy == Occupancy::Instance(anchor);
                    if !ours && occupancy != Occupancy::Free {
                        continue;
                    }

                    let local = IVec3::new(w, h, d);
                    if shape.shaped {
                        // An existing main cell of this structure type
                        // re-validates even when its local coordinate is
                        // not listed in the point set. Such a cell is acted
                        // on but not counted, so the tally stays an exact
                        // match against the listed points.
                        let existing_main = world
                            .cell(cell)
                            .is_some_and(|c| c.structure == self.id && c.is_main);
                        let listed = shape.points.contains(&local);
                        if listed || (existing_main && !shape.points.is_empty()) {
                            if action(world, cell, local) && listed {
                                counted += 1;
                            }
                        }
                    } else {
                        if shape.hollow && shape.is_interior(w, d) {
                            continue;
                        }
                        if action(world, cell, local) {
                            counted += 1;
                        }
                    }
                }
            }
        }
        counted == shape.max_cells
    }

    /// Check whether this structure can be placed at `anchor` with `facing`.
    ///
    /// Runs the footprint walk with a read-only occupancy check; no world
    /// mutation occurs. Also requires the anchor to sit below the world
    /// ceiling with at least one cell of headroom, and the anchor cell
    /// itself to be free: the anchor's local coordinate can fall outside
    /// the shape's occupancy rule (a hollow interior, a shaped point set
    /// that omits it), in which case the walk never evaluates it even
    /// though [`Structure::place`] will write the main cell there.
    ///
    /// # Return
    /// `true` iff the anchor cell and every in-structure cell are free (or
    /// already belong to the instance anchored at `anchor`).
    pub fn can_place<W: CellGrid>(&self, world: &mut W, anchor: IVec3, facing: Facing) -> bool {
        let (_, max_y) = world.vertical_bounds();
        if anchor.y >= max_y - 1 {
            return false;
        }
        let anchor_occupancy = world.occupancy(anchor);
        if anchor_occupancy != Occupancy::Free
            && anchor_occupancy != Occupancy::Instance(anchor)
        {
            return false;
        }
        self.for_each_cell(world, anchor, facing, |world, cell, _| {
            let occupancy = world.occupancy(cell);
            occupancy == Occupancy::Free || occupancy == Occupancy::Instance(anchor)
        })
    }

    /// Commit this structure into the world at `anchor` with `facing`.
    ///
    /// Writes per-cell state (facing, main flag, model flag) for every
    /// in-structure cell and stores the back-reference to `anchor` on each
    /// non-main cell. The anchor cell is written first, mirroring the host
    /// engine having placed the targeted block before the commit hook runs;
    /// the walk then restates it with its final flags.
    ///
    /// Callers must only invoke this after [`Structure::can_place`]
    /// succeeded on the same mutation thread; the pair is check-then-act,
    /// not a single atomic step.
    ///
    /// # Return
    /// `true` iff the walk touched the shape's full required cell count.
    pub fn place<W: CellGrid>(&self, world: &mut W, anchor: IVec3, facing: Facing) -> bool {
        world.set_cell(
            anchor,
            CellState {
                structure: self.id,
                facing,
                is_main: true,
                is_model: false,
            },
        );
        let model_offset = self.shape.model_offset;
        self.for_each_cell(world, anchor, facing, |world, cell, local| {
            world.set_cell(
                cell,
                CellState {
                    structure: self.id,
                    facing,
                    is_main: cell == anchor,
                    is_model: local == model_offset,
                },
            );
            if cell != anchor {
                world.set_main_ref(cell, anchor);
            }
            true
        })
    }

    /// Tear down the instance that `pos` belongs to, removing every cell of
    /// its footprint.
    ///
    /// `pos` may be any cell of the instance: non-main cells resolve to the
    /// main cell through their back-reference, the main cell stands for
    /// itself. The stored facing of the main cell orients the removal walk.
    /// A cell with no structure metadata is foreign and the call is a no-op.
    ///
    /// # Return
    /// `true` iff the removal walk counted the shape's full cell total.
    pub fn destroy<W: CellGrid>(&self, world: &mut W, pos: IVec3) -> bool {
        let main = match world.main_ref(pos) {
            Some(main) => main,
            None => match world.cell(pos) {
                Some(state) if state.is_main => pos,
                _ => return false,
            },
        };
        let Some(state) = world.cell(main) else {
            return false;
        };
        let complete = self.for_each_cell(world, main, state.facing, |world, cell, _| {
            world.remove_cell(cell);
            true
        });
        // The main cell was seeded outside the walk on placement and its
        // local coordinate can fall outside the occupancy rule (hollow
        // interior, unlisted shaped point), so remove it explicitly too.
        world.remove_cell(main);
        complete
    }
}
