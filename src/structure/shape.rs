//! Structure shape definitions and the resolved shape descriptor.
//!
//! A [`ShapeDef`] is the serde-friendly form that lives in RON files under
//! `data/structures/` (mirroring how blocks are defined in `data/blocks` in
//! the engine). [`ShapeDescriptor`] is the immutable resolved form the
//! footprint walk consumes: dimensions, occupancy rule, and the two anchor
//! offsets resolved once at construction.
//!
//! Offset resolution is three-tier per offset: an explicit vector override
//! beats per-axis centering flags, which beat the fixed defaults. The block
//! offset's centered depth uses `(depth + 1) / 2` while the model offset
//! uses `(depth - 1) / 2`; the walk steps one cell along the facing before
//! visiting the first depth cell, and the extra half-step keeps a centered
//! anchor centered after that shift.

use bevy::math::IVec3;
use serde::{Deserialize, Serialize};

/// Per-axis configuration for one of a shape's two anchor offsets.
///
/// Leaving everything at default selects the shape's fixed default offset
/// for that anchor. `explicit` overrides the whole vector and wins over the
/// centering flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffsetConfig {
    #[serde(default)]
    pub centered_x: bool, // Center this axis instead of using the fixed default
    #[serde(default)]
    pub centered_y: bool,
    #[serde(default)]
    pub centered_z: bool,
    #[serde(default)]
    pub explicit: Option<(i32, i32, i32)>, // Whole-vector override, wins over centering
}

/// Serde-deserializable definition of a multi-block structure type.
///
/// # Example RON
///
/// ```ron
/// (
///     name: "smeltery",
///     id: 2,
///     width: 3,
///     height: 3,
///     depth: 3,
///     hollow: true,
///     model_offset: (centered_x: true),
///     block_offset: (centered_x: true, centered_z: true),
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeDef {
    pub name: String,
    pub id: crate::structure::StructureId,
    pub width: i32,
    pub height: i32,
    pub depth: i32,

    /// When `true` the structure occupies exactly the cells listed in
    /// `points` instead of the bounding box.
    #[serde(default)]
    pub shaped: bool,

    /// When `true` (and not `shaped`) only the boundary shell of the box is
    /// occupied; interior cells stay free.
    #[serde(default)]
    pub hollow: bool,

    /// Local-space cells occupied by a shaped structure. Required non-empty
    /// when `shaped` is set; ignored otherwise.
    #[serde(default)]
    pub points: Vec<(i32, i32, i32)>,

    #[serde(default)]
    pub model_offset: OffsetConfig,
    #[serde(default)]
    pub block_offset: OffsetConfig,
}

impl Default for ShapeDef {
    fn default() -> Self {
        Self {
            name: "structure".to_string(),
            id: 1,
            width: 1,
            height: 1,
            depth: 1,
            shaped: false,
            hollow: false,
            points: Vec::new(),
            model_offset: OffsetConfig::default(),
            block_offset: OffsetConfig::default(),
        }
    }
}

/// Immutable resolved shape of a structure type.
///
/// Local coordinates range over `[0,width) x [0,height) x [0,depth)`.
/// `model_offset` marks the local cell that renders the structure's visual
/// model; `block_offset` is the local-space anchor aligned with the world
/// placement position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDescriptor {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    pub shaped: bool,
    pub hollow: bool,
    pub points: Vec<IVec3>,
    pub model_offset: IVec3,
    pub block_offset: IVec3,

    /// Number of cells the placement walk must successfully act on:
    /// `points.len()` for shaped structures, the shell cell count for hollow
    /// boxes, the full cuboid volume otherwise.
    pub max_cells: usize,
}

impl ShapeDescriptor {
    /// Resolve a definition into its immutable descriptor form.
    ///
    /// Construction cannot fail; dimensions are clamped to at least 1 (the
    /// loader rejects non-positive dimensions before this point with a
    /// warning).
    ///
    /// # Arguments
    /// * `def` - the definition to resolve.
    #[must_use]
    pub fn new(def: &ShapeDef) -> Self {
        let width = def.width.max(1);
        let height = def.height.max(1);
        let depth = def.depth.max(1);

        let model_offset = resolve_model_offset(&def.model_offset, width, height, depth);
        let block_offset = resolve_block_offset(&def.block_offset, width, height, depth);

        let points: Vec<IVec3> = def
            .points
            .iter()
            .map(|&(x, y, z)| IVec3::new(x, y, z))
            .collect();

        let volume = (width * height * depth) as usize;
        let max_cells = if def.shaped {
            points.len()
        } else if def.hollow {
            volume - ((width - 2).max(0) * (depth - 2).max(0) * height) as usize
        } else {
            volume
        };

        ShapeDescriptor {
            width,
            height,
            depth,
            shaped: def.shaped,
            hollow: def.hollow,
            points,
            model_offset,
            block_offset,
            max_cells,
        }
    }

    /// Whether the local `(w, d)` column lies strictly inside the bounding
    /// box on both horizontal axes. Hollow shapes leave these cells free.
    #[must_use]
    pub fn is_interior(&self, w: i32, d: i32) -> bool {
        w != 0 && d != 0 && w != self.width - 1 && d != self.depth - 1
    }
}

fn resolve_model_offset(cfg: &OffsetConfig, width: i32, height: i32, depth: i32) -> IVec3 {
    if let Some((x, y, z)) = cfg.explicit {
        return IVec3::new(x, y, z);
    }
    IVec3::new(
        if cfg.centered_x { (width - 1) / 2 } else { width - 1 },
        if cfg.centered_y { (height - 1) / 2 } else { 0 },
        if cfg.centered_z { (depth - 1) / 2 } else { depth },
    )
}

fn resolve_block_offset(cfg: &OffsetConfig, width: i32, height: i32, depth: i32) -> IVec3 {
    if let Some((x, y, z)) = cfg.explicit {
        return IVec3::new(x, y, z);
    }
    // Centered depth is (depth + 1) / 2, one more than the model offset's
    // centered value: the walk steps forward once before the first depth
    // cell, so the block anchor needs the extra half-step to stay centered.
    IVec3::new(
        (width - 1) / 2,
        if cfg.centered_y { (height - 1) / 2 } else { 0 },
        if cfg.centered_z { (depth + 1) / 2 } else { depth },
    )
}
