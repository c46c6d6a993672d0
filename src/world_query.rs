//! World query service consumed by the grid core.
//!
//! The host engine owns physics; the core only asks three questions of it
//! (floor under a cell, blocked sweep between two points, sight ray between
//! two eye points) plus a cosmetic blocker lookup for the minimap.
//! `TileWorld` in `tile_map` is the reference implementation.

use glam::{Vec2, Vec3};

use crate::grid::Cell;

/// Footprint of the blocker nearest a cell, normalized to the cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockingVisual {
    pub normalized_size: Vec2,
}

pub trait WorldQuery {
    /// Is there walkable floor under this cell?
    fn has_floor(&self, cell: Cell) -> bool;

    /// Would an actor-sized shape swept from one cell centre to another hit
    /// blocking geometry?
    fn is_path_blocked(&self, from_center: Vec3, to_center: Vec3) -> bool;

    /// Is the straight ray between two eye points free of sight blockers?
    fn has_line_of_sight(&self, from_eye: Vec3, to_eye: Vec3) -> bool;

    /// Nearby blocker lookup for map overlays. Purely visual.
    fn blocking_visual(&self, _cell: Cell) -> Option<BlockingVisual> {
        None
    }
}
