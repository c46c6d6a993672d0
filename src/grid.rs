//! Discrete tile grid laid over continuous world space.
//!
//! `Cell` is the integer coordinate used as the occupancy key; `GridMap`
//! converts between cells and world positions for a fixed cell size.

use std::ops::Add;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;

/// Integer grid coordinate on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const ZERO: Cell = Cell { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Manhattan distance to another cell
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }

    /// Same row or same column
    pub fn is_aligned_with(self, other: Cell) -> bool {
        self.x == other.x || self.z == other.z
    }

    /// Exactly one orthogonal step away
    pub fn is_adjacent_4(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Unit step (each axis -1, 0 or 1) from this cell toward another
    pub fn signum_toward(self, other: Cell) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.z - self.z).signum())
    }
}

impl Add<(i32, i32)> for Cell {
    type Output = Cell;

    fn add(self, (dx, dz): (i32, i32)) -> Cell {
        self.offset(dx, dz)
    }
}

/// Maps world positions to cells and back.
#[derive(Debug, Clone, Copy)]
pub struct GridMap {
    cell_size: f32,
    cell_center_y: f32,
    snap_height_offset: f32,
}

impl GridMap {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            cell_center_y: config.cell_center_y,
            snap_height_offset: config.snap_height_offset,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Nearest cell to a world position. Ties round away from zero.
    pub fn world_to_cell(&self, pos: Vec3) -> Cell {
        Cell::new(
            (pos.x / self.cell_size).round() as i32,
            (pos.z / self.cell_size).round() as i32,
        )
    }

    /// World position of a cell's centre at floor level.
    pub fn cell_to_world_center(&self, cell: Cell) -> Vec3 {
        Vec3::new(
            cell.x as f32 * self.cell_size,
            self.cell_center_y,
            cell.z as f32 * self.cell_size,
        )
    }

    /// Round x/z to the nearest cell-aligned value and fix y at standing height.
    pub fn snap_to_cell_center(&self, pos: Vec3) -> Vec3 {
        let x = (pos.x / self.cell_size).round() * self.cell_size;
        let z = (pos.z / self.cell_size).round() * self.cell_size;
        Vec3::new(x, self.cell_center_y + self.snap_height_offset, z)
    }
}

impl Default for GridMap {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}
