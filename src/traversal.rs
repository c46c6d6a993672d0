//! Cell traversal validation.
//!
//! Combines the grid mapper with the world query service. An actor may
//! enter a cell only if there is floor under it AND the sweep from the
//! actor's cell centre to the target centre hits nothing. No physics here,
//! just the decision rule.

use glam::Vec3;

use crate::grid::{Cell, GridMap};
use crate::world_query::WorldQuery;

/// Borrowed view used by every movement and attack path.
#[derive(Clone, Copy)]
pub struct TraversalValidator<'a> {
    grid: &'a GridMap,
    query: &'a dyn WorldQuery,
}

impl<'a> TraversalValidator<'a> {
    pub fn new(grid: &'a GridMap, query: &'a dyn WorldQuery) -> Self {
        Self { grid, query }
    }

    pub fn grid(&self) -> &'a GridMap {
        self.grid
    }

    pub fn query(&self) -> &'a dyn WorldQuery {
        self.query
    }

    pub fn has_floor(&self, cell: Cell) -> bool {
        self.query.has_floor(cell)
    }

    /// Can an actor standing at `from_world` move into `target`?
    pub fn can_enter_cell(&self, from_world: Vec3, target: Cell) -> bool {
        if !self.query.has_floor(target) {
            return false;
        }

        let from_center = self.grid.cell_to_world_center(self.grid.world_to_cell(from_world));
        let to_center = self.grid.cell_to_world_center(target);
        !self.query.is_path_blocked(from_center, to_center)
    }

    /// One straight step from `prev` into `next`.
    pub fn can_step(&self, prev: Cell, next: Cell) -> bool {
        self.can_enter_cell(self.grid.cell_to_world_center(prev), next)
    }
}
