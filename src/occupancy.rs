//! Occupancy index: which actor holds which cell.
//!
//! A hash map keyed by cell, holding weak `Entity` handles. The index never
//! owns actor lifetime. Each cell maps to at most one occupant and each
//! registered actor's `Occupant::cell` equals its key, as long as callers
//! go through `register` / `move_occupant` / `unregister`.

use std::collections::HashMap;

use hecs::{Entity, World};

use crate::components::{Occupant, Transform};
use crate::grid::{Cell, GridMap};

#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    cells: HashMap<Cell, Entity>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Refresh the actor's cell from its transform and claim that cell.
    ///
    /// Idempotent. Overwrites whatever the cell held before.
    pub fn register(&mut self, world: &World, grid: &GridMap, entity: Entity) {
        let position = match world.get::<&Transform>(entity) {
            Ok(transform) => transform.position,
            Err(_) => return,
        };
        let mut occupant = match world.get::<&mut Occupant>(entity) {
            Ok(occupant) => occupant,
            Err(_) => return,
        };

        occupant.cell = grid.world_to_cell(position);
        self.cells.insert(occupant.cell, entity);
    }

    /// Release the actor's cell, but only if the entry still points at it.
    pub fn unregister(&mut self, world: &World, entity: Entity) {
        let cell = match world.get::<&Occupant>(entity) {
            Ok(occupant) => occupant.cell,
            Err(_) => return,
        };
        self.remove_if_held_by(cell, entity);
    }

    pub fn get_at_cell(&self, cell: Cell) -> Option<Entity> {
        self.cells.get(&cell).copied()
    }

    pub fn is_vacant(&self, cell: Cell) -> bool {
        !self.cells.contains_key(&cell)
    }

    /// Vacant, or held by `entity` itself
    pub fn is_free_for(&self, cell: Cell, entity: Entity) -> bool {
        self.get_at_cell(cell).map_or(true, |held| held == entity)
    }

    /// Move an occupant between cells.
    ///
    /// The destination is overwritten unconditionally. Callers must check
    /// vacancy with `get_at_cell` first; the index trusts them.
    pub fn move_occupant(&mut self, world: &World, entity: Entity, from: Cell, to: Cell) {
        let mut occupant = match world.get::<&mut Occupant>(entity) {
            Ok(occupant) => occupant,
            Err(_) => return,
        };

        self.remove_if_held_by(from, entity);
        occupant.cell = to;
        self.cells.insert(to, entity);
    }

    /// Drop entries whose entity has been despawned.
    pub fn prune_stale(&mut self, world: &World) -> usize {
        let before = self.cells.len();
        self.cells.retain(|_, entity| world.contains(*entity));
        before - self.cells.len()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Entity)> + '_ {
        self.cells.iter().map(|(cell, entity)| (*cell, *entity))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    fn remove_if_held_by(&mut self, cell: Cell, entity: Entity) {
        if self.cells.get(&cell) == Some(&entity) {
            self.cells.remove(&cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn actor(world: &mut World, x: f32, z: f32) -> Entity {
        world.spawn((
            Transform::new(Vec3::new(x, 0.5, z), 0.0),
            Occupant::new(Cell::ZERO),
        ))
    }

    fn cell_of(world: &World, entity: Entity) -> Cell {
        world.get::<&Occupant>(entity).unwrap().cell
    }

    #[test]
    fn test_register_refreshes_cell_from_transform() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let e = actor(&mut world, 2.2, -0.9);

        index.register(&world, &grid, e);
        assert_eq!(cell_of(&world, e), Cell::new(2, -1));
        assert_eq!(index.get_at_cell(Cell::new(2, -1)), Some(e));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let e = actor(&mut world, 1.0, 1.0);

        index.register(&world, &grid, e);
        let first: Vec<_> = index.iter().collect();
        index.register(&world, &grid, e);
        let second: Vec<_> = index.iter().collect();
        assert_eq!(first, second);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_move_vacates_source_and_claims_target() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let e = actor(&mut world, 0.0, 0.0);
        index.register(&world, &grid, e);

        let (a, b) = (Cell::new(0, 0), Cell::new(1, 0));
        index.move_occupant(&world, e, a, b);
        assert_ne!(index.get_at_cell(a), Some(e));
        assert_eq!(index.get_at_cell(b), Some(e));
        assert_eq!(cell_of(&world, e), b);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_move_leaves_foreign_source_entry() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let mover = actor(&mut world, 0.0, 0.0);
        let other = actor(&mut world, 5.0, 5.0);
        index.register(&world, &grid, mover);
        index.register(&world, &grid, other);

        // Stale `from` that belongs to someone else is not cleared
        index.move_occupant(&world, mover, Cell::new(5, 5), Cell::new(0, 1));
        assert_eq!(index.get_at_cell(Cell::new(5, 5)), Some(other));
        assert_eq!(index.get_at_cell(Cell::new(0, 1)), Some(mover));
    }

    #[test]
    fn test_unregister_guards_against_overwritten_entry() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let first = actor(&mut world, 3.0, 3.0);
        let second = actor(&mut world, 3.0, 3.0);
        index.register(&world, &grid, first);
        index.register(&world, &grid, second);

        index.unregister(&world, first);
        assert_eq!(index.get_at_cell(Cell::new(3, 3)), Some(second));

        index.unregister(&world, second);
        assert!(index.is_empty());
    }

    #[test]
    fn test_entity_without_occupant_is_ignored() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let e = world.spawn((Transform::new(Vec3::ZERO, 0.0),));

        index.register(&world, &grid, e);
        index.move_occupant(&world, e, Cell::ZERO, Cell::new(1, 1));
        assert!(index.is_empty());
    }

    #[test]
    fn test_prune_stale_drops_despawned() {
        let mut world = World::new();
        let grid = GridMap::default();
        let mut index = OccupancyIndex::new();
        let keep = actor(&mut world, 0.0, 0.0);
        let gone = actor(&mut world, 1.0, 0.0);
        index.register(&world, &grid, keep);
        index.register(&world, &grid, gone);

        world.despawn(gone).unwrap();
        assert_eq!(index.prune_stale(&world), 1);
        assert_eq!(index.get_at_cell(Cell::new(1, 0)), None);
        assert!(index.is_free_for(Cell::new(0, 0), keep));
        assert!(!index.is_vacant(Cell::new(0, 0)));
    }
}
