//! Common entity query helpers.
//!
//! Pure read-only queries shared by the engine, the HUD and tests.

use hecs::{Entity, World};

use crate::components::{Enemy, Health, Motion, Occupant};
use crate::grid::Cell;
use crate::systems::enemy_ai::EnemyBrain;

/// Is any enemy currently aggro? Drives the HUD combat flag.
pub fn any_enemy_aggro(world: &World) -> bool {
    world
        .query::<&EnemyBrain>()
        .with::<&Enemy>()
        .iter()
        .any(|(_, brain)| brain.is_aggro())
}

/// Living enemies in the world.
pub fn enemy_count(world: &World) -> usize {
    world
        .query::<&Health>()
        .with::<&Enemy>()
        .iter()
        .filter(|(_, health)| !health.is_dead())
        .count()
}

/// Check if an entity is dead (health <= 0). Entities without health count as dead.
pub fn is_entity_dead(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| h.is_dead())
        .unwrap_or(true)
}

/// Get an entity's logical cell.
pub fn get_entity_cell(world: &World, entity: Entity) -> Option<Cell> {
    world.get::<&Occupant>(entity).ok().map(|o| o.cell)
}

/// Can the entity accept a new action this frame?
pub fn is_entity_idle(world: &World, entity: Entity) -> bool {
    world
        .get::<&Motion>(entity)
        .map(|m| !m.is_busy())
        .unwrap_or(false)
}
