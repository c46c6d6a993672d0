//! Death handling.

use hecs::{Entity, World};
use tracing::info;

use crate::components::{Enemy, Health, Name, Occupant};
use crate::events::{EventQueue, GameEvent};
use crate::occupancy::OccupancyIndex;
use crate::spawning::despawn_actor;

/// Remove enemies whose health reached zero.
///
/// Each one is unregistered from the occupancy index before the entity is
/// despawned, then announced with `EnemyDied`.
pub fn remove_dead_enemies(
    world: &mut World,
    index: &mut OccupancyIndex,
    events: &mut EventQueue,
) -> Vec<Entity> {
    let mut dead = Vec::new();

    for (id, (health, occupant, name)) in world
        .query::<(&Health, &Occupant, Option<&Name>)>()
        .with::<&Enemy>()
        .iter()
    {
        if health.is_dead() {
            let name = name.map_or("enemy", |n| n.0.as_str()).to_string();
            dead.push((id, occupant.cell, name));
        }
    }

    let mut removed = Vec::with_capacity(dead.len());
    for (id, cell, name) in dead {
        info!(%name, ?cell, "enemy slain");
        despawn_actor(world, index, id);
        events.push(GameEvent::EnemyDied { entity: id, cell });
        removed.push(id);
    }
    removed
}
