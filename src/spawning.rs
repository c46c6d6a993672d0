//! Data-driven actor spawning.
//!
//! Every actor gets a transform snapped onto its cell, an `Occupant`, a
//! `Motion` and is registered with the occupancy index as part of spawning.
//! Removal goes through `despawn_actor` so the index never keeps an entry
//! for a dead entity.

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use crate::components::{Enemy, Health, Motion, Name, Occupant, Player, Transform};
use crate::config::{EnemyConfig, PlayerConfig};
use crate::grid::{Cell, GridMap};
use crate::occupancy::OccupancyIndex;
use crate::systems::enemy_ai::EnemyBrain;
use crate::systems::player_attack::PlayerAttack;

/// Definition of an enemy type - all the data needed to spawn one
#[derive(Clone)]
pub struct EnemyDef {
    /// Display name for log lines
    pub name: &'static str,
    pub config: EnemyConfig,
}

impl EnemyDef {
    pub fn new(name: &'static str, config: EnemyConfig) -> Self {
        Self { name, config }
    }

    /// Spawn this enemy type at the given cell
    pub fn spawn(
        &self,
        world: &mut World,
        grid: &GridMap,
        index: &mut OccupancyIndex,
        cell: Cell,
    ) -> Entity {
        let position = grid.snap_to_cell_center(grid.cell_to_world_center(cell));
        let entity = world.spawn((
            Transform::new(position, 0.0),
            Occupant::new(cell),
            Motion::Idle,
            Enemy,
            Name(self.name.to_string()),
            Health::new(self.config.max_health),
            EnemyBrain::new(self.config.clone()),
        ));
        index.register(world, grid, entity);
        debug!(name = self.name, ?cell, "spawned enemy");
        entity
    }
}

pub fn spawn_player(
    world: &mut World,
    grid: &GridMap,
    index: &mut OccupancyIndex,
    config: &PlayerConfig,
    cell: Cell,
) -> Entity {
    let position = grid.snap_to_cell_center(grid.cell_to_world_center(cell));
    let facing = config.initial_facing;
    let entity = world.spawn((
        Transform::new(position, facing.yaw_degrees()),
        Occupant::new(cell),
        Motion::Idle,
        Player,
        Name("You".to_string()),
        facing,
        Health::new(config.max_health),
        PlayerAttack::default(),
    ));
    index.register(world, grid, entity);
    entity
}

/// Scatter `count` enemies over free cells from `candidates`.
/// Returns the spawned entities; fewer than `count` if space runs out.
pub fn scatter_enemies(
    world: &mut World,
    grid: &GridMap,
    index: &mut OccupancyIndex,
    def: &EnemyDef,
    candidates: &[Cell],
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(count);

    for _ in 0..count {
        let available: Vec<_> = candidates
            .iter()
            .filter(|cell| index.is_vacant(**cell))
            .collect();

        if available.is_empty() {
            break;
        }

        let cell = *available[rng.gen_range(0..available.len())];
        spawned.push(def.spawn(world, grid, index, cell));
    }

    spawned
}

/// Unregister from the index, then remove from the world.
pub fn despawn_actor(world: &mut World, index: &mut OccupancyIndex, entity: Entity) {
    index.unregister(world, entity);
    let _ = world.despawn(entity);
}
