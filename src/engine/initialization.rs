//! World initialization - spawns the level's actors into a fresh world.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GameConfig;
use crate::constants::ENEMY_NAME;
use crate::events::EventQueue;
use crate::grid::GridMap;
use crate::occupancy::OccupancyIndex;
use crate::spawning::{self, EnemyDef};
use crate::systems::health::broadcast_health;
use crate::tile_map::TileMap;

pub struct SpawnedActors {
    pub player: Entity,
    pub enemies: Vec<Entity>,
}

/// Spawn the player and every enemy the level asks for.
///
/// Enemies go on the level's `E` marks first, then `extra_enemies` are
/// scattered over the remaining free floor with a seeded RNG so a given
/// config always produces the same layout. The player's health is
/// broadcast once so HUD listeners start populated.
pub fn populate_world(
    world: &mut World,
    grid: &GridMap,
    index: &mut OccupancyIndex,
    map: &TileMap,
    config: &GameConfig,
    events: &mut EventQueue,
) -> SpawnedActors {
    let player = spawning::spawn_player(world, grid, index, &config.player, map.player_start());

    let def = EnemyDef::new(ENEMY_NAME, config.enemy.clone());
    let mut enemies = Vec::with_capacity(map.enemy_starts().len());
    for &cell in map.enemy_starts() {
        enemies.push(def.spawn(world, grid, index, cell));
    }

    if config.spawning.extra_enemies > 0 {
        let mut rng = StdRng::seed_from_u64(config.spawning.seed);
        let candidates = map.walkable_cells();
        let scattered = spawning::scatter_enemies(
            world,
            grid,
            index,
            &def,
            &candidates,
            config.spawning.extra_enemies,
            &mut rng,
        );
        enemies.extend(scattered);
    }

    broadcast_health(world, player, events);
    info!(
        enemies = enemies.len(),
        width = map.width(),
        height = map.height(),
        "level populated"
    );

    SpawnedActors { player, enemies }
}
