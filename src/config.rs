//! Configuration surface.
//!
//! Every struct is `#[serde(default)]`, so a JSON file only needs the fields
//! it overrides. Values are fixed for the lifetime of a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::direction::Facing;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub world: WorldQueryConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub hud: HudConfig,
    pub spawning: SpawnConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check the values the simulation cannot work with.
    ///
    /// Invalid attack ranges are also caught when an attack is attempted;
    /// this lets a host report them up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid.cell_size.is_finite() && self.grid.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.grid.cell_size));
        }
        self.player.attack.validate_range()?;
        if self.player.max_health < 1 {
            return Err(ConfigError::InvalidMaxHealth(self.player.max_health));
        }
        if self.enemy.max_health < 1 {
            return Err(ConfigError::InvalidMaxHealth(self.enemy.max_health));
        }

        let durations = [
            ("player.move_duration", self.player.move_duration),
            ("player.turn_duration", self.player.turn_duration),
            ("player.attack.cooldown_seconds", self.player.attack.cooldown_seconds),
            ("enemy.forget_after_seconds", self.enemy.forget_after_seconds),
            ("enemy.repath_interval_seconds", self.enemy.repath_interval_seconds),
            ("enemy.think_interval_seconds", self.enemy.think_interval_seconds),
            ("enemy.move_cooldown_seconds", self.enemy.move_cooldown_seconds),
            ("enemy.move_duration", self.enemy.move_duration),
            ("enemy.attack_cooldown_seconds", self.enemy.attack_cooldown_seconds),
            ("hud.minimap_refresh_seconds", self.hud.minimap_refresh_seconds),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_size: f32,
    pub cell_center_y: f32,
    pub snap_height_offset: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: GRID_CELL_SIZE,
            cell_center_y: GRID_CELL_CENTER_Y,
            snap_height_offset: GRID_SNAP_HEIGHT_OFFSET,
        }
    }
}

/// Settings for the reference tile world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldQueryConfig {
    pub cast_radius: f32,
}

impl Default for WorldQueryConfig {
    fn default() -> Self {
        Self {
            cast_radius: WORLD_CAST_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    pub initial_facing: Facing,
    pub move_duration: f32,
    pub turn_duration: f32,
    pub attack: AttackConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            initial_facing: Facing::North,
            move_duration: PLAYER_MOVE_DURATION,
            turn_duration: PLAYER_TURN_DURATION,
            attack: AttackConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    pub damage: i32,
    pub cooldown_seconds: f32,
    /// Minimum tiles away the target must be. 2 leaves a one-tile gap.
    pub min_range_tiles: i32,
    pub max_range_tiles: i32,
    /// Every step of the line must be enterable (floor, no blocker)
    pub require_clear_line: bool,
    /// Tiles short of `min_range_tiles` must hold no occupant
    pub require_empty_intermediate_tiles: bool,
}

impl AttackConfig {
    pub fn validate_range(&self) -> Result<(), ConfigError> {
        if self.min_range_tiles < 1 || self.max_range_tiles < self.min_range_tiles {
            return Err(ConfigError::InvalidAttackRange {
                min: self.min_range_tiles,
                max: self.max_range_tiles,
            });
        }
        Ok(())
    }
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            damage: PLAYER_ATTACK_DAMAGE,
            cooldown_seconds: PLAYER_ATTACK_COOLDOWN,
            min_range_tiles: PLAYER_ATTACK_MIN_RANGE,
            max_range_tiles: PLAYER_ATTACK_MAX_RANGE,
            require_clear_line: true,
            require_empty_intermediate_tiles: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: i32,
    pub aggro_radius_tiles: i32,
    pub sight_eye_height: f32,
    pub require_line_of_sight: bool,
    pub forget_after_seconds: f32,
    pub repath_interval_seconds: f32,
    pub think_interval_seconds: f32,
    pub move_cooldown_seconds: f32,
    pub move_duration: f32,
    pub melee_range_tiles: i32,
    pub require_clear_line_for_melee: bool,
    pub require_empty_intermediate_for_melee: bool,
    pub damage: i32,
    pub attack_cooldown_seconds: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: ENEMY_MAX_HEALTH,
            aggro_radius_tiles: ENEMY_AGGRO_RADIUS_TILES,
            sight_eye_height: ENEMY_SIGHT_EYE_HEIGHT,
            require_line_of_sight: true,
            forget_after_seconds: ENEMY_FORGET_AFTER_SECONDS,
            repath_interval_seconds: ENEMY_REPATH_INTERVAL,
            think_interval_seconds: ENEMY_THINK_INTERVAL,
            move_cooldown_seconds: ENEMY_MOVE_COOLDOWN,
            move_duration: ENEMY_MOVE_DURATION,
            melee_range_tiles: ENEMY_MELEE_RANGE_TILES,
            require_clear_line_for_melee: true,
            require_empty_intermediate_for_melee: true,
            damage: ENEMY_DAMAGE,
            attack_cooldown_seconds: ENEMY_ATTACK_COOLDOWN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub combat_log_max_entries: usize,
    pub minimap_radius_cells: i32,
    pub minimap_refresh_seconds: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            combat_log_max_entries: COMBAT_LOG_MAX_ENTRIES,
            minimap_radius_cells: MINIMAP_RADIUS_CELLS,
            minimap_refresh_seconds: MINIMAP_REFRESH_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Enemies scattered on free floor in addition to the level's `E` marks
    pub extra_enemies: usize,
    pub seed: u64,
    /// Drop straight-run waypoints from solved paths
    pub path_smoothing: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            extra_enemies: 0,
            seed: 0,
            path_smoothing: true,
        }
    }
}
