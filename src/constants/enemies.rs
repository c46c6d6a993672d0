//! Enemy stats and behaviour constants.

/// Enemy health
pub const ENEMY_MAX_HEALTH: i32 = 3;
/// Detection radius in tiles (euclidean, compared squared)
pub const ENEMY_AGGRO_RADIUS_TILES: i32 = 8;
/// Height of the sight ray above the actor's position
pub const ENEMY_SIGHT_EYE_HEIGHT: f32 = 0.9;
/// Seconds aggro persists after losing sight (0 = drop immediately)
pub const ENEMY_FORGET_AFTER_SECONDS: f32 = 0.0;
/// Seconds between path requests
pub const ENEMY_REPATH_INTERVAL: f32 = 0.35;
/// Seconds between decision ticks
pub const ENEMY_THINK_INTERVAL: f32 = 0.10;
/// Seconds between steps
pub const ENEMY_MOVE_COOLDOWN: f32 = 0.55;
/// Seconds to slide one cell
pub const ENEMY_MOVE_DURATION: f32 = 0.12;
/// Exact distance (tiles) the enemy strikes from
pub const ENEMY_MELEE_RANGE_TILES: i32 = 2;
/// Enemy attack damage
pub const ENEMY_DAMAGE: i32 = 1;
/// Seconds between enemy attacks
pub const ENEMY_ATTACK_COOLDOWN: f32 = 0.85;
/// Display name of the level's enemies
pub const ENEMY_NAME: &str = "Skeleton";
