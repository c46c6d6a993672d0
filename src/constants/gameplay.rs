//! Player constants (health, stepping, attack).

/// Player's starting and maximum health
pub const PLAYER_MAX_HEALTH: i32 = 10;
/// Seconds to slide one cell
pub const PLAYER_MOVE_DURATION: f32 = 0.12;
/// Seconds to rotate 90 degrees
pub const PLAYER_TURN_DURATION: f32 = 0.09;

/// Player melee damage
pub const PLAYER_ATTACK_DAMAGE: i32 = 1;
/// Seconds between player attacks
pub const PLAYER_ATTACK_COOLDOWN: f32 = 0.55;
/// Closest a target may stand (tiles). 2 keeps a one-tile gap.
pub const PLAYER_ATTACK_MIN_RANGE: i32 = 2;
/// Farthest a target may stand (tiles)
pub const PLAYER_ATTACK_MAX_RANGE: i32 = 2;
