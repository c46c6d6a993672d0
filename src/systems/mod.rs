//! Game systems organized by domain.
//!
//! This module contains all game logic systems, split into focused submodules:
//! - `animation`: Tweened slides and turns, easing
//! - `health`: Damage and healing with notifications
//! - `player_stepper`: One-cell player moves and 90 degree turns
//! - `player_attack`: Facing-line melee resolution and cooldown
//! - `enemy_ai`: Perception, aggro, melee, back-off and path following
//! - `player_input`: Intent mapping
//! - `combat`: Death handling

pub mod animation;
pub mod combat;
pub mod enemy_ai;
pub mod health;
pub mod player_attack;
pub mod player_input;
pub mod player_stepper;

// Re-export commonly used items
pub use animation::{advance_motions, ease_out_cubic, lerp_angle_degrees};
pub use combat::remove_dead_enemies;
pub use enemy_ai::{update_enemies, EnemyBrain, EnemyContext};
pub use health::{apply_damage, apply_heal, broadcast_health};
pub use player_attack::{try_attack, AttackOutcome, PlayerAttack};
pub use player_input::PlayerIntent;
pub use player_stepper::{request_move, request_turn, MoveDirection, StepOutcome, TurnDirection};
