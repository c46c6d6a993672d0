//! Timer floors.
//!
//! Configured intervals are clamped to these minimums when a timer is
//! (re)started so a zero in a config file cannot spin an actor every frame.

/// Minimum enemy think interval (seconds)
pub const MIN_THINK_INTERVAL: f32 = 0.02;
/// Minimum enemy repath interval (seconds)
pub const MIN_REPATH_INTERVAL: f32 = 0.05;
/// Minimum enemy move / attack cooldown (seconds)
pub const MIN_ENEMY_COOLDOWN: f32 = 0.05;
/// Minimum tween duration (seconds)
pub const MIN_TWEEN_DURATION: f32 = 0.0001;
/// Minimum minimap refresh interval (seconds)
pub const MIN_MINIMAP_REFRESH: f32 = 0.03;
