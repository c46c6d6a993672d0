//! HUD constants.

/// Entries kept in the combat log before the oldest are dropped
pub const COMBAT_LOG_MAX_ENTRIES: usize = 100;
/// Cells shown in each direction around the player on the minimap
pub const MINIMAP_RADIUS_CELLS: i32 = 5;
/// Seconds between minimap window refreshes
pub const MINIMAP_REFRESH_SECONDS: f32 = 0.15;
/// Prompt shown when a session starts
pub const HUD_DEFAULT_PROMPT: &str = "Ready.";
