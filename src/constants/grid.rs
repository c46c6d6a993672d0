//! Grid and world-query constants.

/// World-space edge length of one grid cell
pub const GRID_CELL_SIZE: f32 = 1.0;
/// Y coordinate of a cell centre
pub const GRID_CELL_CENTER_Y: f32 = 0.0;
/// Height added to the cell centre when snapping an actor onto a cell
pub const GRID_SNAP_HEIGHT_OFFSET: f32 = 0.5;
/// Radius of the swept shape used for blocking checks
pub const WORLD_CAST_RADIUS: f32 = 0.35;
/// Sweep sample spacing as a fraction of the cell size
pub const WORLD_SWEEP_STEP_FRACTION: f32 = 0.25;
/// Smallest normalized footprint reported for a blocker (minimap overlay)
pub const BLOCKING_VISUAL_MIN_SIZE: f32 = 0.06;
/// Footprint of bars along their thin axis, normalized to the cell size
pub const BARS_VISUAL_THICKNESS: f32 = 0.2;
