//! Four-way facing used for player movement and attack direction.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Cardinal facing. North is +Z, East is +X.
///
/// Also used as a component on the player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    fn index(self) -> usize {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    /// Rotate 90 degrees counter-clockwise
    pub fn turn_left(self) -> Facing {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Rotate 90 degrees clockwise
    pub fn turn_right(self) -> Facing {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn to_world_vector(self) -> Vec3 {
        match self {
            Facing::North => Vec3::Z,
            Facing::East => Vec3::X,
            Facing::South => Vec3::NEG_Z,
            Facing::West => Vec3::NEG_X,
        }
    }

    /// Yaw in degrees: N=0, E=90, S=180, W=270
    pub fn yaw_degrees(self) -> f32 {
        self.index() as f32 * 90.0
    }

    /// One-cell offset (dx, dz) in this direction
    pub fn cell_step(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::East => (1, 0),
            Facing::South => (0, -1),
            Facing::West => (-1, 0),
        }
    }
}
