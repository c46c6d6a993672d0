use glam::Vec3;

use crate::grid::Cell;

/// World-space pose. `yaw` is in degrees, 0 facing +Z (north).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub yaw: f32,
}

impl Transform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }
}

/// Occupancy bookkeeping: the cell this actor holds in the index.
///
/// Kept in sync with the `OccupancyIndex` by explicit register/move calls,
/// never automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub cell: Cell,
}

impl Occupant {
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }
}

/// In-flight position tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveTween {
    pub from: Vec3,
    pub to: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

/// In-flight yaw tween (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnTween {
    pub from_yaw: f32,
    pub to_yaw: f32,
    pub elapsed: f32,
    pub duration: f32,
}

/// Transition state of an actor. Anything other than `Idle` is busy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Motion {
    #[default]
    Idle,
    Moving(MoveTween),
    Turning(TurnTween),
}

impl Motion {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Motion::Idle)
    }
}

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Enemy marker component
#[derive(Debug, Clone, Copy)]
pub struct Enemy;

/// Display name for log lines
#[derive(Debug, Clone)]
pub struct Name(pub String);

/// Health component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// What a successful `take_damage` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageTaken {
    pub amount: i32,
    /// This hit took health to zero. Only ever true once.
    pub died: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        (self.current as f32 / self.max.max(1) as f32).clamp(0.0, 1.0)
    }

    /// Ignored for non-positive amounts or when already dead.
    pub fn take_damage(&mut self, amount: i32) -> Option<DamageTaken> {
        if amount <= 0 || self.is_dead() {
            return None;
        }

        let before = self.current;
        self.current = (self.current - amount).max(0);
        Some(DamageTaken {
            amount: before - self.current,
            died: self.current == 0,
        })
    }

    /// Returns the health actually restored. No revive: ignored at zero.
    pub fn heal(&mut self, amount: i32) -> Option<i32> {
        if amount <= 0 || self.is_dead() {
            return None;
        }

        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        Some(self.current - before)
    }
}
