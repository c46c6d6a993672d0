//! Grid window around the player for a minimap widget.
//!
//! The window is rebuilt on its own countdown; the facing arrow is updated
//! every tick.

use hecs::{Entity, World};

use crate::components::{Enemy, Occupant, Transform};
use crate::constants::MIN_MINIMAP_REFRESH;
use crate::direction::Facing;
use crate::grid::{Cell, GridMap};
use crate::occupancy::OccupancyIndex;
use crate::time_system::Countdown;
use crate::world_query::{BlockingVisual, WorldQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimapCell {
    Player,
    Enemy,
    Floor,
    Blocked,
}

impl MinimapCell {
    pub fn glyph(self) -> char {
        match self {
            MinimapCell::Player => '@',
            MinimapCell::Enemy => 'e',
            MinimapCell::Floor => '.',
            MinimapCell::Blocked => '#',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Minimap {
    radius: i32,
    refresh_interval: f32,
    refresh: Countdown,
    center: Cell,
    facing: Facing,
    /// Row-major, north row first
    cells: Vec<MinimapCell>,
    walls: Vec<Option<BlockingVisual>>,
}

impl Minimap {
    pub fn new(radius: i32, refresh_interval: f32) -> Self {
        let radius = radius.max(0);
        let side = (radius * 2 + 1) as usize;
        Self {
            radius,
            refresh_interval: refresh_interval.max(MIN_MINIMAP_REFRESH),
            refresh: Countdown::new(),
            center: Cell::default(),
            facing: Facing::default(),
            cells: vec![MinimapCell::Blocked; side * side],
            walls: vec![None; side * side],
        }
    }

    pub fn side(&self) -> i32 {
        self.radius * 2 + 1
    }

    pub fn center(&self) -> Cell {
        self.center
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Cell at window offset (dx, dz) from the player
    pub fn cell_at(&self, dx: i32, dz: i32) -> Option<MinimapCell> {
        self.slot(dx, dz).map(|i| self.cells[i])
    }

    pub fn wall_at(&self, dx: i32, dz: i32) -> Option<BlockingVisual> {
        self.slot(dx, dz).and_then(|i| self.walls[i])
    }

    fn slot(&self, dx: i32, dz: i32) -> Option<usize> {
        if dx.abs() > self.radius || dz.abs() > self.radius {
            return None;
        }
        let row = self.radius - dz;
        let column = dx + self.radius;
        Some((row * self.side() + column) as usize)
    }

    /// Advance the refresh countdown; rebuild the window when it elapses.
    /// Returns true if the window was rebuilt.
    pub fn tick(
        &mut self,
        dt: f32,
        world: &World,
        grid: &GridMap,
        query: &dyn WorldQuery,
        index: &OccupancyIndex,
        player: Entity,
    ) -> bool {
        if let Ok(facing) = world.get::<&Facing>(player) {
            self.facing = *facing;
        }

        self.refresh.tick(dt);
        if !self.refresh.is_ready() {
            return false;
        }
        self.refresh.start(self.refresh_interval);
        self.rebuild(world, grid, query, index, player);
        true
    }

    pub fn rebuild(
        &mut self,
        world: &World,
        grid: &GridMap,
        query: &dyn WorldQuery,
        index: &OccupancyIndex,
        player: Entity,
    ) {
        puffin::profile_function!();

        let center = match world.get::<&Occupant>(player) {
            Ok(occupant) => occupant.cell,
            Err(_) => match world.get::<&Transform>(player) {
                Ok(transform) => grid.world_to_cell(transform.position),
                Err(_) => return,
            },
        };
        self.center = center;

        let radius = self.radius;
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let cell = center.offset(dx, dz);
                let kind = if dx == 0 && dz == 0 {
                    MinimapCell::Player
                } else if !query.has_floor(cell) {
                    MinimapCell::Blocked
                } else {
                    match index.get_at_cell(cell) {
                        Some(occupant) if world.get::<&Enemy>(occupant).is_ok() => {
                            MinimapCell::Enemy
                        }
                        _ => MinimapCell::Floor,
                    }
                };
                if let Some(i) = self.slot(dx, dz) {
                    self.cells[i] = kind;
                    self.walls[i] = query.blocking_visual(cell);
                }
            }
        }
    }

    /// Text rendering, north row first. Walls overlay their cell as `#`.
    pub fn render_ascii(&self) -> String {
        let side = self.side() as usize;
        let mut out = String::with_capacity(side * (side + 1));
        for (i, cell) in self.cells.iter().enumerate() {
            let glyph = match (cell, self.walls[i]) {
                (MinimapCell::Player, _) => self.facing_glyph(),
                (_, Some(_)) => '#',
                (kind, None) => kind.glyph(),
            };
            out.push(glyph);
            if (i + 1) % side == 0 {
                out.push('\n');
            }
        }
        out
    }

    fn facing_glyph(&self) -> char {
        match self.facing {
            Facing::North => '^',
            Facing::East => '>',
            Facing::South => 'v',
            Facing::West => '<',
        }
    }
}
