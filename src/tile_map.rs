//! ASCII level format and the reference world query implementation.
//!
//! ```text
//! #######
//! #P..|.#     .  floor          #  wall (no floor, blocks movement + sight)
//! #..~..#     |  bars           ~  pit (no floor, blocks nothing)
//! #...E.#     P  player start   E  enemy start
//! #######
//! ```
//!
//! Row 0 of the text is the northmost row, so cell `z = rows - 1 - row`.

use glam::{Vec2, Vec3};

use crate::config::WorldQueryConfig;
use crate::constants::*;
use crate::error::LevelError;
use crate::grid::{Cell, GridMap};
use crate::world_query::{BlockingVisual, WorldQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Floor,
    Wall,
    Bars,
    Pit,
}

impl TileKind {
    pub fn has_floor(&self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Bars)
    }

    pub fn blocks_movement(&self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Bars)
    }

    pub fn blocks_sight(&self) -> bool {
        matches!(self, TileKind::Wall)
    }

    /// Floor an actor can stand on
    pub fn is_walkable(&self) -> bool {
        self.has_floor() && !self.blocks_movement()
    }
}

#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    player_start: Cell,
    enemy_starts: Vec<Cell>,
}

impl TileMap {
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        // Trailing blank lines are not rows
        let row_count = rows
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |last| last + 1);
        if row_count == 0 {
            return Err(LevelError::Empty);
        }

        let rows = &rows[..row_count];
        let width = rows.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;
        let height = row_count as i32;
        let mut tiles = vec![TileKind::Pit; (width * height) as usize];
        let mut player_start = None;
        let mut enemy_starts = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let z = height - 1 - row as i32;
            for (column, glyph) in line.chars().enumerate() {
                let x = column as i32;
                let kind = match glyph {
                    '.' => TileKind::Floor,
                    '#' => TileKind::Wall,
                    '|' => TileKind::Bars,
                    ' ' | '~' => TileKind::Pit,
                    'P' => {
                        if player_start.is_some() {
                            return Err(LevelError::DuplicatePlayerStart);
                        }
                        player_start = Some(Cell::new(x, z));
                        TileKind::Floor
                    }
                    'E' => {
                        enemy_starts.push(Cell::new(x, z));
                        TileKind::Floor
                    }
                    other => {
                        return Err(LevelError::UnknownGlyph {
                            glyph: other,
                            row,
                            column,
                        })
                    }
                };
                tiles[(z * width + x) as usize] = kind;
            }
        }

        let player_start = player_start.ok_or(LevelError::MissingPlayerStart)?;
        Ok(Self {
            width,
            height,
            tiles,
            player_start,
            enemy_starts,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn player_start(&self) -> Cell {
        self.player_start
    }

    pub fn enemy_starts(&self) -> &[Cell] {
        &self.enemy_starts
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width && cell.z < self.height
    }

    /// Out of bounds reads as pit
    pub fn tile(&self, cell: Cell) -> TileKind {
        if !self.in_bounds(cell) {
            return TileKind::Pit;
        }
        self.tiles[(cell.z * self.width + cell.x) as usize]
    }

    /// Every cell an actor could stand on, row-major from the south
    pub fn walkable_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for z in 0..self.height {
            for x in 0..self.width {
                let cell = Cell::new(x, z);
                if self.tile(cell).is_walkable() {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}

/// `WorldQuery` over a `TileMap`.
#[derive(Debug, Clone)]
pub struct TileWorld {
    map: TileMap,
    grid: GridMap,
    cast_radius: f32,
}

impl TileWorld {
    pub fn new(map: TileMap, grid: GridMap, config: &WorldQueryConfig) -> Self {
        Self {
            map,
            grid,
            cast_radius: config.cast_radius.max(0.0),
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Circle at `p` (XZ, world units) overlapping a movement-blocking tile?
    fn circle_hits_blocker(&self, p: Vec2) -> bool {
        let size = self.grid.cell_size();
        let r = self.cast_radius;
        let min_x = ((p.x - r) / size).round() as i32;
        let max_x = ((p.x + r) / size).round() as i32;
        let min_z = ((p.y - r) / size).round() as i32;
        let max_z = ((p.y + r) / size).round() as i32;
        let half = size * 0.5;

        for z in min_z..=max_z {
            for x in min_x..=max_x {
                let cell = Cell::new(x, z);
                if !self.map.tile(cell).blocks_movement() {
                    continue;
                }
                let center = Vec2::new(x as f32 * size, z as f32 * size);
                let closest = p.clamp(center - Vec2::splat(half), center + Vec2::splat(half));
                // Strict so that touching an edge doesn't count
                if closest.distance_squared(p) < r * r {
                    return true;
                }
            }
        }
        false
    }
}

impl WorldQuery for TileWorld {
    fn has_floor(&self, cell: Cell) -> bool {
        self.map.tile(cell).has_floor()
    }

    fn is_path_blocked(&self, from_center: Vec3, to_center: Vec3) -> bool {
        let from = Vec2::new(from_center.x, from_center.z);
        let to = Vec2::new(to_center.x, to_center.z);
        let length = from.distance(to);
        if length <= f32::EPSILON {
            return false;
        }

        let step = self.grid.cell_size() * WORLD_SWEEP_STEP_FRACTION;
        // Degenerate grid, nothing can be swept
        if !(step > 0.0) {
            return true;
        }
        let samples = (length / step).ceil() as i32;
        (0..=samples).any(|i| {
            let t = i as f32 / samples as f32;
            self.circle_hits_blocker(from.lerp(to, t))
        })
    }

    fn has_line_of_sight(&self, from_eye: Vec3, to_eye: Vec3) -> bool {
        let start = self.grid.world_to_cell(from_eye);
        let end = self.grid.world_to_cell(to_eye);
        bresenham_line(start, end)
            .into_iter()
            .filter(|cell| *cell != start && *cell != end)
            .all(|cell| !self.map.tile(cell).blocks_sight())
    }

    fn blocking_visual(&self, cell: Cell) -> Option<BlockingVisual> {
        let size = match self.map.tile(cell) {
            TileKind::Wall => Vec2::ONE,
            TileKind::Bars => Vec2::new(1.0, BARS_VISUAL_THICKNESS),
            TileKind::Floor | TileKind::Pit => return None,
        };
        Some(BlockingVisual {
            normalized_size: size.clamp(Vec2::splat(BLOCKING_VISUAL_MIN_SIZE), Vec2::ONE),
        })
    }
}

/// Cells on the Bresenham line between two cells, endpoints included.
pub fn bresenham_line(from: Cell, to: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    let dx = (to.x - from.x).abs();
    let dz = -(to.z - from.z).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sz = if from.z < to.z { 1 } else { -1 };
    let mut err = dx + dz;
    let (mut x, mut z) = (from.x, from.z);

    loop {
        cells.push(Cell::new(x, z));
        if x == to.x && z == to.z {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dz {
            err += dz;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            z += sz;
        }
    }
    cells
}
