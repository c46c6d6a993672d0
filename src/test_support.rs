//! Builders shared by the unit tests.

use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{Occupant, Transform};
use crate::config::{GameConfig, WorldQueryConfig};
use crate::events::EventQueue;
use crate::grid::{Cell, GridMap};
use crate::occupancy::OccupancyIndex;
use crate::pathfinding::{GridPathSolver, PathCompletion, PathResult, PathSolver, PathTicket};
use crate::spawning::{spawn_player, EnemyDef};
use crate::systems::animation::advance_motions;
use crate::systems::enemy_ai::{deliver_path, update_enemies, EnemyContext};
use crate::systems::player_attack::{try_attack, AttackOutcome};
use crate::systems::player_stepper::{request_move, request_turn, MoveDirection, StepOutcome, TurnDirection};
use crate::tile_map::{TileMap, TileWorld};
use crate::traversal::TraversalValidator;

pub fn parse_rows(rows: &[&str]) -> TileMap {
    TileMap::parse(&rows.join("\n")).expect("test level should parse")
}

/// Grid with default config plus a tile world over the given rows
pub fn level(rows: &[&str]) -> (GridMap, TileWorld) {
    let grid = GridMap::default();
    let tiles = TileWorld::new(parse_rows(rows), grid, &WorldQueryConfig::default());
    (grid, tiles)
}

/// Snapped centre of a cell under the default grid
pub fn center(x: i32, z: i32) -> Vec3 {
    let grid = GridMap::default();
    grid.snap_to_cell_center(grid.cell_to_world_center(Cell::new(x, z)))
}

/// Solver that answers every request with a fixed result, or never.
pub struct ScriptedSolver {
    pub reply: Option<PathResult>,
    pub requests: Vec<(Entity, PathTicket)>,
    outstanding: Vec<(Entity, PathTicket)>,
    next_ticket: PathTicket,
}

impl ScriptedSolver {
    pub fn new(reply: Option<PathResult>) -> Self {
        Self {
            reply,
            requests: Vec::new(),
            outstanding: Vec::new(),
            next_ticket: 1,
        }
    }
}

impl PathSolver for ScriptedSolver {
    fn is_idle(&self, requester: Entity) -> bool {
        !self.outstanding.iter().any(|(e, _)| *e == requester)
    }

    fn request_path(&mut self, requester: Entity, _from: Vec3, _to: Vec3) -> PathTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.requests.push((requester, ticket));
        self.outstanding.push((requester, ticket));
        ticket
    }

    fn poll_completed(&mut self) -> Vec<PathCompletion> {
        let Some(reply) = &self.reply else {
            return Vec::new();
        };
        self.outstanding
            .drain(..)
            .map(|(requester, ticket)| PathCompletion {
                requester,
                ticket,
                result: reply.clone(),
            })
            .collect()
    }
}

/// A parsed level with the player and its `E` enemies spawned.
pub struct Fixture {
    pub world: World,
    pub grid: GridMap,
    pub tiles: TileWorld,
    pub index: OccupancyIndex,
    pub events: EventQueue,
    pub config: GameConfig,
    pub solver: GridPathSolver,
    pub player: Entity,
    pub enemies: Vec<Entity>,
}

impl Fixture {
    pub fn default_config() -> GameConfig {
        GameConfig::default()
    }

    pub fn new(rows: &[&str]) -> Self {
        Self::with_config(rows, Self::default_config())
    }

    pub fn with_config(rows: &[&str], config: GameConfig) -> Self {
        let map = parse_rows(rows);
        let grid = GridMap::new(&config.grid);
        let tiles = TileWorld::new(map.clone(), grid, &config.world);
        let solver = GridPathSolver::new(map.clone(), grid, config.spawning.path_smoothing);

        let mut world = World::new();
        let mut index = OccupancyIndex::new();
        let player = spawn_player(&mut world, &grid, &mut index, &config.player, map.player_start());
        let def = EnemyDef::new("Skeleton", config.enemy.clone());
        let enemies = map
            .enemy_starts()
            .iter()
            .map(|cell| def.spawn(&mut world, &grid, &mut index, *cell))
            .collect();

        Self {
            world,
            grid,
            tiles,
            index,
            events: EventQueue::new(),
            config,
            solver,
            player,
            enemies,
        }
    }

    pub fn step(&mut self, entity: Entity, direction: MoveDirection) -> StepOutcome {
        request_move(
            &self.world,
            TraversalValidator::new(&self.grid, &self.tiles),
            &mut self.index,
            &self.config.player,
            entity,
            direction,
            &mut self.events,
        )
    }

    pub fn turn(&mut self, entity: Entity, direction: TurnDirection) -> StepOutcome {
        request_turn(&self.world, &self.config.player, entity, direction)
    }

    pub fn attack(&mut self) -> AttackOutcome {
        try_attack(
            &self.world,
            TraversalValidator::new(&self.grid, &self.tiles),
            &self.index,
            &self.config.player.attack,
            self.player,
            &mut self.events,
        )
    }

    /// Solver results, then every enemy's loop, then motions.
    pub fn tick_enemies(&mut self, dt: f32) {
        run_enemies(
            &mut self.world,
            &self.grid,
            &self.tiles,
            &mut self.index,
            &mut self.events,
            &mut self.solver,
            self.player,
            dt,
        );
    }

    pub fn tick_enemies_with(&mut self, solver: &mut dyn PathSolver, dt: f32) {
        run_enemies(
            &mut self.world,
            &self.grid,
            &self.tiles,
            &mut self.index,
            &mut self.events,
            solver,
            self.player,
            dt,
        );
    }

    pub fn cell_of(&self, entity: Entity) -> Cell {
        self.world
            .get::<&Occupant>(entity)
            .map(|o| o.cell)
            .expect("actor should have an occupant")
    }

    pub fn position_of(&self, entity: Entity) -> Vec3 {
        self.world
            .get::<&Transform>(entity)
            .map(|t| t.position)
            .expect("actor should have a transform")
    }

    pub fn enemy_at(&self, cell: Cell) -> Entity {
        self.enemies
            .iter()
            .copied()
            .find(|e| self.cell_of(*e) == cell)
            .expect("no enemy at cell")
    }
}

#[allow(clippy::too_many_arguments)]
fn run_enemies(
    world: &mut World,
    grid: &GridMap,
    tiles: &TileWorld,
    index: &mut OccupancyIndex,
    events: &mut EventQueue,
    solver: &mut dyn PathSolver,
    player: Entity,
    dt: f32,
) {
    for completion in solver.poll_completed() {
        deliver_path(world, completion);
    }
    let mut ctx = EnemyContext {
        validator: TraversalValidator::new(grid, tiles),
        index,
        solver,
        events,
    };
    update_enemies(world, &mut ctx, player, dt);
    advance_motions(world, grid, dt);
}
