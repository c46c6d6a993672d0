//! Game engine - owns all game state and provides a clean API to the host.
//!
//! The engine handles:
//! - Session state (start, playing, paused, dead, end)
//! - Player intents
//! - Simulation advancement
//! - Event processing and HUD upkeep
//!
//! The host only forwards input, calls `tick` once per frame and presents
//! the returned events and HUD models.

pub mod game_state;
pub mod initialization;
pub mod simulation;

pub use game_state::{GameState, GameStateMachine};
pub use simulation::IntentResult;

use hecs::{Entity, World};
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::grid::GridMap;
use crate::occupancy::OccupancyIndex;
use crate::pathfinding::{GridPathSolver, PathSolver};
use crate::queries;
use crate::systems::player_input::PlayerIntent;
use crate::tile_map::{TileMap, TileWorld};
use crate::time_system::GameClock;
use crate::traversal::TraversalValidator;
use crate::ui::GameUiState;
use crate::world_query::WorldQuery;

/// The game engine - owns all game state and simulation logic.
pub struct GameEngine {
    config: GameConfig,
    map: TileMap,
    world: World,
    grid: GridMap,
    query: Box<dyn WorldQuery>,
    solver: Box<dyn PathSolver>,
    index: OccupancyIndex,
    events: EventQueue,
    state: GameStateMachine,
    clock: GameClock,
    ui: GameUiState,
    player: Entity,
    /// Events already handled but not yet returned to the host
    outbox: Vec<GameEvent>,
    /// Set once a frame has been simulated; the next new game rebuilds the level
    dirty: bool,
}

impl GameEngine {
    /// Engine over a tile level with the reference world query and A* solver.
    pub fn from_level(config: GameConfig, map: TileMap) -> Self {
        let grid = GridMap::new(&config.grid);
        let query = Box::new(TileWorld::new(map.clone(), grid, &config.world));
        let solver = Box::new(GridPathSolver::new(
            map.clone(),
            grid,
            config.spawning.path_smoothing,
        ));
        Self::with_collaborators(config, map, query, solver)
    }

    /// Engine with host-provided world query and path solver. `map` still
    /// supplies spawn points.
    pub fn with_collaborators(
        config: GameConfig,
        map: TileMap,
        query: Box<dyn WorldQuery>,
        solver: Box<dyn PathSolver>,
    ) -> Self {
        if let Err(err) = config.validate() {
            warn!(%err, "configuration has invalid values");
        }

        let grid = GridMap::new(&config.grid);
        let mut world = World::new();
        let mut index = OccupancyIndex::new();
        let mut events = EventQueue::new();
        let actors = initialization::populate_world(
            &mut world,
            &grid,
            &mut index,
            &map,
            &config,
            &mut events,
        );
        let ui = GameUiState::new(&config.hud, actors.player);
        let state = GameStateMachine::new();
        state.announce(&mut events);

        let mut engine = Self {
            config,
            map,
            world,
            grid,
            query,
            solver,
            index,
            events,
            state,
            clock: GameClock::new(),
            ui,
            player: actors.player,
            outbox: Vec::new(),
            dirty: false,
        };
        engine.flush_events(0.0);
        engine
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.index
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn state(&self) -> GameState {
        self.state.state()
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested()
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn ui(&self) -> &GameUiState {
        &self.ui
    }

    pub fn enemy_count(&self) -> usize {
        queries::enemy_count(&self.world)
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Route a player intent. Ignored unless the session is playing.
    pub fn handle_intent(&mut self, intent: PlayerIntent) -> IntentResult {
        if !self.state.is_playing() {
            return IntentResult::Ignored;
        }

        let validator = TraversalValidator::new(&self.grid, self.query.as_ref());
        let result = simulation::execute_player_intent(
            &self.world,
            validator,
            &mut self.index,
            &self.config.player,
            self.player,
            intent,
            &mut self.events,
        );
        self.flush_events(0.0);
        result
    }

    /// Escape key: toggles pause while playing.
    pub fn handle_escape(&mut self) {
        self.state.handle_escape(&mut self.events);
        self.flush_events(0.0);
    }

    // =========================================================================
    // MENU ACTIONS
    // =========================================================================

    pub fn start_new_game(&mut self) {
        self.reset_if_dirty();
        self.state.start_new_game(&mut self.events);
        self.flush_events(0.0);
    }

    pub fn resume_game(&mut self) {
        self.state.resume_game(&mut self.events);
        self.flush_events(0.0);
    }

    /// Rebuild the level from scratch and play again.
    pub fn retry_game(&mut self) {
        self.reset_if_dirty();
        self.state.retry_game(&mut self.events);
        self.flush_events(0.0);
    }

    pub fn go_to_main_menu(&mut self) {
        self.state.go_to_main_menu(&mut self.events);
        self.flush_events(0.0);
    }

    pub fn quit_game(&mut self) {
        self.state.quit_game();
    }

    pub fn debug_set_dead(&mut self) {
        self.state.debug_set_dead(&mut self.events);
        self.flush_events(0.0);
    }

    pub fn debug_set_end(&mut self) {
        self.state.debug_set_end(&mut self.events);
        self.flush_events(0.0);
    }

    // =========================================================================
    // FRAME
    // =========================================================================

    /// Advance one frame and return every event raised since the last call.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        puffin::profile_function!();

        if self.state.is_playing() {
            self.dirty = true;
            self.clock.advance(dt);
            simulation::advance_simulation(
                &mut self.world,
                &self.grid,
                self.query.as_ref(),
                &mut self.index,
                self.solver.as_mut(),
                &mut self.events,
                self.player,
                dt,
            );
        }

        self.flush_events(dt);
        std::mem::take(&mut self.outbox)
    }

    fn flush_events(&mut self, dt: f32) {
        let handled = simulation::process_events(
            &mut self.world,
            &mut self.index,
            &mut self.events,
            &mut self.ui,
            &mut self.state,
            &self.clock,
            self.player,
        );
        self.outbox.extend(handled);

        simulation::refresh_hud(
            &mut self.ui,
            &self.world,
            &self.grid,
            self.query.as_ref(),
            &self.index,
            self.player,
            dt,
        );
    }

    fn reset_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        info!("rebuilding level");

        // Results for the old world's actors are dropped
        let _ = self.solver.poll_completed();

        self.world = World::new();
        self.index.clear();
        let actors = initialization::populate_world(
            &mut self.world,
            &self.grid,
            &mut self.index,
            &self.map,
            &self.config,
            &mut self.events,
        );
        self.player = actors.player;
        self.ui.track_player(self.player);
        self.dirty = false;
    }
}
