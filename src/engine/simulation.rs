//! Game simulation - player intents, per-frame advancement, and event processing.

use hecs::{Entity, World};
use tracing::info;

use crate::config::PlayerConfig;
use crate::engine::game_state::{GameState, GameStateMachine};
use crate::events::{EventQueue, GameEvent};
use crate::grid::GridMap;
use crate::occupancy::OccupancyIndex;
use crate::pathfinding::PathSolver;
use crate::queries;
use crate::systems::animation::advance_motions;
use crate::systems::combat::remove_dead_enemies;
use crate::systems::enemy_ai::{self, EnemyContext};
use crate::systems::player_attack::{tick_attack_cooldowns, try_attack, AttackOutcome};
use crate::systems::player_input::PlayerIntent;
use crate::systems::player_stepper::{
    request_move, request_turn, MoveDirection, StepOutcome, TurnDirection,
};
use crate::time_system::GameClock;
use crate::traversal::TraversalValidator;
use crate::ui::GameUiState;
use crate::world_query::WorldQuery;

/// Result of handing a player intent to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentResult {
    /// The session isn't in a state that accepts input
    Ignored,
    Step(StepOutcome),
    Attack(AttackOutcome),
}

/// Execute a player intent - unified entry point for all player actions.
pub fn execute_player_intent(
    world: &World,
    validator: TraversalValidator,
    index: &mut OccupancyIndex,
    config: &PlayerConfig,
    player: Entity,
    intent: PlayerIntent,
    events: &mut EventQueue,
) -> IntentResult {
    match intent {
        PlayerIntent::MoveForward => IntentResult::Step(request_move(
            world,
            validator,
            index,
            config,
            player,
            MoveDirection::Forward,
            events,
        )),
        PlayerIntent::MoveBackward => IntentResult::Step(request_move(
            world,
            validator,
            index,
            config,
            player,
            MoveDirection::Backward,
            events,
        )),
        PlayerIntent::TurnLeft => {
            IntentResult::Step(request_turn(world, config, player, TurnDirection::Left))
        }
        PlayerIntent::TurnRight => {
            IntentResult::Step(request_turn(world, config, player, TurnDirection::Right))
        }
        PlayerIntent::Attack => IntentResult::Attack(try_attack(
            world,
            validator,
            index,
            &config.attack,
            player,
            events,
        )),
    }
}

/// Advance one frame: solver results, player cooldowns, enemy decisions,
/// then motions. Enemies run one after another, each to completion.
#[allow(clippy::too_many_arguments)]
pub fn advance_simulation(
    world: &mut World,
    grid: &GridMap,
    query: &dyn WorldQuery,
    index: &mut OccupancyIndex,
    solver: &mut dyn PathSolver,
    events: &mut EventQueue,
    player: Entity,
    dt: f32,
) {
    puffin::profile_function!();

    {
        puffin::profile_scope!("path_completions");
        for completion in solver.poll_completed() {
            enemy_ai::deliver_path(world, completion);
        }
    }

    tick_attack_cooldowns(world, dt);

    {
        puffin::profile_scope!("enemy_ai");
        let mut ctx = EnemyContext {
            validator: TraversalValidator::new(grid, query),
            index,
            solver,
            events,
        };
        enemy_ai::update_enemies(world, &mut ctx, player, dt);
    }

    advance_motions(world, grid, dt);
}

/// Drain queued events into the HUD, clean up the dead, and react to the
/// player's death. Returns every event handled, in order.
///
/// Runs until the queue stays empty, so events raised while processing
/// (`EnemyDied`, `StateChanged`) are handled in the same call.
#[allow(clippy::too_many_arguments)]
pub fn process_events(
    world: &mut World,
    index: &mut OccupancyIndex,
    events: &mut EventQueue,
    ui: &mut GameUiState,
    state: &mut GameStateMachine,
    clock: &GameClock,
    player: Entity,
) -> Vec<GameEvent> {
    puffin::profile_function!();

    let mut processed = Vec::new();
    let timestamp = clock.timestamp();

    loop {
        let batch: Vec<GameEvent> = events.drain().collect();
        if batch.is_empty() {
            break;
        }

        let mut player_died = false;
        for event in &batch {
            ui.handle_event(world, event, &timestamp);
            if let GameEvent::Died { entity } = event {
                player_died |= *entity == player;
            }
        }
        processed.extend(batch);

        remove_dead_enemies(world, index, events);

        if player_died && state.state() != GameState::Dead {
            info!("player died");
            state.change_state(GameState::Dead, false, events);
        }
    }

    processed
}

/// Per-frame HUD upkeep that isn't driven by events.
pub fn refresh_hud(
    ui: &mut GameUiState,
    world: &World,
    grid: &GridMap,
    query: &dyn WorldQuery,
    index: &OccupancyIndex,
    player: Entity,
    dt: f32,
) {
    ui.status.set_in_combat(queries::any_enemy_aggro(world));
    ui.status.set_player_turn(queries::is_entity_idle(world, player));
    ui.minimap.tick(dt, world, grid, query, index, player);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HudConfig;
    use crate::grid::Cell;
    use crate::systems::health::apply_damage;
    use crate::test_support::Fixture;

    #[test]
    fn test_intents_map_to_systems() {
        let mut fx = Fixture::new(&["E", ".", "P"]);
        let validator = TraversalValidator::new(&fx.grid, &fx.tiles);
        let result = execute_player_intent(
            &fx.world,
            validator,
            &mut fx.index,
            &fx.config.player,
            fx.player,
            PlayerIntent::Attack,
            &mut fx.events,
        );
        assert!(matches!(result, IntentResult::Attack(AttackOutcome::Hit { .. })));

        let result = execute_player_intent(
            &fx.world,
            validator,
            &mut fx.index,
            &fx.config.player,
            fx.player,
            PlayerIntent::TurnRight,
            &mut fx.events,
        );
        assert_eq!(result, IntentResult::Step(StepOutcome::Started));
    }

    #[test]
    fn test_process_events_removes_dead_and_logs() {
        let mut fx = Fixture::new(&["P.E"]);
        let enemy = fx.enemies[0];
        let mut ui = GameUiState::new(&HudConfig::default(), fx.player);
        let mut state = GameStateMachine::new();
        let clock = GameClock::new();

        apply_damage(&fx.world, enemy, 99, &mut fx.events);
        let handled = process_events(
            &mut fx.world,
            &mut fx.index,
            &mut fx.events,
            &mut ui,
            &mut state,
            &clock,
            fx.player,
        );

        assert!(handled.contains(&GameEvent::EnemyDied { entity: enemy, cell: Cell::new(2, 0) }));
        assert!(!fx.world.contains(enemy));
        assert!(fx.events.is_empty());
        assert!(ui.log.entries().any(|line| line == "[00:00.0] Skeleton dies."));
    }

    #[test]
    fn test_player_death_moves_to_dead() {
        let mut fx = Fixture::new(&["P.E"]);
        let mut ui = GameUiState::new(&HudConfig::default(), fx.player);
        let mut state = GameStateMachine::new();
        let mut clock = GameClock::new();
        clock.advance(3.0);
        state.start_new_game(&mut fx.events);

        apply_damage(&fx.world, fx.player, 99, &mut fx.events);
        let handled = process_events(
            &mut fx.world,
            &mut fx.index,
            &mut fx.events,
            &mut ui,
            &mut state,
            &clock,
            fx.player,
        );

        assert_eq!(state.state(), GameState::Dead);
        assert_eq!(
            handled.last(),
            Some(&GameEvent::StateChanged { state: GameState::Dead, allow_cursor_lock: false })
        );
        assert!(fx.world.contains(fx.player));
        assert_eq!(ui.status.health_label(), "HP 0 / 10");
        assert!(ui.log.entries().any(|line| line == "[00:03.0] You die."));
    }
}
