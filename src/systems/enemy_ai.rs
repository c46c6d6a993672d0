//! Enemy decision loop.
//!
//! Each enemy thinks on its own throttled interval: perceive the target,
//! update aggro, then either strike from melee range, back off when too
//! close, or follow the latest solved path one cell at a time. Cooldowns
//! tick every frame regardless of the think interval.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use crate::components::{Enemy, Health, Motion, Occupant, Transform};
use crate::config::EnemyConfig;
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::grid::{Cell, GridMap};
use crate::occupancy::OccupancyIndex;
use crate::pathfinding::{Path, PathCompletion, PathResult, PathSolver, PathTicket};
use crate::systems::animation::start_move;
use crate::systems::health::apply_damage;
use crate::time_system::Countdown;
use crate::traversal::TraversalValidator;

/// Per-enemy AI state
#[derive(Debug, Clone)]
pub struct EnemyBrain {
    pub config: EnemyConfig,
    think_timer: Countdown,
    move_cooldown: Countdown,
    attack_cooldown: Countdown,
    /// Aggro memory; only used when `forget_after_seconds > 0`
    last_seen: Countdown,
    repath_timer: Countdown,
    aggro: bool,
    path: Option<Path>,
    path_index: usize,
    /// Cell the current path was requested from
    path_origin: Option<Cell>,
    pending_ticket: Option<PathTicket>,
    pending_origin: Option<Cell>,
}

impl EnemyBrain {
    pub fn new(config: EnemyConfig) -> Self {
        Self {
            config,
            think_timer: Countdown::new(),
            move_cooldown: Countdown::new(),
            attack_cooldown: Countdown::new(),
            last_seen: Countdown::new(),
            repath_timer: Countdown::new(),
            aggro: false,
            path: None,
            path_index: 0,
            path_origin: None,
            pending_ticket: None,
            pending_origin: None,
        }
    }

    pub fn is_aggro(&self) -> bool {
        self.aggro
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn pending_ticket(&self) -> Option<PathTicket> {
        self.pending_ticket
    }

    pub fn tick_cooldowns(&mut self, dt: f32) {
        self.move_cooldown.tick(dt);
        self.attack_cooldown.tick(dt);
        self.last_seen.tick(dt);
        self.repath_timer.tick(dt);
    }

    /// Apply one perception result. Returns the new aggro value if it changed.
    pub fn update_aggro(&mut self, visible: bool) -> Option<bool> {
        let forget = self.config.forget_after_seconds;
        let next = if visible {
            self.last_seen.start(forget);
            true
        } else if forget <= 0.0 || self.last_seen.is_ready() {
            false
        } else {
            self.aggro
        };

        if next == self.aggro {
            return None;
        }
        self.aggro = next;
        Some(next)
    }

    pub fn set_path(&mut self, path: Path) {
        self.path = Some(path);
        self.path_index = 0;
        self.path_origin = None;
    }

    pub fn clear_path(&mut self) {
        self.path = None;
        self.path_index = 0;
        self.path_origin = None;
    }

    /// Line the path up with where the enemy stands now. A path solved from
    /// an earlier cell resumes past the segment holding the current cell;
    /// if no segment holds it the path is stale and `false` is returned.
    fn sync_path(&mut self, grid: &GridMap, my_cell: Cell) -> bool {
        let Some(path) = &self.path else {
            return true;
        };
        let nodes: Vec<Cell> = path
            .waypoints
            .iter()
            .map(|w| grid.world_to_cell(grid.snap_to_cell_center(*w)))
            .collect();

        let mut resume = None;
        for i in self.path_index..nodes.len() {
            let end = nodes.get(i + 1).copied().unwrap_or(nodes[i]);
            if lies_between(my_cell, nodes[i], end) {
                resume = Some(i + 1);
            }
        }
        if let Some(i) = resume {
            self.path_index = i;
            return true;
        }
        self.path_origin.map_or(true, |origin| origin == my_cell)
    }

    /// Install a solver result. Results for anything but the latest
    /// request are dropped.
    pub fn deliver_path(&mut self, ticket: PathTicket, result: PathResult) -> bool {
        if self.pending_ticket != Some(ticket) {
            debug!(ticket, "ignoring superseded path");
            return false;
        }
        self.pending_ticket = None;

        let origin = self.pending_origin.take();
        match result {
            PathResult::Found(path) if !path.is_empty() => {
                self.set_path(path);
                self.path_origin = origin;
            }
            _ => self.clear_path(),
        }
        true
    }
}

/// `cell` sits on the straight axis-aligned run from `a` to `b`, ends included.
fn lies_between(cell: Cell, a: Cell, b: Cell) -> bool {
    if cell == a || cell == b {
        true
    } else if a.x == b.x && cell.x == a.x {
        cell.z >= a.z.min(b.z) && cell.z <= a.z.max(b.z)
    } else if a.z == b.z && cell.z == a.z {
        cell.x >= a.x.min(b.x) && cell.x <= a.x.max(b.x)
    } else {
        false
    }
}

/// Shared collaborators for one pass of the decision loop
pub struct EnemyContext<'a> {
    pub validator: TraversalValidator<'a>,
    pub index: &'a mut OccupancyIndex,
    pub solver: &'a mut dyn PathSolver,
    pub events: &'a mut EventQueue,
}

/// Route a solver completion to the requesting enemy.
pub fn deliver_path(world: &World, completion: PathCompletion) {
    let Ok(mut brain) = world.get::<&mut EnemyBrain>(completion.requester) else {
        return;
    };
    brain.deliver_path(completion.ticket, completion.result);
}

/// Run every enemy's loop in spawn order. Each one runs to completion
/// before the next starts.
pub fn update_enemies(world: &World, ctx: &mut EnemyContext, target: Entity, dt: f32) {
    puffin::profile_function!();

    let mut enemies: Vec<Entity> = world
        .query::<&EnemyBrain>()
        .with::<&Enemy>()
        .iter()
        .map(|(id, _)| id)
        .collect();
    enemies.sort_by_key(|e| e.id());

    for enemy in enemies {
        update_enemy(world, ctx, enemy, target, dt);
    }
}

pub fn update_enemy(world: &World, ctx: &mut EnemyContext, enemy: Entity, target: Entity, dt: f32) {
    // Killed this frame, waiting for cleanup
    if world.get::<&Health>(enemy).map_or(false, |h| h.is_dead()) {
        return;
    }
    let busy = world
        .get::<&Motion>(enemy)
        .map(|m| m.is_busy())
        .unwrap_or(false);
    let Ok(mut brain) = world.get::<&mut EnemyBrain>(enemy) else {
        return;
    };

    brain.tick_cooldowns(dt);
    if busy {
        return;
    }

    brain.think_timer.tick(dt);
    if !brain.think_timer.is_ready() {
        return;
    }
    let interval = brain.config.think_interval_seconds;
    brain.think_timer.start_at_least(interval, MIN_THINK_INTERVAL);

    think(world, ctx, enemy, &mut brain, target);
}

fn think(world: &World, ctx: &mut EnemyContext, enemy: Entity, brain: &mut EnemyBrain, target: Entity) {
    let grid = ctx.validator.grid();

    let Ok(my_pos) = world.get::<&Transform>(enemy).map(|t| t.position) else {
        return;
    };
    let Ok(target_pos) = world.get::<&Transform>(target).map(|t| t.position) else {
        return;
    };
    let my_cell = grid.world_to_cell(my_pos);
    let target_cell = world
        .get::<&Occupant>(target)
        .map(|o| o.cell)
        .unwrap_or_else(|_| grid.world_to_cell(grid.snap_to_cell_center(target_pos)));

    let visible = can_see_target(ctx.validator, &brain.config, my_cell, target_cell, my_pos, target_pos);
    match brain.update_aggro(visible) {
        Some(true) => {
            debug!(?enemy, "aggro gained");
            ctx.events.push(GameEvent::AggroGained { entity: enemy });
        }
        Some(false) => {
            debug!(?enemy, "aggro lost");
            ctx.events.push(GameEvent::AggroLost { entity: enemy });
        }
        None => {}
    }

    if !brain.is_aggro() {
        brain.clear_path();
        return;
    }
    // Remembered targets aren't chased through walls
    if brain.config.require_line_of_sight && !visible {
        brain.clear_path();
        return;
    }

    let melee = brain.config.melee_range_tiles.max(1);
    let aligned = my_cell.is_aligned_with(target_cell);
    let distance = my_cell.manhattan(target_cell);

    if aligned
        && distance == melee
        && can_melee_strike_line(ctx, &brain.config, enemy, target, my_cell, target_cell)
    {
        try_attack_target(world, ctx, enemy, brain, target);
        return;
    }

    if aligned && distance < melee {
        try_step_away(world, ctx, enemy, brain, my_cell, target_cell);
        return;
    }

    if brain.path.is_none() || brain.repath_timer.is_ready() {
        let interval = brain.config.repath_interval_seconds;
        brain.repath_timer.start_at_least(interval, MIN_REPATH_INTERVAL);
        request_path(ctx, enemy, brain, my_pos, target_cell);
    }

    try_step_along_path(world, ctx, enemy, brain, my_pos, target_cell);
}

/// Inside the aggro radius (in cells) and, if required, with clear sight.
fn can_see_target(
    validator: TraversalValidator,
    config: &EnemyConfig,
    my_cell: Cell,
    target_cell: Cell,
    my_pos: Vec3,
    target_pos: Vec3,
) -> bool {
    let r = config.aggro_radius_tiles.max(0);
    let dx = target_cell.x - my_cell.x;
    let dz = target_cell.z - my_cell.z;
    if dx * dx + dz * dz > r * r {
        return false;
    }
    if !config.require_line_of_sight {
        return true;
    }

    let eye = Vec3::Y * config.sight_eye_height;
    let (from, to) = (my_pos + eye, target_pos + eye);
    if from.distance_squared(to) <= 1e-8 {
        return true;
    }
    validator.query().has_line_of_sight(from, to)
}

/// Cells strictly between attacker and target must pass the configured checks.
fn can_melee_strike_line(
    ctx: &EnemyContext,
    config: &EnemyConfig,
    enemy: Entity,
    target: Entity,
    from: Cell,
    to: Cell,
) -> bool {
    if !config.require_clear_line_for_melee && !config.require_empty_intermediate_for_melee {
        return true;
    }
    if !from.is_aligned_with(to) {
        return false;
    }

    let (sx, sz) = from.signum_toward(to);
    let distance = from.manhattan(to);
    for i in 1..distance {
        let cell = from.offset(sx * i, sz * i);

        if config.require_clear_line_for_melee {
            let prev = from.offset(sx * (i - 1), sz * (i - 1));
            if !ctx.validator.can_step(prev, cell) {
                return false;
            }
        }

        if config.require_empty_intermediate_for_melee {
            let blocked = ctx
                .index
                .get_at_cell(cell)
                .is_some_and(|o| o != enemy && o != target);
            if blocked {
                return false;
            }
        }
    }
    true
}

fn try_attack_target(
    world: &World,
    ctx: &mut EnemyContext,
    enemy: Entity,
    brain: &mut EnemyBrain,
    target: Entity,
) {
    if !brain.attack_cooldown.is_ready() {
        return;
    }
    let alive = world
        .get::<&Health>(target)
        .map(|h| !h.is_dead())
        .unwrap_or(false);
    if !alive {
        return;
    }

    let damage = brain.config.damage;
    apply_damage(world, target, damage, ctx.events);
    let cooldown = brain.config.attack_cooldown_seconds;
    brain.attack_cooldown.start_at_least(cooldown, MIN_ENEMY_COOLDOWN);
    ctx.events.push(GameEvent::Attack {
        attacker: enemy,
        target,
        damage,
    });
}

/// Step directly away from the target: larger-delta axis first, the other
/// as fallback.
fn try_step_away(
    world: &World,
    ctx: &mut EnemyContext,
    enemy: Entity,
    brain: &mut EnemyBrain,
    my_cell: Cell,
    target_cell: Cell,
) {
    if !brain.move_cooldown.is_ready() {
        return;
    }

    let dx = my_cell.x - target_cell.x;
    let dz = my_cell.z - target_cell.z;
    let along_x = (dx.signum(), 0);
    let along_z = (0, dz.signum());
    let (first, second) = if dx.abs() >= dz.abs() {
        (along_x, along_z)
    } else {
        (along_z, along_x)
    };

    let mut moved = false;
    for step in [first, second] {
        if step != (0, 0) && try_step(world, ctx, enemy, brain, my_cell, my_cell + step) {
            moved = true;
            break;
        }
    }

    if !moved {
        ctx.events.push(GameEvent::FailedAction { entity: enemy });
    }
}

/// One outstanding request per enemy; skipped while the solver is busy.
fn request_path(
    ctx: &mut EnemyContext,
    enemy: Entity,
    brain: &mut EnemyBrain,
    from: Vec3,
    target_cell: Cell,
) {
    if !ctx.solver.is_idle(enemy) {
        return;
    }

    let grid = ctx.validator.grid();
    let to = grid.cell_to_world_center(target_cell);
    let ticket = ctx.solver.request_path(enemy, from, to);
    brain.pending_ticket = Some(ticket);
    brain.pending_origin = Some(grid.world_to_cell(from));
}

fn try_step_along_path(
    world: &World,
    ctx: &mut EnemyContext,
    enemy: Entity,
    brain: &mut EnemyBrain,
    my_pos: Vec3,
    target_cell: Cell,
) {
    if !brain.move_cooldown.is_ready() {
        return;
    }

    let grid = ctx.validator.grid();
    let my_cell = grid.world_to_cell(my_pos);
    if !brain.sync_path(grid, my_cell) {
        // Solved before the last step; following it would walk back
        debug!(?enemy, ?my_cell, "path predates current cell, repathing");
        brain.clear_path();
        request_path(ctx, enemy, brain, my_pos, target_cell);
        return;
    }

    let next_node = loop {
        let Some(path) = &brain.path else {
            // Nothing to follow yet. Only a failure if no result is coming.
            if brain.pending_ticket.is_none() {
                ctx.events.push(GameEvent::FailedAction { entity: enemy });
            }
            return;
        };
        let Some(&waypoint) = path.waypoints.get(brain.path_index) else {
            brain.clear_path();
            return;
        };

        let node = grid.world_to_cell(grid.snap_to_cell_center(waypoint));
        if node == my_cell {
            brain.path_index += 1;
            continue;
        }
        break node;
    };

    // Smoothed paths skip cells; walk toward the node one axis at a time, x first
    let next_cell = if my_cell.is_adjacent_4(next_node) {
        next_node
    } else {
        let (sx, sz) = my_cell.signum_toward(next_node);
        if sx != 0 {
            my_cell.offset(sx, 0)
        } else {
            my_cell.offset(0, sz)
        }
    };

    if try_step(world, ctx, enemy, brain, my_cell, next_cell) {
        return;
    }

    debug!(?enemy, ?next_cell, "path step blocked, discarding path");
    brain.clear_path();
    ctx.events.push(GameEvent::FailedAction { entity: enemy });
}

/// Check vacancy and traversal, then commit: tween, cooldown, index, event.
fn try_step(
    world: &World,
    ctx: &mut EnemyContext,
    enemy: Entity,
    brain: &mut EnemyBrain,
    from: Cell,
    to: Cell,
) -> bool {
    if !ctx.index.is_free_for(to, enemy) {
        return false;
    }
    if !ctx.validator.can_step(from, to) {
        return false;
    }

    let grid = ctx.validator.grid();
    let destination = grid.snap_to_cell_center(grid.cell_to_world_center(to));
    start_move(world, enemy, destination, brain.config.move_duration);
    let cooldown = brain.config.move_cooldown_seconds;
    brain.move_cooldown.start_at_least(cooldown, MIN_ENEMY_COOLDOWN);
    ctx.index.move_occupant(world, enemy, from, to);
    ctx.events.push(GameEvent::Step {
        entity: enemy,
        from,
        to,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{center, Fixture, ScriptedSolver};

    fn events_for(fx: &mut Fixture, entity: Entity) -> Vec<GameEvent> {
        fx.events
            .drain()
            .filter(|e| match e {
                GameEvent::Step { entity: who, .. }
                | GameEvent::FailedAction { entity: who }
                | GameEvent::AggroGained { entity: who }
                | GameEvent::AggroLost { entity: who } => *who == entity,
                GameEvent::Attack { attacker, .. } => *attacker == entity,
                _ => false,
            })
            .collect()
    }

    fn player_health(fx: &Fixture) -> i32 {
        fx.world.get::<&Health>(fx.player).unwrap().current
    }

    #[test]
    fn test_adjacent_enemy_backs_off_instead_of_attacking() {
        let mut fx = Fixture::new(&["P", "E", ".", "."]);
        let enemy = fx.enemies[0];

        fx.tick_enemies(0.016);
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 1));
        assert_eq!(player_health(&fx), 10);
        let fired = events_for(&mut fx, enemy);
        assert_eq!(
            fired,
            vec![
                GameEvent::AggroGained { entity: enemy },
                GameEvent::Step { entity: enemy, from: Cell::new(0, 2), to: Cell::new(0, 1) },
            ]
        );
    }

    #[test]
    fn test_backoff_against_wall_fails() {
        let mut fx = Fixture::new(&["P", "E", "#"]);
        let enemy = fx.enemies[0];

        fx.tick_enemies(0.016);
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 1));
        assert!(events_for(&mut fx, enemy).contains(&GameEvent::FailedAction { entity: enemy }));
    }

    #[test]
    fn test_enemy_at_melee_range_attacks() {
        let mut fx = Fixture::new(&["P", ".", "E"]);
        let enemy = fx.enemies[0];

        fx.tick_enemies(0.016);
        assert_eq!(player_health(&fx), 9);
        assert!(events_for(&mut fx, enemy)
            .contains(&GameEvent::Attack { attacker: enemy, target: fx.player, damage: 1 }));

        // Cooldown holds the next swing
        fx.tick_enemies(0.2);
        assert_eq!(player_health(&fx), 9);
        for _ in 0..10 {
            fx.tick_enemies(0.1);
        }
        assert!(player_health(&fx) < 9);
    }

    #[test]
    fn test_melee_blocked_by_occupant_in_between() {
        let mut config = Fixture::default_config();
        config.enemy.aggro_radius_tiles = 0;
        let mut fx = Fixture::with_config(&["P", "E", "E"], config);
        let far = fx.enemy_at(Cell::new(0, 0));
        fx.world.get::<&mut EnemyBrain>(far).unwrap().config.aggro_radius_tiles = 8;

        fx.tick_enemies(0.016);
        assert_eq!(player_health(&fx), 10);
    }

    #[test]
    fn test_distant_enemy_paths_toward_player() {
        let mut fx = Fixture::new(&["P", ".", ".", ".", "E"]);
        let enemy = fx.enemies[0];

        // First think only requests a path
        fx.tick_enemies(0.016);
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 0));
        assert!(fx.world.get::<&EnemyBrain>(enemy).unwrap().pending_ticket().is_some());
        assert!(!events_for(&mut fx, enemy).contains(&GameEvent::FailedAction { entity: enemy }));

        // Result lands next tick, then the enemy steps as soon as it thinks
        for _ in 0..8 {
            fx.tick_enemies(0.016);
        }
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 1));

        // Walks until it has a one-tile gap, then attacks
        for _ in 0..120 {
            fx.tick_enemies(0.016);
        }
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 2));
        assert!(player_health(&fx) < 10);
    }

    #[test]
    fn test_waits_silently_while_path_pending() {
        let mut fx = Fixture::new(&["P", ".", ".", ".", "E"]);
        let enemy = fx.enemies[0];
        let mut solver = ScriptedSolver::new(None);

        for _ in 0..30 {
            fx.tick_enemies_with(&mut solver, 0.016);
        }
        // Solver never answers: one request, no repeat, no failure
        assert_eq!(solver.requests.len(), 1);
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 0));
        assert!(!events_for(&mut fx, enemy).contains(&GameEvent::FailedAction { entity: enemy }));
    }

    #[test]
    fn test_failed_path_is_requested_again_on_next_think() {
        let mut fx = Fixture::new(&["P", ".", ".", ".", "E"]);
        let enemy = fx.enemies[0];
        let mut solver = ScriptedSolver::new(Some(PathResult::Failed));

        fx.tick_enemies_with(&mut solver, 0.016);
        assert_eq!(solver.requests.len(), 1);
        // Failure lands, then the next think asks again
        for _ in 0..10 {
            fx.tick_enemies_with(&mut solver, 0.016);
        }
        assert_eq!(solver.requests.len(), 2);
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 0));
        assert!(fx.world.get::<&EnemyBrain>(enemy).unwrap().path().is_none());
    }

    #[test]
    fn test_wall_blocks_perception() {
        let mut fx = Fixture::new(&["P#E"]);
        let enemy = fx.enemies[0];
        fx.tick_enemies(0.016);
        assert!(!fx.world.get::<&EnemyBrain>(enemy).unwrap().is_aggro());
        assert!(events_for(&mut fx, enemy).is_empty());
    }

    #[test]
    fn test_out_of_radius_is_not_seen() {
        let mut config = Fixture::default_config();
        config.enemy.aggro_radius_tiles = 2;
        let mut fx = Fixture::with_config(&["P..E"], config);
        let enemy = fx.enemies[0];
        fx.tick_enemies(0.016);
        assert!(!fx.world.get::<&EnemyBrain>(enemy).unwrap().is_aggro());
    }

    #[test]
    fn test_aggro_memory_window() {
        let config = EnemyConfig {
            forget_after_seconds: 2.0,
            ..EnemyConfig::default()
        };
        let mut brain = EnemyBrain::new(config);

        assert_eq!(brain.update_aggro(true), Some(true));
        assert_eq!(brain.update_aggro(true), None);

        // Sight lost at t=0
        assert_eq!(brain.update_aggro(false), None);
        brain.tick_cooldowns(1.0);
        assert_eq!(brain.update_aggro(false), None);
        brain.tick_cooldowns(0.99);
        assert_eq!(brain.update_aggro(false), None);
        assert!(brain.is_aggro());

        brain.tick_cooldowns(0.02);
        assert_eq!(brain.update_aggro(false), Some(false));
        assert_eq!(brain.update_aggro(false), None);
    }

    #[test]
    fn test_aggro_drops_immediately_without_memory() {
        let mut brain = EnemyBrain::new(EnemyConfig::default());
        assert_eq!(brain.update_aggro(true), Some(true));
        assert_eq!(brain.update_aggro(false), Some(false));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut brain = EnemyBrain::new(EnemyConfig::default());
        brain.pending_ticket = Some(5);

        let path = Path::new(vec![Vec3::ZERO, Vec3::X]);
        assert!(!brain.deliver_path(4, PathResult::Found(path.clone())));
        assert!(brain.path().is_none());

        assert!(brain.deliver_path(5, PathResult::Found(path.clone())));
        assert_eq!(brain.path(), Some(&path));

        brain.pending_ticket = Some(6);
        assert!(brain.deliver_path(6, PathResult::Failed));
        assert!(brain.path().is_none());
    }

    #[test]
    fn test_skipped_waypoint_steps_x_first() {
        let mut fx = Fixture::new(&["....P", ".....", ".....", ".....", "E...."]);
        let enemy = fx.enemies[0];
        {
            let mut brain = fx.world.get::<&mut EnemyBrain>(enemy).unwrap();
            brain.set_path(Path::new(vec![center(0, 0), center(2, 2), center(4, 4)]));
        }

        fx.tick_enemies(0.016);
        assert_eq!(fx.cell_of(enemy), Cell::new(1, 0));
    }

    #[test]
    fn test_blocked_path_step_discards_path() {
        let mut fx = Fixture::new(&["....P", ".....", ".....", ".....", "EE..."]);
        let enemy = fx.enemy_at(Cell::new(0, 0));
        let other = fx.enemy_at(Cell::new(1, 0));
        // Keep the second enemy out of the way of the first's decisions
        fx.world.get::<&mut EnemyBrain>(other).unwrap().config.aggro_radius_tiles = 0;
        {
            let mut brain = fx.world.get::<&mut EnemyBrain>(enemy).unwrap();
            brain.set_path(Path::new(vec![center(0, 0), center(1, 0), center(2, 0)]));
        }

        fx.tick_enemies(0.016);
        assert_eq!(fx.cell_of(enemy), Cell::new(0, 0));
        assert!(events_for(&mut fx, enemy).contains(&GameEvent::FailedAction { entity: enemy }));
    }

    #[test]
    fn test_late_paths_never_walk_back() {
        let mut rows = vec!["P"];
        rows.extend(std::iter::repeat(".").take(12));
        rows.push("E");

        for smoothing in [true, false] {
            let mut config = Fixture::default_config();
            config.enemy.aggro_radius_tiles = 20;
            config.enemy.move_cooldown_seconds = 0.1;
            config.spawning.path_smoothing = smoothing;
            let mut fx = Fixture::with_config(&rows, config);
            let enemy = fx.enemies[0];

            for _ in 0..1500 {
                fx.tick_enemies(0.016);
                for event in events_for(&mut fx, enemy) {
                    if let GameEvent::Step { from, to, .. } = event {
                        assert_eq!(to.z, from.z + 1, "walked back {from:?} -> {to:?}");
                    }
                }
                if fx.cell_of(enemy) == Cell::new(0, 11) {
                    break;
                }
            }
            assert_eq!(fx.cell_of(enemy), Cell::new(0, 11));
        }
    }

    #[test]
    fn test_path_resumes_past_current_cell() {
        let mut brain = EnemyBrain::new(EnemyConfig::default());
        let grid = GridMap::default();
        brain.pending_ticket = Some(1);
        brain.pending_origin = Some(Cell::new(0, 0));
        let path = Path::new(vec![center(0, 0), center(0, 1), center(0, 2), center(0, 3)]);
        assert!(brain.deliver_path(1, PathResult::Found(path)));

        // Already moved one cell since the request
        assert!(brain.sync_path(&grid, Cell::new(0, 1)));
        assert_eq!(brain.path_index, 2);

        // Off the path entirely, and not where it was solved from
        assert!(!brain.sync_path(&grid, Cell::new(1, 1)));
    }

    #[test]
    fn test_two_enemies_cannot_claim_same_cell() {
        let mut fx = Fixture::new(&["....P", ".....", ".....", ".....", "E.E.."]);
        let first = fx.enemy_at(Cell::new(0, 0));
        let second = fx.enemy_at(Cell::new(2, 0));
        fx.world
            .get::<&mut EnemyBrain>(first)
            .unwrap()
            .set_path(Path::new(vec![center(0, 0), center(1, 0)]));
        fx.world
            .get::<&mut EnemyBrain>(second)
            .unwrap()
            .set_path(Path::new(vec![center(2, 0), center(1, 0)]));

        fx.tick_enemies(0.016);

        assert_eq!(fx.index.get_at_cell(Cell::new(1, 0)), Some(first));
        assert_eq!(fx.cell_of(first), Cell::new(1, 0));
        assert_eq!(fx.cell_of(second), Cell::new(2, 0));
        assert_eq!(fx.index.get_at_cell(Cell::new(2, 0)), Some(second));

        let fired: Vec<GameEvent> = fx.events.drain().collect();
        assert!(fired.contains(&GameEvent::FailedAction { entity: second }));
        assert!(!fired.contains(&GameEvent::FailedAction { entity: first }));
    }

    #[test]
    fn test_repath_timer_requests_while_path_held() {
        let mut config = Fixture::default_config();
        config.enemy.move_cooldown_seconds = 10.0;
        let mut fx = Fixture::with_config(&["P", ".", ".", ".", ".", ".", "E"], config);
        let enemy = fx.enemies[0];
        let route = (0..6).map(|z| center(0, z)).collect();
        let mut solver = ScriptedSolver::new(Some(PathResult::Found(Path::new(route))));

        let mut ticks = 0;
        while solver.requests.len() < 2 && ticks < 60 {
            fx.tick_enemies_with(&mut solver, 0.016);
            ticks += 1;
        }

        assert_eq!(solver.requests.len(), 2);
        assert!(ticks as f32 * 0.016 >= 0.35);
        let brain = fx.world.get::<&EnemyBrain>(enemy).unwrap();
        assert!(brain.path().is_some());
        assert!(brain.pending_ticket().is_some());
    }

    #[test]
    fn test_aggro_memory_outlasts_lost_sight() {
        let mut config = Fixture::default_config();
        config.enemy.forget_after_seconds = 0.5;
        let mut fx = Fixture::with_config(&["P", ".", ".", ".", "E"], config);
        let enemy = fx.enemies[0];
        let mut solver = ScriptedSolver::new(None);

        fx.tick_enemies_with(&mut solver, 0.016);
        assert!(events_for(&mut fx, enemy).contains(&GameEvent::AggroGained { entity: enemy }));

        // Target drops out of perception
        fx.world.get::<&mut EnemyBrain>(enemy).unwrap().config.aggro_radius_tiles = 0;
        for _ in 0..20 {
            fx.tick_enemies_with(&mut solver, 0.016);
        }
        assert!(fx.world.get::<&EnemyBrain>(enemy).unwrap().is_aggro());
        assert!(events_for(&mut fx, enemy).is_empty());

        for _ in 0..40 {
            fx.tick_enemies_with(&mut solver, 0.016);
        }
        assert!(!fx.world.get::<&EnemyBrain>(enemy).unwrap().is_aggro());
        let lost = events_for(&mut fx, enemy)
            .into_iter()
            .filter(|e| *e == GameEvent::AggroLost { entity: enemy })
            .count();
        assert_eq!(lost, 1);
    }
}
