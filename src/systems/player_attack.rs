//! Player attack resolution along the facing direction.

use hecs::{Entity, World};
use tracing::{debug, error};

use crate::components::{Health, Occupant, Transform};
use crate::config::AttackConfig;
use crate::direction::Facing;
use crate::events::{AttackInvalidReason, EventQueue, GameEvent};
use crate::grid::Cell;
use crate::occupancy::OccupancyIndex;
use crate::systems::health::apply_damage;
use crate::systems::player_stepper::is_busy;
use crate::time_system::Countdown;
use crate::traversal::TraversalValidator;

/// Attack cooldown state carried by the player
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerAttack {
    pub cooldown: Countdown,
}

impl PlayerAttack {
    pub fn tick(&mut self, dt: f32) {
        self.cooldown.tick(dt);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit { target: Entity, cell: Cell, damage: i32 },
    Invalid(AttackInvalidReason),
}

pub fn tick_attack_cooldowns(world: &mut World, dt: f32) {
    for (_id, attack) in world.query_mut::<&mut PlayerAttack>() {
        attack.tick(dt);
    }
}

/// Scan outward from `origin` along `facing` for the closest valid target.
///
/// The scan stops at the first cell that can't be reached, and (when
/// intermediate tiles must be empty) at the first occupant short of
/// `min_range_tiles`.
pub fn find_attack_target(
    validator: TraversalValidator,
    index: &OccupancyIndex,
    config: &AttackConfig,
    attacker: Entity,
    origin: Cell,
    facing: Facing,
) -> Option<(Entity, Cell)> {
    let (dx, dz) = facing.cell_step();
    let mut prev = origin;

    for r in 1..=config.max_range_tiles {
        let cell = origin.offset(dx * r, dz * r);

        let reachable = if config.require_clear_line {
            validator.can_step(prev, cell)
        } else {
            validator.has_floor(cell)
        };
        if !reachable {
            return None;
        }

        let occupant = index.get_at_cell(cell).filter(|e| *e != attacker);
        if r < config.min_range_tiles {
            if config.require_empty_intermediate_tiles && occupant.is_some() {
                return None;
            }
        } else if let Some(target) = occupant {
            return Some((target, cell));
        }

        prev = cell;
    }

    None
}

pub fn try_attack(
    world: &World,
    validator: TraversalValidator,
    index: &OccupancyIndex,
    config: &AttackConfig,
    player: Entity,
    events: &mut EventQueue,
) -> AttackOutcome {
    let outcome = resolve_attack(world, validator, index, config, player, events);
    if let AttackOutcome::Invalid(reason) = outcome {
        debug!(?reason, "attack rejected");
        events.push(GameEvent::AttackInvalid { reason });
    }
    outcome
}

fn resolve_attack(
    world: &World,
    validator: TraversalValidator,
    index: &OccupancyIndex,
    config: &AttackConfig,
    player: Entity,
    events: &mut EventQueue,
) -> AttackOutcome {
    if is_busy(world, player) {
        return AttackOutcome::Invalid(AttackInvalidReason::Busy);
    }
    let on_cooldown = world
        .get::<&PlayerAttack>(player)
        .map(|attack| !attack.cooldown.is_ready())
        .unwrap_or(false);
    if on_cooldown {
        return AttackOutcome::Invalid(AttackInvalidReason::OnCooldown);
    }
    if let Err(err) = config.validate_range() {
        error!(%err, "player attack misconfigured");
        return AttackOutcome::Invalid(AttackInvalidReason::InvalidConfig);
    }

    let facing = world.get::<&Facing>(player).map(|f| *f).unwrap_or_default();
    let origin = match world.get::<&Occupant>(player) {
        Ok(occupant) => occupant.cell,
        Err(_) => match world.get::<&Transform>(player) {
            Ok(transform) => validator.grid().world_to_cell(transform.position),
            Err(_) => return AttackOutcome::Invalid(AttackInvalidReason::NoTarget),
        },
    };

    let Some((target, cell)) = find_attack_target(validator, index, config, player, origin, facing)
    else {
        return AttackOutcome::Invalid(AttackInvalidReason::NoTarget);
    };

    let damageable = world
        .get::<&Health>(target)
        .map(|health| !health.is_dead())
        .unwrap_or(false);
    if !damageable {
        return AttackOutcome::Invalid(AttackInvalidReason::NotDamageable);
    }

    apply_damage(world, target, config.damage, events);
    if let Ok(mut attack) = world.get::<&mut PlayerAttack>(player) {
        attack.cooldown.start(config.cooldown_seconds);
    }
    events.push(GameEvent::Attack {
        attacker: player,
        target,
        damage: config.damage,
    });

    AttackOutcome::Hit {
        target,
        cell,
        damage: config.damage,
    }
}
