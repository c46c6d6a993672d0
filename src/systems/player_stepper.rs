//! Turn-based discrete player movement.
//!
//! One action at a time: while the player's `Motion` is not idle, move and
//! turn requests are rejected without side effects. Moves are validated
//! against the traversal validator and the occupancy index, then committed
//! to the index before the tween starts.

use hecs::{Entity, World};
use tracing::debug;

use crate::components::{Motion, Occupant, Transform};
use crate::config::PlayerConfig;
use crate::direction::Facing;
use crate::events::{EventQueue, GameEvent};
use crate::occupancy::OccupancyIndex;
use crate::systems::animation::{start_move, start_turn};
use crate::traversal::TraversalValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Started,
    /// Another transition is in flight. Nothing fired.
    Busy,
    /// Target cell rejected. `InvalidAction` fired.
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
}

impl MoveDirection {
    fn sign(self) -> f32 {
        match self {
            MoveDirection::Forward => 1.0,
            MoveDirection::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

pub fn is_busy(world: &World, player: Entity) -> bool {
    world
        .get::<&Motion>(player)
        .map(|motion| motion.is_busy())
        .unwrap_or(false)
}

/// Step one cell along (or against) the player's facing.
pub fn request_move(
    world: &World,
    validator: TraversalValidator,
    index: &mut OccupancyIndex,
    config: &PlayerConfig,
    player: Entity,
    direction: MoveDirection,
    events: &mut EventQueue,
) -> StepOutcome {
    // An actor missing its parts can't act; treat it like busy
    let Ok(motion) = world.get::<&Motion>(player).map(|m| *m) else {
        return StepOutcome::Busy;
    };
    if motion.is_busy() {
        return StepOutcome::Busy;
    }
    let Ok(position) = world.get::<&Transform>(player).map(|t| t.position) else {
        return StepOutcome::Busy;
    };
    let facing = world.get::<&Facing>(player).map(|f| *f).unwrap_or_default();

    let grid = validator.grid();
    let from_cell = world
        .get::<&Occupant>(player)
        .map(|o| o.cell)
        .unwrap_or_else(|_| grid.world_to_cell(position));

    let desired = position + facing.to_world_vector() * direction.sign() * grid.cell_size();
    let target_position = grid.snap_to_cell_center(desired);
    let target_cell = grid.world_to_cell(target_position);

    if !validator.can_enter_cell(position, target_cell) || !index.is_free_for(target_cell, player) {
        debug!(?target_cell, "player move blocked");
        events.push(GameEvent::InvalidAction { entity: player });
        return StepOutcome::Blocked;
    }

    index.move_occupant(world, player, from_cell, target_cell);
    start_move(world, player, target_position, config.move_duration);
    events.push(GameEvent::Step {
        entity: player,
        from: from_cell,
        to: target_cell,
    });
    StepOutcome::Started
}

/// Rotate 90 degrees. Facing updates immediately, yaw is tweened.
pub fn request_turn(
    world: &World,
    config: &PlayerConfig,
    player: Entity,
    direction: TurnDirection,
) -> StepOutcome {
    if is_busy(world, player) {
        return StepOutcome::Busy;
    }

    let next = {
        let Ok(mut facing) = world.get::<&mut Facing>(player) else {
            return StepOutcome::Busy;
        };
        let turned = match direction {
            TurnDirection::Left => facing.turn_left(),
            TurnDirection::Right => facing.turn_right(),
        };
        *facing = turned;
        turned
    };

    start_turn(world, player, next.yaw_degrees(), config.turn_duration);
    StepOutcome::Started
}
