//! Bounded combat log and the event-to-message mapping that feeds it.

use std::collections::VecDeque;

use hecs::{Entity, World};

use crate::components::{Name, Player};
use crate::engine::game_state::GameState;
use crate::events::{AttackInvalidReason, GameEvent};

#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<String>,
    max_entries: usize,
}

impl CombatLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Append `[timestamp] message`, dropping the oldest past the limit.
    /// Blank messages are ignored.
    pub fn push(&mut self, timestamp: &str, message: &str) {
        if message.trim().is_empty() {
            return;
        }
        self.entries.push_back(format!("[{}] {}", timestamp, message));
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn is_player(world: &World, entity: Entity) -> bool {
    world.get::<&Player>(entity).is_ok()
}

fn name_of(world: &World, entity: Entity) -> String {
    world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| "Something".to_string())
}

/// Log line for an event, if it deserves one.
///
/// Must run before dead actors are despawned so names still resolve.
pub fn describe_event(world: &World, event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::Attack {
            attacker,
            target,
            damage,
        } => Some(if is_player(world, *attacker) {
            format!("You hit {} for {}.", name_of(world, *target), damage)
        } else if is_player(world, *target) {
            format!("{} hits you for {}.", name_of(world, *attacker), damage)
        } else {
            format!(
                "{} hits {} for {}.",
                name_of(world, *attacker),
                name_of(world, *target),
                damage
            )
        }),
        GameEvent::Died { entity } => Some(if is_player(world, *entity) {
            "You die.".to_string()
        } else {
            format!("{} dies.", name_of(world, *entity))
        }),
        GameEvent::Healed { entity, amount } if is_player(world, *entity) => {
            Some(format!("You recover {}.", amount))
        }
        GameEvent::AggroGained { entity } => Some(format!("{} notices you.", name_of(world, *entity))),
        GameEvent::AggroLost { entity } => Some(format!("{} loses interest.", name_of(world, *entity))),
        GameEvent::AttackInvalid { reason } => match reason {
            AttackInvalidReason::Busy => None,
            AttackInvalidReason::OnCooldown => Some("Not ready yet.".to_string()),
            AttackInvalidReason::InvalidConfig => Some("You can't attack like that.".to_string()),
            AttackInvalidReason::NoTarget => Some("Nothing to hit.".to_string()),
            AttackInvalidReason::NotDamageable => Some("That can't be hurt.".to_string()),
        },
        GameEvent::InvalidAction { entity } if is_player(world, *entity) => {
            Some("You can't go that way.".to_string())
        }
        GameEvent::StateChanged { state, .. } => match state {
            GameState::Paused => Some("Paused.".to_string()),
            GameState::Dead => Some("You have fallen.".to_string()),
            GameState::End => Some("The end.".to_string()),
            GameState::Start | GameState::Playing => None,
        },
        _ => None,
    }
}
