//! Game event system for decoupled communication between systems.
//!
//! Systems push notifications here; HUD, log and host code consume them at
//! the end of the tick. Transition events (aggro, death) are pushed once per
//! transition by the system that owns the state, never re-derived here.

use hecs::Entity;

use crate::engine::game_state::GameState;
use crate::grid::Cell;

/// Why a player attack was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackInvalidReason {
    Busy,
    OnCooldown,
    InvalidConfig,
    NoTarget,
    NotDamageable,
}

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Any health mutation
    HealthChanged { entity: Entity, current: i32, max: i32 },
    Damaged { entity: Entity, amount: i32 },
    /// Health reached zero. Fired once per entity.
    Died { entity: Entity },
    Healed { entity: Entity, amount: i32 },
    /// An actor hit another actor
    Attack { attacker: Entity, target: Entity, damage: i32 },
    /// Player attack rejected
    AttackInvalid { reason: AttackInvalidReason },
    /// Player move or turn rejected
    InvalidAction { entity: Entity },
    AggroGained { entity: Entity },
    AggroLost { entity: Entity },
    Step { entity: Entity, from: Cell, to: Cell },
    /// Enemy could not carry out what it decided to do
    FailedAction { entity: Entity },
    /// A dead enemy was removed from the world
    EnemyDied { entity: Entity, cell: Cell },
    StateChanged { state: GameState, allow_cursor_lock: bool },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Peek without draining
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
