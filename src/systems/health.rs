//! Health mutations with their notifications.
//!
//! All damage and healing goes through here so HUD collaborators see every
//! change and `Died` is pushed exactly once per entity.

use hecs::{Entity, World};
use tracing::info;

use crate::components::{DamageTaken, Health};
use crate::events::{EventQueue, GameEvent};

pub fn apply_damage(
    world: &World,
    entity: Entity,
    amount: i32,
    events: &mut EventQueue,
) -> Option<DamageTaken> {
    let (taken, current, max) = {
        let mut health = world.get::<&mut Health>(entity).ok()?;
        let taken = health.take_damage(amount)?;
        (taken, health.current, health.max)
    };

    events.push(GameEvent::Damaged {
        entity,
        amount: taken.amount,
    });
    events.push(GameEvent::HealthChanged {
        entity,
        current,
        max,
    });
    if taken.died {
        info!(?entity, "died");
        events.push(GameEvent::Died { entity });
    }
    Some(taken)
}

pub fn apply_heal(world: &World, entity: Entity, amount: i32, events: &mut EventQueue) -> Option<i32> {
    let (healed, current, max) = {
        let mut health = world.get::<&mut Health>(entity).ok()?;
        let healed = health.heal(amount)?;
        (healed, health.current, health.max)
    };

    events.push(GameEvent::Healed {
        entity,
        amount: healed,
    });
    events.push(GameEvent::HealthChanged {
        entity,
        current,
        max,
    });
    Some(healed)
}

/// Push the current value so listeners start populated
pub fn broadcast_health(world: &World, entity: Entity, events: &mut EventQueue) {
    if let Ok(health) = world.get::<&Health>(entity) {
        events.push(GameEvent::HealthChanged {
            entity,
            current: health.current,
            max: health.max,
        });
    }
}
