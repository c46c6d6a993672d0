//! Move and turn tweens.

use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{MoveTween, Motion, Occupant, Transform, TurnTween};
use crate::constants::*;
use crate::grid::GridMap;

/// `1 - (1 - t)^3`, with `t` clamped to [0, 1]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Interpolate between two angles in degrees along the shorter arc.
pub fn lerp_angle_degrees(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    from + delta * t.clamp(0.0, 1.0)
}

fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Put an actor into `Moving`. Does not check busy state.
pub fn start_move(world: &World, entity: Entity, to: Vec3, duration: f32) {
    let from = match world.get::<&Transform>(entity) {
        Ok(transform) => transform.position,
        Err(_) => return,
    };
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        *motion = Motion::Moving(MoveTween {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(MIN_TWEEN_DURATION),
        });
    }
}

/// Put an actor into `Turning`. Does not check busy state.
pub fn start_turn(world: &World, entity: Entity, to_yaw: f32, duration: f32) {
    let from_yaw = match world.get::<&Transform>(entity) {
        Ok(transform) => transform.yaw,
        Err(_) => return,
    };
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        *motion = Motion::Turning(TurnTween {
            from_yaw,
            to_yaw,
            elapsed: 0.0,
            duration: duration.max(MIN_TWEEN_DURATION),
        });
    }
}

/// Advance every tween. Finished tweens snap to their end value, return the
/// actor to `Idle` and refresh its occupant cell from the final position.
pub fn advance_motions(world: &mut World, grid: &GridMap, dt: f32) {
    puffin::profile_function!();

    for (_id, (transform, motion, occupant)) in
        world.query_mut::<(&mut Transform, &mut Motion, Option<&mut Occupant>)>()
    {
        let finished = match motion {
            Motion::Idle => false,
            Motion::Moving(tween) => {
                tween.elapsed += dt;
                let t = (tween.elapsed / tween.duration).min(1.0);
                if t >= 1.0 {
                    transform.position = tween.to;
                    true
                } else {
                    transform.position = tween.from.lerp(tween.to, ease_out_cubic(t));
                    false
                }
            }
            Motion::Turning(tween) => {
                tween.elapsed += dt;
                let t = (tween.elapsed / tween.duration).min(1.0);
                if t >= 1.0 {
                    transform.yaw = normalize_degrees(tween.to_yaw);
                    true
                } else {
                    transform.yaw = lerp_angle_degrees(tween.from_yaw, tween.to_yaw, ease_out_cubic(t));
                    false
                }
            }
        };

        if finished {
            *motion = Motion::Idle;
            if let Some(occupant) = occupant {
                occupant.cell = grid.world_to_cell(transform.position);
            }
        }
    }
}
