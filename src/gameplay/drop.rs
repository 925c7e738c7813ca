//! Pending-circle control: follow the pointer, then hand the body to the simulation.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::DropPhase;
use crate::core::components::{Circle, PendingCircle, RestTracker};
use crate::core::config::GameConfig;
use crate::core::field::PlayField;
use crate::gameplay::spawn::DropTimer;
use crate::interaction::input::pointer::PointerAction;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CircleReleased {
    pub entity: Entity,
    pub tier: usize,
    /// Logical x the circle was dropped from.
    pub x: f32,
}

/// Move the pending circle to logical `x`, clamped between the walls, at spawn height.
pub fn place_pending(
    transform: &mut Transform,
    circle: &Circle,
    x: f32,
    field: &PlayField,
    top_margin: f32,
) -> f32 {
    let x = field.clamp_center_x(x, circle.radius);
    let y = field.spawn_y(circle.radius, top_margin);
    let world = field.to_world(Vec2::new(x, y));
    transform.translation.x = world.x;
    transform.translation.y = world.y;
    x
}

/// Pending: apply pointer moves; on release, drop the circle and schedule the next one.
pub fn apply_pointer_actions(
    mut commands: Commands,
    mut actions: EventReader<PointerAction>,
    cfg: Res<GameConfig>,
    field: Res<PlayField>,
    mut pending: Query<(Entity, &Circle, &mut Transform, &mut RestTracker), With<PendingCircle>>,
    mut next: ResMut<NextState<DropPhase>>,
    mut released: EventWriter<CircleReleased>,
) {
    let Ok((entity, circle, mut transform, mut rest)) = pending.single_mut() else {
        actions.clear();
        return;
    };
    let top_margin = cfg.spawn.top_margin;
    for action in actions.read() {
        match *action {
            PointerAction::Move { x } => {
                place_pending(&mut transform, circle, x, &field, top_margin);
            }
            PointerAction::Release { x } => {
                let current = field.to_logical(transform.translation.truncate()).x;
                let x = place_pending(
                    &mut transform,
                    circle,
                    x.unwrap_or(current),
                    &field,
                    top_margin,
                );
                rest.reset();
                commands
                    .entity(entity)
                    .remove::<PendingCircle>()
                    .insert((RigidBody::Dynamic, Sleeping::default()));
                commands.insert_resource(DropTimer::from_secs(cfg.spawn.respawn_delay_secs));
                next.set(DropPhase::Released);
                released.write(CircleReleased {
                    entity,
                    tier: circle.tier,
                    x,
                });
                info!(target: "drop", "released {:?} tier={} at x={:.1}", entity, circle.tier, x);
                // Anything after the release belongs to the next circle.
                break;
            }
        }
    }
    actions.clear();
}
