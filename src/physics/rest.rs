use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{PendingCircle, RestTracker};
use crate::core::config::GameConfig;

/// A dynamic body just came to rest. `position` is in world space.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BodyRested {
    pub entity: Entity,
    pub position: Vec2,
}

/// Feed Rapier's written-back velocities into each tracker; announce sleep transitions.
pub fn track_resting_bodies(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut q: Query<(Entity, &Transform, &Velocity, &RigidBody, &mut RestTracker), Without<PendingCircle>>,
    mut out: EventWriter<BodyRested>,
) {
    let dt = time.delta_secs();
    let loss = &cfg.loss;
    for (entity, tf, vel, body, mut tracker) in &mut q {
        if !matches!(body, RigidBody::Dynamic) {
            continue;
        }
        if tracker.advance(vel.linvel.length(), dt, loss.rest_speed, loss.rest_secs) {
            out.write(BodyRested {
                entity,
                position: tf.translation.truncate(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn still_dynamic_body_rests_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(GameConfig::default())
            .add_event::<BodyRested>()
            .add_systems(Update, track_resting_bodies);
        let still = app
            .world_mut()
            .spawn((
                RigidBody::Dynamic,
                Velocity::zero(),
                RestTracker::default(),
                Transform::from_xyz(3.0, 4.0, 0.0),
            ))
            .id();
        app.world_mut().spawn((
            RigidBody::Dynamic,
            Velocity::linear(Vec2::new(0.0, -200.0)),
            RestTracker::default(),
            Transform::default(),
        ));
        app.world_mut().spawn((
            RigidBody::Fixed,
            Velocity::zero(),
            RestTracker::default(),
            Transform::default(),
        ));

        let mut rested = Vec::new();
        for _ in 0..20 {
            app.update();
            rested.extend(
                app.world_mut()
                    .resource_mut::<Events<BodyRested>>()
                    .drain(),
            );
        }
        assert_eq!(
            rested,
            vec![BodyRested {
                entity: still,
                position: Vec2::new(3.0, 4.0)
            }]
        );
    }
}
