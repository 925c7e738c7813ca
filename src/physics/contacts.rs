//! Rapier collision events -> typed contact records.
//!
//! Rapier reports only the start and the end of a contact. Gameplay also wants to hear
//! about pairs that keep touching (two equal circles that landed together while one of
//! them was still pending, for example), so pairs are tracked between the two events
//! and re-announced every frame as `Active`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Started,
    Active,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: Entity,
    pub b: Entity,
    pub phase: ContactPhase,
}

/// Pairs currently touching, stored with the lower entity first.
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts(pub HashSet<(Entity, Entity)>);

impl ActiveContacts {
    fn key(a: Entity, b: Entity) -> (Entity, Entity) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    #[cfg(test)]
    fn contains(&self, a: Entity, b: Entity) -> bool {
        self.0.contains(&Self::key(a, b))
    }
}

pub fn map_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    mut active: ResMut<ActiveContacts>,
    bodies: Query<(), With<Collider>>,
    mut out: EventWriter<ContactEvent>,
) {
    // Despawned bodies do not always get a Stopped event.
    active
        .0
        .retain(|(a, b)| bodies.contains(*a) && bodies.contains(*b));

    for &(a, b) in active.0.iter() {
        out.write(ContactEvent {
            a,
            b,
            phase: ContactPhase::Active,
        });
    }

    for ev in collisions.read() {
        match ev {
            CollisionEvent::Started(e1, e2, _flags) => {
                if active.0.insert(ActiveContacts::key(*e1, *e2)) {
                    out.write(ContactEvent {
                        a: *e1,
                        b: *e2,
                        phase: ContactPhase::Started,
                    });
                }
            }
            CollisionEvent::Stopped(e1, e2, _flags) => {
                active.0.remove(&ActiveContacts::key(*e1, *e2));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_event::<ContactEvent>()
            .init_resource::<ActiveContacts>()
            .add_systems(Update, map_collision_events);
        app
    }

    fn drain(app: &mut App) -> Vec<ContactEvent> {
        app.world_mut()
            .resource_mut::<Events<ContactEvent>>()
            .drain()
            .collect()
    }

    #[test]
    fn started_then_active_until_stopped() {
        let mut app = app();
        let a = app.world_mut().spawn(Collider::ball(5.0)).id();
        let b = app.world_mut().spawn(Collider::ball(5.0)).id();

        app.world_mut()
            .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
        app.update();
        let evs = drain(&mut app);
        assert_eq!(evs.len(), 1);
        assert_eq!(evs[0].phase, ContactPhase::Started);

        app.update();
        let evs = drain(&mut app);
        assert_eq!(evs.len(), 1);
        assert_eq!(evs[0].phase, ContactPhase::Active);

        app.world_mut()
            .send_event(CollisionEvent::Stopped(b, a, CollisionEventFlags::empty()));
        app.update();
        // The Active announcement for this frame precedes the Stopped event.
        let _ = drain(&mut app);
        app.update();
        assert!(drain(&mut app).is_empty());
        assert!(!app.world().resource::<ActiveContacts>().contains(a, b));
    }

    #[test]
    fn despawned_pairs_are_forgotten() {
        let mut app = app();
        let a = app.world_mut().spawn(Collider::ball(5.0)).id();
        let b = app.world_mut().spawn(Collider::ball(5.0)).id();
        app.world_mut()
            .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
        app.update();
        let _ = drain(&mut app);

        app.world_mut().despawn(a);
        app.update();
        assert!(drain(&mut app).is_empty());
        assert!(!app.world().resource::<ActiveContacts>().contains(a, b));
    }
}
