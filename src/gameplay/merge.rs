//! Equal-tier circles that touch fuse into one circle of the next tier at their midpoint.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

use crate::app::state::DropPhase;
use crate::core::components::{Circle, PendingCircle};
use crate::core::config::GameConfig;
use crate::core::ladder::RadiusLadder;
use crate::gameplay::spawn::{circle_body, DropTimer, CIRCLE_Z};
use crate::physics::contacts::{ContactEvent, ContactPhase};

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CirclesMerged {
    /// The new circle.
    pub entity: Entity,
    pub tier: usize,
    /// World-space midpoint of the two sources.
    pub position: Vec2,
}

/// Two top-tier circles touched. They have nowhere to go, so they stay put.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderCompleted {
    pub a: Entity,
    pub b: Entity,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub merges: u32,
    pub highest_tier: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergePlan {
    Merge { tier: usize, radius: f32, position: Vec2 },
    /// Equal circles already at the top of the ladder.
    Capped,
    Mismatch,
}

/// Decide what two touching circles at world positions `pa` / `pb` turn into.
pub fn plan_merge(a: &Circle, pa: Vec2, b: &Circle, pb: Vec2, ladder: &RadiusLadder) -> MergePlan {
    if a.tier != b.tier {
        return MergePlan::Mismatch;
    }
    let Some(tier) = ladder.next(a.tier) else {
        return MergePlan::Capped;
    };
    let Some(radius) = ladder.radius(tier) else {
        return MergePlan::Capped;
    };
    MergePlan::Merge {
        tier,
        radius,
        position: (pa + pb) * 0.5,
    }
}

pub fn merge_touching_circles(
    mut commands: Commands,
    mut contacts: EventReader<ContactEvent>,
    cfg: Res<GameConfig>,
    ladder: Res<RadiusLadder>,
    circles: Query<(&Circle, &Transform, Has<PendingCircle>)>,
    mut stats: ResMut<MergeStats>,
    mut next: ResMut<NextState<DropPhase>>,
    mut merged: EventWriter<CirclesMerged>,
    mut completed: EventWriter<LadderCompleted>,
) {
    // Despawns are deferred; a source may not join a second merge this frame.
    let mut consumed: HashSet<Entity> = HashSet::new();
    for contact in contacts.read() {
        let (a, b) = (contact.a, contact.b);
        if a == b || consumed.contains(&a) || consumed.contains(&b) {
            continue;
        }
        let Ok((ca, ta, a_pending)) = circles.get(a) else { continue };
        let Ok((cb, tb, b_pending)) = circles.get(b) else { continue };
        let pa = ta.translation.truncate();
        let pb = tb.translation.truncate();

        match plan_merge(ca, pa, cb, pb, &ladder) {
            MergePlan::Mismatch => {}
            MergePlan::Capped => {
                if contact.phase == ContactPhase::Started {
                    info!(target: "merge", "top-tier circles {:?} and {:?} touched", a, b);
                    completed.write(LadderCompleted { a, b });
                }
            }
            MergePlan::Merge {
                tier,
                radius,
                position,
            } => {
                consumed.insert(a);
                consumed.insert(b);
                commands.entity(a).despawn();
                commands.entity(b).despawn();
                let circle = Circle { tier, radius };
                let entity = commands
                    .spawn((
                        Name::new(format!("Circle[{tier}]")),
                        circle_body(circle, cfg.physics.restitution),
                        RigidBody::Dynamic,
                        Transform::from_translation(position.extend(CIRCLE_Z)),
                    ))
                    .id();
                if a_pending || b_pending {
                    // The held circle is gone; the next one follows the usual drop delay.
                    commands.insert_resource(DropTimer::from_secs(cfg.spawn.respawn_delay_secs));
                    next.set(DropPhase::Released);
                    debug!(target: "merge", "pending circle absorbed by a merge");
                }
                stats.merges += 1;
                stats.highest_tier = stats.highest_tier.max(tier);
                merged.write(CirclesMerged {
                    entity,
                    tier,
                    position,
                });
                info!(
                    target: "merge",
                    "{:?} + {:?} -> {:?} tier={} at ({:.1}, {:.1})",
                    a, b, entity, tier, position.x, position.y
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tiers_merge_at_midpoint() {
        let ladder = RadiusLadder::default();
        let c = Circle { tier: 0, radius: 26.0 };
        let plan = plan_merge(&c, Vec2::new(0.0, 10.0), &c, Vec2::new(40.0, -30.0), &ladder);
        assert_eq!(
            plan,
            MergePlan::Merge {
                tier: 1,
                radius: 40.0,
                position: Vec2::new(20.0, -10.0)
            }
        );
    }

    #[test]
    fn different_tiers_do_not_merge() {
        let ladder = RadiusLadder::default();
        let a = Circle { tier: 0, radius: 26.0 };
        let b = Circle { tier: 1, radius: 40.0 };
        assert_eq!(
            plan_merge(&a, Vec2::ZERO, &b, Vec2::X, &ladder),
            MergePlan::Mismatch
        );
    }

    #[test]
    fn top_tier_is_capped() {
        let ladder = RadiusLadder::default();
        let top = Circle {
            tier: ladder.top_tier(),
            radius: 204.0,
        };
        assert_eq!(
            plan_merge(&top, Vec2::ZERO, &top, Vec2::X, &ladder),
            MergePlan::Capped
        );
    }
}
