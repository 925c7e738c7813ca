use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::app::state::DropPhase;
use crate::core::components::{Circle, LossWatch, PendingCircle, RestTracker};
use crate::core::config::GameConfig;
use crate::core::field::PlayField;
use crate::core::ladder::RadiusLadder;

/// Render depth for circles (arena pieces sit at 0).
pub const CIRCLE_Z: f32 = 1.0;

/// Source of randomness for spawn tiers. Seeded from `spawn.seed` when set.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl SpawnRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Circles handed to the player so far this game.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCounter(pub u32);

/// Delay between a release and the next pending circle. Dropping the resource cancels the spawn.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct DropTimer(pub Timer);

impl DropTimer {
    pub fn from_secs(secs: f32) -> Self {
        Self(Timer::from_seconds(secs.max(0.0), TimerMode::Once))
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleSpawned {
    pub entity: Entity,
    pub tier: usize,
}

/// Physics + gameplay components shared by pending and merged circles.
/// Callers add the `RigidBody` and `Transform`.
pub fn circle_body(circle: Circle, restitution: f32) -> impl Bundle {
    (
        circle,
        Collider::ball(circle.radius),
        Restitution::coefficient(restitution),
        ActiveEvents::COLLISION_EVENTS,
        Velocity::zero(),
        Sleeping::default(),
        LossWatch,
        RestTracker::default(),
    )
}

/// Startup: ladder and RNG from config unless the host already inserted them.
pub fn prepare_spawning(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    ladder: Option<Res<RadiusLadder>>,
    rng: Option<Res<SpawnRng>>,
) {
    if ladder.is_none() {
        commands.insert_resource(RadiusLadder::from_config(&cfg.ladder));
    }
    if rng.is_none() {
        commands.insert_resource(SpawnRng::from_seed(cfg.spawn.seed));
    }
}

/// Idle: hand the player a new static circle at the top center.
pub fn spawn_pending_circle(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    ladder: Res<RadiusLadder>,
    field: Res<PlayField>,
    mut rng: ResMut<SpawnRng>,
    mut counter: ResMut<SpawnCounter>,
    mut next: ResMut<NextState<DropPhase>>,
    mut spawned: EventWriter<CircleSpawned>,
) {
    if matches!(*next, NextState::Pending(DropPhase::GameOver)) {
        return;
    }
    let tier = ladder.pick_spawn_tier(counter.0, &mut rng.0);
    let Some(radius) = ladder.radius(tier) else {
        return;
    };
    let circle = Circle { tier, radius };
    let logical = Vec2::new(
        field.width * 0.5,
        field.spawn_y(radius, cfg.spawn.top_margin),
    );
    let entity = commands
        .spawn((
            Name::new("PendingCircle"),
            circle_body(circle, cfg.physics.restitution),
            RigidBody::Fixed,
            PendingCircle,
            Transform::from_translation(field.to_world(logical).extend(CIRCLE_Z)),
        ))
        .id();
    counter.0 += 1;
    next.set(DropPhase::Pending);
    spawned.write(CircleSpawned { entity, tier });
    info!(target: "spawn", "pending circle {:?} tier={} radius={}", entity, tier, radius);
}

/// Released: count down to the next spawn.
pub fn tick_drop_timer(
    mut commands: Commands,
    time: Res<Time>,
    timer: Option<ResMut<DropTimer>>,
    mut next: ResMut<NextState<DropPhase>>,
) {
    let Some(mut timer) = timer else {
        next.set(DropPhase::Idle);
        return;
    };
    if timer.tick(time.delta()).finished() {
        commands.remove_resource::<DropTimer>();
        next.set(DropPhase::Idle);
    }
}

/// GameOver: a scheduled spawn must never fire after the game ended.
pub fn cancel_drop_timer(mut commands: Commands, timer: Option<Res<DropTimer>>) {
    if timer.is_some() {
        debug!(target: "spawn", "cancelling scheduled spawn");
        commands.remove_resource::<DropTimer>();
    }
}
