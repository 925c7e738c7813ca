use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::DropPhase;
use crate::core::components::{LossWatch, PendingCircle};
use crate::core::config::GameConfig;
use crate::core::field::PlayField;
use crate::physics::rest::BodyRested;

/// Emitted once per game, from the frame the loss was detected.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameOver {
    pub entity: Entity,
    /// Logical y of the body that came to rest.
    pub height: f32,
}

/// Optional host callback run when the game is lost.
#[derive(Resource)]
pub struct GameOverHook(pub Box<dyn Fn() + Send + Sync>);

impl GameOverHook {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }
}

/// Logical y strictly above the loss line (y grows downward).
pub fn crosses_loss_line(logical_y: f32, threshold_y: f32) -> bool {
    logical_y < threshold_y
}

pub fn detect_loss(
    mut rested: EventReader<BodyRested>,
    cfg: Res<GameConfig>,
    field: Res<PlayField>,
    watched: Query<&RigidBody, (With<LossWatch>, Without<PendingCircle>)>,
    mut next: ResMut<NextState<DropPhase>>,
    mut over: EventWriter<GameOver>,
) {
    for ev in rested.read() {
        let Ok(body) = watched.get(ev.entity) else {
            continue;
        };
        if !matches!(body, RigidBody::Dynamic) {
            continue;
        }
        let height = field.to_logical(ev.position).y;
        if !crosses_loss_line(height, cfg.loss.threshold_y) {
            continue;
        }
        warn!(target: "loss", "circle {:?} came to rest at y={:.1}; game over", ev.entity, height);
        next.set(DropPhase::GameOver);
        over.write(GameOver {
            entity: ev.entity,
            height,
        });
        // One loss per game; the phase change gates every later frame.
        break;
    }
    rested.clear();
}

/// OnEnter(GameOver): notify the host.
pub fn notify_game_over(hook: Option<Res<GameOverHook>>) {
    if let Some(hook) = hook {
        (hook.0)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_line_is_strict() {
        assert!(crosses_loss_line(299.9, 300.0));
        assert!(!crosses_loss_line(300.0, 300.0));
        assert!(!crosses_loss_line(900.0, 300.0));
    }
}
