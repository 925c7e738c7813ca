use bevy::prelude::*;

use crate::app::state::DropPhase;
use crate::core::components::{Circle, PendingCircle};
use crate::gameplay::merge::MergeStats;
use crate::gameplay::spawn::SpawnCounter;

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DebugStats {
    pub frame_counter: u64,
    pub fps: f32,
    pub circle_count: usize,
    pub pending: bool,
    pub spawned: u32,
    pub merges: u32,
    pub highest_tier: usize,
    pub phase: Option<DropPhase>,
}

pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut stats: ResMut<DebugStats>,
    q_circles: Query<Has<PendingCircle>, With<Circle>>,
    merges: Res<MergeStats>,
    spawned: Res<SpawnCounter>,
    phase: Option<Res<State<DropPhase>>>,
) {
    stats.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    stats.circle_count = q_circles.iter().count();
    stats.pending = q_circles.iter().any(|pending| pending);
    stats.spawned = spawned.0;
    stats.merges = merges.merges;
    stats.highest_tier = merges.highest_tier;
    stats.phase = phase.map(|p| *p.get());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::GameplayPlugin;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn counts_circles_and_pending() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, GameplayPlugin))
            .init_resource::<DebugStats>()
            .add_systems(Last, debug_stats_collect_system);
        app.update();
        app.update();
        let stats = app.world().resource::<DebugStats>();
        assert_eq!(stats.circle_count, 1);
        assert!(stats.pending);
        assert_eq!(stats.spawned, 1);
        assert_eq!(stats.phase, Some(DropPhase::Pending));
    }
}
