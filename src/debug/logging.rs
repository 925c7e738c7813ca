use bevy::prelude::*;

use super::stats::DebugStats;

#[derive(Resource)]
pub struct DebugLogState {
    pub log_interval: f32,
    pub time_accum: f32,
}

impl Default for DebugLogState {
    fn default() -> Self {
        Self {
            log_interval: 2.0,
            time_accum: 0.0,
        }
    }
}

pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugLogState>, stats: Res<DebugStats>) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            target: "debug",
            "SIM frame={} t={:.3}s fps={:.1} circles={} pending={} spawned={} merges={} top_tier={} phase={:?}",
            stats.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.circle_count,
            stats.pending,
            stats.spawned,
            stats.merges,
            stats.highest_tier,
            stats.phase
        );
    }
}
