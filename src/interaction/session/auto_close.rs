use crate::core::config::GameConfig;
use crate::gameplay::loss::GameOver;
use crate::gameplay::merge::MergeStats;
use crate::gameplay::spawn::SpawnCounter;
use bevy::prelude::*;

/// Exit timer for unattended runs (`window.autoClose` / `--auto-close`).
#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

/// Session housekeeping: timed exit and a summary line when the game is lost.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, (check_autoclose, log_session_summary));
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    timer: Option<ResMut<AutoCloseTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        info!("AutoClose: timer finished, requesting app exit");
        ev_exit.write(AppExit::Success);
    }
}

fn log_session_summary(
    mut over: EventReader<GameOver>,
    stats: Res<MergeStats>,
    spawned: Res<SpawnCounter>,
) {
    for ev in over.read() {
        info!(
            target: "session",
            "game over at y={:.1}: {} circles dropped, {} merges, highest tier {}",
            ev.height, spawned.0, stats.merges, stats.highest_tier
        );
    }
}
