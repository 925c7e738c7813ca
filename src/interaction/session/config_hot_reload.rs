use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::core::config::{parse_hex_color, GameConfig};

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Polls the config files and swaps in the new `GameConfig` when they change.
/// Tuning values (gravity, restitution, loss line, delays, colors) apply live; the
/// ladder and field size are fixed for the running game.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Startup, record_config_mtimes)
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// The running config was loaded from these files; only later edits count as changes.
fn record_config_mtimes(settings: Res<ConfigReloadSettings>, mut state: ResMut<ConfigReloadState>) {
    for path in &settings.paths {
        if let Some(mod_time) = modified(path) {
            state.last_mod.insert(path.clone(), mod_time);
        }
    }
}

/// Seed and auto-close only act at startup (and may come from the command line), so a
/// reload keeps the running values.
fn carry_startup_fields(current: &GameConfig, mut reloaded: GameConfig) -> GameConfig {
    reloaded.spawn.seed = current.spawn.seed;
    reloaded.window.auto_close = current.window.auto_close;
    reloaded
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut clear_color: Option<ResMut<ClearColor>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }

    let mut dirty = false;
    for path in &settings.paths {
        let Some(mod_time) = modified(path) else {
            continue;
        };
        let entry = state
            .last_mod
            .entry(path.clone())
            .or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    if !dirty {
        return;
    }

    // Optional layers that do not exist yet are skipped, not reported.
    let present = settings.paths.iter().filter(|p| p.exists());
    let (new_cfg, _used, errors) = GameConfig::load_layered(present);
    let new_cfg = carry_startup_fields(&cfg_res, new_cfg);
    for e in errors {
        warn!("CONFIG HOT-RELOAD issue: {e}");
    }
    if *cfg_res == new_cfg {
        return;
    }
    if new_cfg.ladder != cfg_res.ladder || new_cfg.field != cfg_res.field {
        warn!("CONFIG HOT-RELOAD: ladder/field changes take effect on restart");
    }
    for w in new_cfg.validate() {
        warn!("CONFIG HOT-RELOAD: {w}");
    }
    info!("Config hot-reload applied");

    if let Some(clear) = clear_color.as_deref_mut() {
        if let Ok(color) = parse_hex_color(&new_cfg.visuals.background) {
            clear.0 = color;
        }
    }
    if let Ok(mut window) = windows.single_mut() {
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    *cfg_res = new_cfg;
}
