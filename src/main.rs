use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use bevy::prelude::*;
use clap::Parser;

use circle_merge::interaction::session::config_hot_reload::ConfigReloadSettings;
use circle_merge::{GameConfig, GameOverHook, GamePlugin};

const DEFAULT_CONFIG_DIR: &str = "assets/config";
const BASE_LAYER: &str = "game.ron";
const LOCAL_LAYER: &str = "game.local.ron";

#[derive(Parser, Debug)]
#[command(name = "circle_merge", about = "Drop circles, merge equal sizes, keep the stack low")]
struct Args {
    /// Config layers applied in order; later files override earlier ones.
    /// Defaults to assets/config/game.ron, plus game.local.ron when it exists.
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Fixed RNG seed for reproducible spawn sequences.
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds.
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
}

/// Config warnings gathered before logging is up; reported on startup.
#[derive(Resource, Default)]
struct ConfigDiagnostics(Vec<String>);

/// Default layers: the base file always, the local override only when it exists.
fn default_layers(dir: &Path) -> Vec<PathBuf> {
    let mut layers = vec![dir.join(BASE_LAYER)];
    let local = dir.join(LOCAL_LAYER);
    if local.exists() {
        layers.push(local);
    }
    layers
}

/// Returns the config, the files to watch for hot reload, and non-fatal load errors.
fn load_config(args: &Args) -> anyhow::Result<(GameConfig, Vec<PathBuf>, Vec<String>)> {
    if args.configs.is_empty() {
        let dir = Path::new(DEFAULT_CONFIG_DIR);
        let (cfg, _used, errors) = GameConfig::load_layered(default_layers(dir));
        // Watch the local override too, so creating it later is picked up.
        let watch = vec![dir.join(BASE_LAYER), dir.join(LOCAL_LAYER)];
        return Ok((cfg, watch, errors));
    }
    for path in &args.configs {
        GameConfig::load_from_file(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("loading config layer {}", path.display()))?;
    }
    let (cfg, _used, errors) = GameConfig::load_layered(&args.configs);
    if !errors.is_empty() {
        return Err(anyhow!(errors.join("; "))).context("merging config layers");
    }
    Ok((cfg, args.configs.clone(), Vec::new()))
}

fn report_config_diagnostics(diag: Res<ConfigDiagnostics>, cfg: Res<GameConfig>) {
    for e in &diag.0 {
        warn!(target: "config", "{e}");
    }
    for w in cfg.validate() {
        warn!(target: "config", "{w}");
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args = Args::parse();
    let (mut cfg, paths, diagnostics) = load_config(&args)?;
    if let Some(seed) = args.seed {
        cfg.spawn.seed = Some(seed);
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }

    let exit = App::new()
        .insert_resource(cfg.clone())
        .insert_resource(ConfigDiagnostics(diagnostics))
        .insert_resource(ConfigReloadSettings {
            paths,
            ..default()
        })
        .insert_resource(GameOverHook::new(|| {
            info!("Game over - close the window or wait for auto-close")
        }))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(Startup, report_config_diagnostics)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow!("app exited with code {code}")),
    }
}
