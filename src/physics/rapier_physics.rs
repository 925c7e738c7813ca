use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Our wrapper to install Rapier and push config values into it.
/// Reads `GameConfig` at build time, so insert the config before adding the plugin.
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            cfg.physics.pixels_per_meter.max(1.0),
        ));
        if cfg.rapier_debug {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
        app.add_systems(Update, configure_gravity);
    }
}

/// The default context is created by the Rapier plugin; retry until it exists,
/// and re-apply whenever the config changes.
fn configure_gravity(
    cfg: Res<GameConfig>,
    mut rapier_cfg: Query<&mut RapierConfiguration>,
    mut done: Local<bool>,
) {
    if *done && !cfg.is_changed() {
        return;
    }
    let Ok(mut rc) = rapier_cfg.single_mut() else {
        return;
    };
    let gravity = Vect::new(0.0, cfg.physics.gravity_y);
    if rc.gravity != gravity {
        rc.gravity = gravity;
        info!(target: "physics", "gravity set to {:?}", gravity);
    }
    *done = true;
}
